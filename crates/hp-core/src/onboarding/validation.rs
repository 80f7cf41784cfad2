//! Field validators.
//!
//! Every validator is a pure function returning a [`FieldValidationState`].
//! Validators never fail: a bad value produces `Invalid` with a message meant
//! for inline display next to the field.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::draft::OnboardingProfileDraft;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_AGE_YEARS: i32 = 18;
pub const MAX_NAME_LEN: usize = 50;

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\s'.\-]+$").expect("valid name regex"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s().\-]+$").expect("valid phone regex"));

/// Result of validating a single field.
///
/// 单个字段的校验结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum FieldValidationState {
    Valid,
    Invalid(String),
}

impl FieldValidationState {
    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Inline error text, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// Fields that receive live (debounced) validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    FirstName,
    LastName,
    DateOfBirth,
    PhoneNumber,
    Email,
    Password,
    ConfirmPassword,
}

/// Snapshot of the value(s) needed to validate one field.
///
/// Captured when the edit happens so that a delayed validation pass always
/// checks the value that was current at scheduling time.
#[derive(Clone, PartialEq)]
pub enum FieldInput {
    FirstName(String),
    LastName(String),
    DateOfBirth(Option<NaiveDate>),
    PhoneNumber(String),
    Email(String),
    Password(String),
    ConfirmPassword { password: String, confirm: String },
}

impl FieldInput {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::FirstName(_) => FieldKind::FirstName,
            Self::LastName(_) => FieldKind::LastName,
            Self::DateOfBirth(_) => FieldKind::DateOfBirth,
            Self::PhoneNumber(_) => FieldKind::PhoneNumber,
            Self::Email(_) => FieldKind::Email,
            Self::Password(_) => FieldKind::Password,
            Self::ConfirmPassword { .. } => FieldKind::ConfirmPassword,
        }
    }

    /// Capture the current value of `kind` from the draft.
    pub fn from_draft(kind: FieldKind, draft: &OnboardingProfileDraft) -> Self {
        match kind {
            FieldKind::FirstName => Self::FirstName(draft.first_name.clone()),
            FieldKind::LastName => Self::LastName(draft.last_name.clone()),
            FieldKind::DateOfBirth => Self::DateOfBirth(draft.date_of_birth),
            FieldKind::PhoneNumber => Self::PhoneNumber(draft.phone_number.clone()),
            FieldKind::Email => Self::Email(draft.email.clone()),
            FieldKind::Password => Self::Password(draft.password.clone()),
            FieldKind::ConfirmPassword => Self::ConfirmPassword {
                password: draft.password.clone(),
                confirm: draft.confirm_password.clone(),
            },
        }
    }
}

impl fmt::Debug for FieldInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName(v) => f.debug_tuple("FirstName").field(v).finish(),
            Self::LastName(v) => f.debug_tuple("LastName").field(v).finish(),
            Self::DateOfBirth(v) => f.debug_tuple("DateOfBirth").field(v).finish(),
            Self::PhoneNumber(v) => f.debug_tuple("PhoneNumber").field(v).finish(),
            Self::Email(v) => f.debug_tuple("Email").field(v).finish(),
            Self::Password(_) => f.write_str("Password([REDACTED])"),
            Self::ConfirmPassword { .. } => f.write_str("ConfirmPassword([REDACTED])"),
        }
    }
}

/// Dispatch a captured input to the matching validator.
pub fn validate_field(input: &FieldInput, today: NaiveDate) -> FieldValidationState {
    match input {
        FieldInput::FirstName(value) | FieldInput::LastName(value) => validate_name(value),
        FieldInput::DateOfBirth(value) => validate_date_of_birth(*value, today),
        FieldInput::PhoneNumber(value) => validate_phone(value),
        FieldInput::Email(value) => validate_email(value),
        FieldInput::Password(value) => validate_registration_password(value),
        FieldInput::ConfirmPassword { password, confirm } => {
            validate_confirm_password(password, confirm)
        }
    }
}

pub fn validate_email(email: &str) -> FieldValidationState {
    let email = email.trim();
    if email.is_empty() {
        return FieldValidationState::invalid("Email is required");
    }
    if !EMAIL_PATTERN.is_match(email) {
        return FieldValidationState::invalid("Please enter a valid email address");
    }
    FieldValidationState::Valid
}

/// Registration passwords: at least 8 characters with a letter and a digit.
pub fn validate_registration_password(password: &str) -> FieldValidationState {
    if password.is_empty() {
        return FieldValidationState::invalid("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return FieldValidationState::invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if !password.chars().any(char::is_alphabetic) {
        return FieldValidationState::invalid("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return FieldValidationState::invalid("Password must contain at least one number");
    }
    FieldValidationState::Valid
}

/// Sign-in passwords are only checked for presence; strength is enforced at
/// registration time.
pub fn validate_login_password(password: &str) -> FieldValidationState {
    if password.is_empty() {
        return FieldValidationState::invalid("Password is required");
    }
    FieldValidationState::Valid
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> FieldValidationState {
    if confirm.is_empty() {
        return FieldValidationState::invalid("Please confirm your password");
    }
    if password != confirm {
        return FieldValidationState::invalid("Passwords do not match");
    }
    FieldValidationState::Valid
}

pub fn validate_name(name: &str) -> FieldValidationState {
    let name = name.trim();
    if name.is_empty() {
        return FieldValidationState::invalid("Name is required");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return FieldValidationState::invalid(format!(
            "Name must be {MAX_NAME_LEN} characters or fewer"
        ));
    }
    if !NAME_PATTERN.is_match(name) {
        return FieldValidationState::invalid("Name contains invalid characters");
    }
    FieldValidationState::Valid
}

/// Phone number is optional: empty input is valid.
pub fn validate_phone(phone: &str) -> FieldValidationState {
    let phone = phone.trim();
    if phone.is_empty() {
        return FieldValidationState::Valid;
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_PATTERN.is_match(phone) || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return FieldValidationState::invalid("Please enter a valid phone number");
    }
    FieldValidationState::Valid
}

/// Age in whole calendar years, comparing only the year components.
///
/// NOTE: someone whose birthday falls later in the current year is counted
/// one year older than they are. `is_of_minimum_age` uses this value as is.
pub fn age_in_calendar_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - date_of_birth.year()
}

pub fn is_of_minimum_age(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    age_in_calendar_years(date_of_birth, today) >= MIN_AGE_YEARS
}

/// Date of birth is optional at field level; when present the user must be
/// at least [`MIN_AGE_YEARS`] by calendar year.
pub fn validate_date_of_birth(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> FieldValidationState {
    match date_of_birth {
        None => FieldValidationState::Valid,
        Some(dob) if is_of_minimum_age(dob, today) => FieldValidationState::Valid,
        Some(_) => FieldValidationState::invalid(format!(
            "You must be at least {MIN_AGE_YEARS} years old"
        )),
    }
}
