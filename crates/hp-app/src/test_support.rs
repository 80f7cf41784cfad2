//! In-memory port fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hp_core::auth::{AuthError, AuthSession, AuthenticatedUser, LogoutScope};
use hp_core::onboarding::{
    BiologicalSex, FieldKind, FieldValidationState, HealthGoal, OnboardingProfileDraft,
    OnboardingStep, RegistrationRequest,
};
use hp_core::ports::{
    AuthenticationPort, ClockPort, FlowManagerPort, KeyValueStorePort, OnboardingEventPort,
    SecureStorageError, SecureStoragePort,
};
use hp_core::security::SecretString;

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    pub data: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_writes: std::sync::atomic::AtomicBool,
}

impl InMemoryKeyValueStore {
    pub fn contains(&self, key: &str) -> bool {
        self.data.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl KeyValueStorePort for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySecureStorage {
    pub data: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_writes: std::sync::atomic::AtomicBool,
}

impl InMemorySecureStorage {
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.data.lock().unwrap().get(key).cloned()
    }
}

impl SecureStoragePort for InMemorySecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SecureStorageError::PermissionDenied("keychain locked".into()));
        }
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SecureStorageError> {
        self.data.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub steps: Mutex<Vec<OnboardingStep>>,
    pub validations: Mutex<Vec<(FieldKind, FieldValidationState)>>,
}

#[async_trait]
impl OnboardingEventPort for RecordingEvents {
    async fn emit_step_changed(&self, step: OnboardingStep) {
        self.steps.lock().unwrap().push(step);
    }

    async fn emit_field_validated(&self, field: FieldKind, state: FieldValidationState) {
        self.validations.lock().unwrap().push((field, state));
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap())
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct RecordingFlowManager {
    pub completed: AtomicUsize,
    pub auth_started: AtomicUsize,
    pub auth_finished: AtomicUsize,
    pub email: Mutex<Option<String>>,
}

#[async_trait]
impl FlowManagerPort for RecordingFlowManager {
    async fn complete_onboarding(&self) -> anyhow::Result<()> {
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn start_authentication(&self) -> anyhow::Result<()> {
        self.auth_started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn finish_authentication(&self) -> anyhow::Result<()> {
        self.auth_finished.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn last_known_email(&self) -> anyhow::Result<Option<String>> {
        Ok(self.email.lock().unwrap().clone())
    }

    async fn set_last_known_email(&self, email: &str) -> anyhow::Result<()> {
        *self.email.lock().unwrap() = Some(email.to_string());
        Ok(())
    }
}

/// Authentication fake answering every call with a preset outcome.
pub struct ScriptedAuth {
    pub outcome: Result<(), AuthError>,
    pub register_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
}

impl ScriptedAuth {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            register_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: AuthError) -> Self {
        Self {
            outcome: Err(err),
            register_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    fn session(&self, email: &str) -> Result<AuthSession, AuthError> {
        self.outcome.clone().map(|()| test_session(email))
    }
}

pub fn test_session(email: &str) -> AuthSession {
    AuthSession {
        user: AuthenticatedUser {
            id: "user-1".into(),
            email: email.into(),
            display_name: "Ann Lee".into(),
        },
        access_token: SecretString::from("token-abc"),
    }
}

#[async_trait]
impl AuthenticationPort for ScriptedAuth {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthSession, AuthError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.session(&request.email)
    }

    async fn login(&self, email: &str, _password: &SecretString) -> Result<AuthSession, AuthError> {
        self.session(email)
    }

    async fn logout(&self, _scope: LogoutScope) -> Result<(), AuthError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// A draft that passes every step predicate.
pub fn complete_draft() -> OnboardingProfileDraft {
    OnboardingProfileDraft {
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        date_of_birth: NaiveDate::from_ymd_opt(2001, 3, 14),
        biological_sex: BiologicalSex::Female,
        height_cm: Some(168.0),
        weight_kg: Some(61.5),
        selected_goals: [HealthGoal::SleepBetter, HealthGoal::TrackLabResults]
            .into_iter()
            .collect(),
        email: "ann.lee@example.com".into(),
        password: "abcd1234".into(),
        confirm_password: "abcd1234".into(),
        ..Default::default()
    }
}
