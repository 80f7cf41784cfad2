//! Onboarding step sequencer.
//!
//! Defines the ordered onboarding steps and a pure transition function over
//! them. Adjacency is an explicit table (`next` / `previous`), so there is no
//! arithmetic that could step outside `Welcome..=Completion`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::draft::{BiologicalSex, OnboardingProfileDraft};
use super::validation::{
    is_of_minimum_age, validate_confirm_password, validate_email, validate_registration_password,
};

/// Onboarding step.
///
/// 引导流程步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Welcome screen.
    ///
    /// 欢迎页。
    Welcome,
    /// Name, date of birth, sex, height, weight.
    ///
    /// 基本资料页。
    Profile,
    /// Goal selection.
    ///
    /// 目标选择页。
    Goals,
    /// Health-data access request (optional).
    ///
    /// 健康数据授权页（可跳过）。
    HealthDataPermission,
    /// Biometric unlock preference (optional).
    ///
    /// 生物识别设置页（可跳过）。
    BiometricSetup,
    /// Email and password.
    ///
    /// 创建账户页。
    AccountCreation,
    /// Onboarding finished.
    ///
    /// 完成。
    Completion,
}

impl OnboardingStep {
    pub const FIRST: OnboardingStep = OnboardingStep::Welcome;
    pub const LAST: OnboardingStep = OnboardingStep::Completion;

    pub const ALL: [OnboardingStep; 7] = [
        OnboardingStep::Welcome,
        OnboardingStep::Profile,
        OnboardingStep::Goals,
        OnboardingStep::HealthDataPermission,
        OnboardingStep::BiometricSetup,
        OnboardingStep::AccountCreation,
        OnboardingStep::Completion,
    ];

    pub fn index(&self) -> u8 {
        match self {
            OnboardingStep::Welcome => 0,
            OnboardingStep::Profile => 1,
            OnboardingStep::Goals => 2,
            OnboardingStep::HealthDataPermission => 3,
            OnboardingStep::BiometricSetup => 4,
            OnboardingStep::AccountCreation => 5,
            OnboardingStep::Completion => 6,
        }
    }

    /// Step reached by "continue". `AccountCreation` has no plain successor:
    /// `Completion` is entered only after registration succeeds.
    pub fn next(&self) -> Option<OnboardingStep> {
        match self {
            OnboardingStep::Welcome => Some(OnboardingStep::Profile),
            OnboardingStep::Profile => Some(OnboardingStep::Goals),
            OnboardingStep::Goals => Some(OnboardingStep::HealthDataPermission),
            OnboardingStep::HealthDataPermission => Some(OnboardingStep::BiometricSetup),
            OnboardingStep::BiometricSetup => Some(OnboardingStep::AccountCreation),
            OnboardingStep::AccountCreation => None,
            OnboardingStep::Completion => None,
        }
    }

    /// Step reached by "back". `Completion` is terminal.
    pub fn previous(&self) -> Option<OnboardingStep> {
        match self {
            OnboardingStep::Welcome => None,
            OnboardingStep::Profile => Some(OnboardingStep::Welcome),
            OnboardingStep::Goals => Some(OnboardingStep::Profile),
            OnboardingStep::HealthDataPermission => Some(OnboardingStep::Goals),
            OnboardingStep::BiometricSetup => Some(OnboardingStep::HealthDataPermission),
            OnboardingStep::AccountCreation => Some(OnboardingStep::BiometricSetup),
            OnboardingStep::Completion => None,
        }
    }

    /// Fraction of the flow completed, `index / LAST.index`.
    pub fn progress(&self) -> f64 {
        f64::from(self.index()) / f64::from(Self::LAST.index())
    }

    pub fn is_terminal(&self) -> bool {
        *self == OnboardingStep::Completion
    }

    /// Steps the user may skip without filling anything in.
    pub fn is_optional(&self) -> bool {
        matches!(
            self,
            OnboardingStep::HealthDataPermission | OnboardingStep::BiometricSetup
        )
    }
}

impl Default for OnboardingStep {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Events that drive the sequencer.
///
/// 驱动步骤切换的事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerEvent {
    Next,
    Previous,
    /// Resume or deep-link to a step.
    GoTo(OnboardingStep),
    /// Account creation finished successfully.
    RegistrationSucceeded,
}

/// Side-effects produced by transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    /// Persist the completion flag and hand control to the flow manager.
    MarkOnboardingComplete,
}

/// Pure step state machine: no side effects, no validation gating.
///
/// 纯状态机：不包含副作用，也不做校验拦截。
pub struct StepSequencer;

impl StepSequencer {
    pub fn transition(
        step: OnboardingStep,
        event: SequencerEvent,
    ) -> (OnboardingStep, Vec<StepAction>) {
        match (step, event) {
            (current, SequencerEvent::Next) => (current.next().unwrap_or(current), Vec::new()),
            (current, SequencerEvent::Previous) => {
                (current.previous().unwrap_or(current), Vec::new())
            }
            (OnboardingStep::Completion, SequencerEvent::GoTo(_)) => {
                (OnboardingStep::Completion, Vec::new())
            }
            (current, SequencerEvent::GoTo(OnboardingStep::Completion)) => (current, Vec::new()),
            (_, SequencerEvent::GoTo(target)) => (target, Vec::new()),
            (OnboardingStep::AccountCreation, SequencerEvent::RegistrationSucceeded) => (
                OnboardingStep::Completion,
                vec![StepAction::MarkOnboardingComplete],
            ),
            (current, SequencerEvent::RegistrationSucceeded) => (current, Vec::new()),
        }
    }
}

/// Whether the "continue" action is enabled on `step` for this draft.
pub fn can_continue(step: OnboardingStep, draft: &OnboardingProfileDraft, today: NaiveDate) -> bool {
    match step {
        OnboardingStep::Welcome => true,
        OnboardingStep::Profile => {
            !draft.first_name.trim().is_empty()
                && !draft.last_name.trim().is_empty()
                && draft
                    .date_of_birth
                    .is_some_and(|dob| is_of_minimum_age(dob, today))
                && draft.biological_sex != BiologicalSex::NotSet
        }
        OnboardingStep::Goals => !draft.selected_goals.is_empty(),
        OnboardingStep::HealthDataPermission | OnboardingStep::BiometricSetup => true,
        OnboardingStep::AccountCreation => {
            validate_email(&draft.email).is_valid()
                && validate_registration_password(&draft.password).is_valid()
                && validate_confirm_password(&draft.password, &draft.confirm_password).is_valid()
        }
        OnboardingStep::Completion => false,
    }
}

/// Earliest step (before `Completion`) whose continue predicate fails.
pub fn first_incomplete_step(
    draft: &OnboardingProfileDraft,
    today: NaiveDate,
) -> Option<OnboardingStep> {
    OnboardingStep::ALL
        .into_iter()
        .filter(|step| !step.is_terminal())
        .find(|step| !can_continue(*step, draft, today))
}
