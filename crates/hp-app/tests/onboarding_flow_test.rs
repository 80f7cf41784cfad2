use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tempfile::TempDir;
use tokio::sync::Notify;

use hp_app::usecases::auth::ACCESS_TOKEN_KEY;
use hp_app::{AppFlow, AppRoute, OnboardingDeps, OnboardingError, OnboardingFlowController};
use hp_core::auth::{AuthError, AuthErrorKind, AuthSession, AuthenticatedUser, LogoutScope};
use hp_core::onboarding::{
    BiologicalSex, FieldKind, FieldValidationState, HealthGoal, OnboardingStep,
    RegistrationRequest,
};
use hp_core::ports::{
    AuthenticationPort, ClockPort, HealthDataPermissionPort, KeyValueStorePort,
    OnboardingEventPort, SecureStorageError, SecureStoragePort,
};
use hp_core::security::SecretString;
use hp_infra::FileKeyValueStore;

#[derive(Default)]
struct MemoryStore {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl KeyValueStorePort for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
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
struct MemorySecureStorage {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl SecureStoragePort for MemorySecureStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SecureStorageError> {
        Ok(self.data.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), SecureStorageError> {
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
struct RecordingEvents {
    steps: Mutex<Vec<OnboardingStep>>,
    validations: Mutex<Vec<(FieldKind, FieldValidationState)>>,
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

struct FixedClock;

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }
}

struct NoHealthKit;

#[async_trait]
impl HealthDataPermissionPort for NoHealthKit {
    async fn request_authorization(&self) -> anyhow::Result<bool> {
        anyhow::bail!("health data not available on this device")
    }
}

/// Registration backend that can be held open until the test releases it.
struct GatedAuth {
    outcome: Result<(), AuthError>,
    gate: Option<Arc<Notify>>,
    register_calls: AtomicUsize,
}

impl GatedAuth {
    fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            gate: None,
            register_calls: AtomicUsize::new(0),
        }
    }

    fn failing(kind: AuthErrorKind) -> Self {
        Self {
            outcome: Err(AuthError::new(kind, "backend said no")),
            gate: None,
            register_calls: AtomicUsize::new(0),
        }
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::succeeding()
        }
    }

    fn session(&self, email: &str) -> Result<AuthSession, AuthError> {
        self.outcome.clone().map(|()| AuthSession {
            user: AuthenticatedUser {
                id: "user-42".into(),
                email: email.into(),
                display_name: "Ann Lee".into(),
            },
            access_token: SecretString::from("token-xyz"),
        })
    }
}

#[async_trait]
impl AuthenticationPort for GatedAuth {
    async fn register(&self, request: &RegistrationRequest) -> Result<AuthSession, AuthError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.session(&request.email)
    }

    async fn login(&self, email: &str, _password: &SecretString) -> Result<AuthSession, AuthError> {
        self.session(email)
    }

    async fn logout(&self, _scope: LogoutScope) -> Result<(), AuthError> {
        Ok(())
    }
}

struct Env {
    store: Arc<dyn KeyValueStorePort>,
    secure: Arc<MemorySecureStorage>,
    events: Arc<RecordingEvents>,
    flow: Arc<AppFlow>,
    auth: Arc<GatedAuth>,
}

impl Env {
    fn new(store: Arc<dyn KeyValueStorePort>, auth: GatedAuth) -> Self {
        Self {
            flow: Arc::new(AppFlow::new(store.clone(), AppRoute::Onboarding)),
            store,
            secure: Arc::new(MemorySecureStorage::default()),
            events: Arc::new(RecordingEvents::default()),
            auth: Arc::new(auth),
        }
    }

    fn in_memory(auth: GatedAuth) -> Self {
        Self::new(Arc::new(MemoryStore::default()), auth)
    }

    async fn controller(&self) -> OnboardingFlowController {
        let deps = OnboardingDeps {
            auth: self.auth.clone(),
            health_data: Arc::new(NoHealthKit),
            key_value: self.store.clone(),
            secure_storage: self.secure.clone(),
            flow_manager: self.flow.clone(),
            events: self.events.clone(),
            clock: Arc::new(FixedClock),
            validation_debounce: Duration::from_millis(500),
        };
        OnboardingFlowController::load(deps).await.unwrap()
    }
}

async fn fill_profile(controller: &OnboardingFlowController) {
    controller.set_first_name("Ann").await.unwrap();
    controller.set_last_name("Lee").await.unwrap();
    controller
        .set_date_of_birth(NaiveDate::from_ymd_opt(2001, 3, 14))
        .await
        .unwrap();
    controller
        .set_biological_sex(BiologicalSex::Female)
        .await
        .unwrap();
}

async fn fill_everything(controller: &OnboardingFlowController, password: &str) {
    fill_profile(controller).await;
    controller.toggle_goal(HealthGoal::SleepBetter).await.unwrap();
    controller
        .toggle_goal(HealthGoal::TrackLabResults)
        .await
        .unwrap();
    controller.set_email("ann.lee@example.com").await.unwrap();
    controller.set_password(password).await.unwrap();
    controller.set_confirm_password(password).await.unwrap();
    controller
        .go_to_step(OnboardingStep::AccountCreation)
        .await;
}

#[tokio::test]
async fn profile_step_enables_continue_once_filled() {
    let env = Env::in_memory(GatedAuth::succeeding());
    let controller = env.controller().await;
    controller.next_step().await;
    assert!(!controller.can_continue().await);

    fill_profile(&controller).await;

    assert!(controller.can_continue().await);
    assert_eq!(controller.next_step().await, OnboardingStep::Goals);
    assert!(!controller.can_continue().await);
}

#[tokio::test]
async fn letters_only_password_never_reaches_backend() {
    let env = Env::in_memory(GatedAuth::succeeding());
    let controller = env.controller().await;
    fill_everything(&controller, "abcdefgh").await;

    assert!(!controller.can_continue().await);
    assert!(controller.create_account().await.unwrap().is_none());

    let view = controller.view_state().await;
    assert_eq!(view.step, OnboardingStep::AccountCreation);
    assert!(view.show_error);
    assert_eq!(env.auth.register_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn timeout_shows_connectivity_message_and_keeps_step() {
    let env = Env::in_memory(GatedAuth::failing(AuthErrorKind::Timeout));
    let controller = env.controller().await;
    fill_everything(&controller, "abcd1234").await;

    assert!(controller.create_account().await.unwrap().is_none());

    let view = controller.view_state().await;
    assert_eq!(view.step, OnboardingStep::AccountCreation);
    assert!(!view.is_submitting);
    let message = view.error_message.unwrap();
    assert_eq!(message, AuthErrorKind::Timeout.user_message());
    assert_ne!(message, AuthErrorKind::Unknown.user_message());
    assert_eq!(env.flow.current(), AppRoute::Onboarding);
}

#[tokio::test]
async fn double_tap_sends_one_registration() {
    let gate = Arc::new(Notify::new());
    let env = Env::in_memory(GatedAuth::gated(gate.clone()));
    let controller = Arc::new(env.controller().await);
    fill_everything(&controller, "abcd1234").await;

    let first = tokio::spawn({
        let controller = controller.clone();
        async move { controller.create_account().await }
    });
    while env.auth.register_calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }
    assert!(controller.view_state().await.is_submitting);

    let second = controller.create_account().await.unwrap();
    assert!(second.is_none());

    gate.notify_one();
    let user = first.await.unwrap().unwrap();

    assert_eq!(user.map(|u| u.id).as_deref(), Some("user-42"));
    assert_eq!(env.auth.register_calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.current_step().await, OnboardingStep::Completion);
}

#[tokio::test]
async fn abandoned_submission_can_be_retried() {
    let gate = Arc::new(Notify::new());
    let env = Env::in_memory(GatedAuth::gated(gate.clone()));
    let controller = env.controller().await;
    fill_everything(&controller, "abcd1234").await;

    let first = tokio::time::timeout(Duration::from_millis(50), controller.create_account()).await;
    assert!(first.is_err());
    assert!(!controller.view_state().await.is_submitting);

    // Lets the next register call through.
    gate.notify_one();
    let user = controller.create_account().await.unwrap();

    assert_eq!(user.map(|u| u.id).as_deref(), Some("user-42"));
    assert_eq!(env.auth.register_calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.current_step().await, OnboardingStep::Completion);
    assert_eq!(env.flow.current(), AppRoute::Home);
}

#[tokio::test]
async fn reset_is_allowed_after_an_abandoned_submission() {
    let gate = Arc::new(Notify::new());
    let env = Env::in_memory(GatedAuth::gated(gate));
    let controller = env.controller().await;
    fill_everything(&controller, "abcd1234").await;

    let attempt = tokio::time::timeout(Duration::from_millis(50), controller.create_account()).await;
    assert!(attempt.is_err());

    controller.reset().await.unwrap();

    assert_eq!(controller.current_step().await, OnboardingStep::Welcome);
    assert!(controller.view_state().await.draft.is_blank());
}

#[tokio::test(start_paused = true)]
async fn typing_burst_validates_once_with_final_value() {
    let env = Env::in_memory(GatedAuth::succeeding());
    let controller = env.controller().await;

    for partial in ["a", "ann@", "ann@example"] {
        controller.set_email(partial).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    controller.set_email("ann@example.com").await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(
        *env.events.validations.lock().unwrap(),
        vec![(FieldKind::Email, FieldValidationState::Valid)]
    );
    assert_eq!(
        controller.view_state().await.validation.get(&FieldKind::Email),
        Some(&FieldValidationState::Valid)
    );
}

#[tokio::test]
async fn draft_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();
    let env = Env::new(
        Arc::new(FileKeyValueStore::with_defaults(dir.path())),
        GatedAuth::succeeding(),
    );
    {
        let controller = env.controller().await;
        fill_profile(&controller).await;
        controller.toggle_goal(HealthGoal::LoseWeight).await.unwrap();
        controller.set_password("abcd1234").await.unwrap();
        controller.go_to_step(OnboardingStep::Goals).await;
    }

    let restored = env.controller().await;
    let view = restored.view_state().await;

    assert_eq!(view.step, OnboardingStep::Goals);
    assert_eq!(view.draft.first_name, "Ann");
    assert_eq!(view.draft.biological_sex, BiologicalSex::Female);
    assert!(view.draft.selected_goals.contains(&HealthGoal::LoseWeight));
    assert_eq!(view.draft.password, "abcd1234");
    assert!(view.can_continue);
}

#[tokio::test]
async fn completion_routes_home_and_locks_the_draft() {
    let dir = TempDir::new().unwrap();
    let env = Env::new(
        Arc::new(FileKeyValueStore::with_defaults(dir.path())),
        GatedAuth::succeeding(),
    );
    let controller = env.controller().await;
    let mut route = env.flow.subscribe();
    fill_everything(&controller, "abcd1234").await;

    controller.create_account().await.unwrap();

    route.changed().await.unwrap();
    assert_eq!(*route.borrow(), AppRoute::Home);
    assert_eq!(
        env.secure.get(ACCESS_TOKEN_KEY).unwrap(),
        Some(b"token-xyz".to_vec())
    );
    assert!(matches!(
        controller.set_email("bob@example.com").await,
        Err(OnboardingError::AlreadyCompleted)
    ));
    assert_eq!(
        env.events.steps.lock().unwrap().last(),
        Some(&OnboardingStep::Completion)
    );

    let relaunched = env.controller().await;
    assert_eq!(relaunched.current_step().await, OnboardingStep::Completion);
    assert!(relaunched.view_state().await.draft.first_name.is_empty());
}

#[tokio::test]
async fn health_access_failure_does_not_block() {
    let env = Env::in_memory(GatedAuth::succeeding());
    let controller = env.controller().await;
    controller
        .go_to_step(OnboardingStep::HealthDataPermission)
        .await;

    controller.request_health_access().await.unwrap();

    assert!(controller.can_continue().await);
    assert_eq!(
        controller.next_step().await,
        OnboardingStep::BiometricSetup
    );
}

#[tokio::test]
async fn reset_starts_over() {
    let env = Env::in_memory(GatedAuth::succeeding());
    let controller = env.controller().await;
    fill_everything(&controller, "abcd1234").await;
    controller.create_account().await.unwrap();

    controller.reset().await.unwrap();

    let relaunched = env.controller().await;
    let view = relaunched.view_state().await;
    assert_eq!(view.step, OnboardingStep::Welcome);
    assert!(view.draft.is_blank());
    relaunched.set_first_name("Ann").await.unwrap();
}
