/// Onboarding completion status persisted across app restarts.
///
/// 引导流程持久化状态。
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct OnboardingStatus {
    pub has_completed: bool,
}
