//! App-level routing port.
//!
//! The onboarding flow does not navigate by itself. When it finishes it tells
//! the flow manager, which decides what the app shows next.

use async_trait::async_trait;

#[async_trait]
pub trait FlowManagerPort: Send + Sync {
    /// Onboarding finished; leave the onboarding flow.
    async fn complete_onboarding(&self) -> anyhow::Result<()>;

    /// Route to the sign-in screen.
    async fn start_authentication(&self) -> anyhow::Result<()>;

    /// Sign-in succeeded; route to the main app.
    async fn finish_authentication(&self) -> anyhow::Result<()>;

    /// Email of the most recent successful sign-in, used to prefill login.
    async fn last_known_email(&self) -> anyhow::Result<Option<String>>;

    async fn set_last_known_email(&self, email: &str) -> anyhow::Result<()>;
}
