//! Headless entry point: wire everything, load the onboarding controller and
//! report where the user would land.

use hp_app::{AppRoute, OnboardingFlowController};
use hp_core::config::AppConfig;
use tracing::{info, info_span, Instrument};

use super::wiring::wire_dependencies;

pub async fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let span = info_span!("app.run", data_dir = %config.data_dir.display());
    async move {
        let services = wire_dependencies(&config).await?;
        let route = services.flow.current();
        info!(?route, "HealthPath started");

        if route == AppRoute::Onboarding {
            let controller = OnboardingFlowController::load(services.onboarding).await?;
            let view = controller.view_state().await;
            println!("{}", serde_json::to_string_pretty(&view)?);
        } else {
            println!("{}", serde_json::to_string(&route)?);
        }
        Ok(())
    }
    .instrument(span)
    .await
}
