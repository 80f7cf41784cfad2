//! App-level routing.
//!
//! [`AppFlow`] owns the top-level route and publishes it through a
//! `tokio::sync::watch` channel; the shell subscribes and swaps screens.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

use hp_core::ports::{get_json, set_json, FlowManagerPort, KeyValueStorePort};

pub const LAST_KNOWN_EMAIL_KEY: &str = "auth.last_known_email";

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    Onboarding,
    Authentication,
    Home,
}

pub struct AppFlow {
    route: watch::Sender<AppRoute>,
    store: Arc<dyn KeyValueStorePort>,
}

impl AppFlow {
    pub fn new(store: Arc<dyn KeyValueStorePort>, initial: AppRoute) -> Self {
        let (route, _) = watch::channel(initial);
        Self { route, store }
    }

    /// Route for a cold start.
    pub fn initial_route(onboarding_completed: bool, has_access_token: bool) -> AppRoute {
        match (onboarding_completed, has_access_token) {
            (false, _) => AppRoute::Onboarding,
            (true, true) => AppRoute::Home,
            (true, false) => AppRoute::Authentication,
        }
    }

    pub fn current(&self) -> AppRoute {
        *self.route.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppRoute> {
        self.route.subscribe()
    }

    fn go(&self, to: AppRoute) {
        let from = self.route.send_replace(to);
        if from != to {
            info!(?from, ?to, "app route changed");
        }
    }
}

#[async_trait]
impl FlowManagerPort for AppFlow {
    async fn complete_onboarding(&self) -> anyhow::Result<()> {
        self.go(AppRoute::Home);
        Ok(())
    }

    async fn start_authentication(&self) -> anyhow::Result<()> {
        self.go(AppRoute::Authentication);
        Ok(())
    }

    async fn finish_authentication(&self) -> anyhow::Result<()> {
        self.go(AppRoute::Home);
        Ok(())
    }

    async fn last_known_email(&self) -> anyhow::Result<Option<String>> {
        get_json(self.store.as_ref(), LAST_KNOWN_EMAIL_KEY).await
    }

    async fn set_last_known_email(&self, email: &str) -> anyhow::Result<()> {
        set_json(self.store.as_ref(), LAST_KNOWN_EMAIL_KEY, email).await
    }
}
