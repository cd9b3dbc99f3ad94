use axum::extract::FromRef;

use crate::dashboard_store::DashboardStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedDashboardStore = Arc<dyn DashboardStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub dashboard_store: GuardedDashboardStore,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, dashboard_store: GuardedDashboardStore) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            dashboard_store,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedDashboardStore {
    fn from_ref(input: &ServerState) -> Self {
        input.dashboard_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
