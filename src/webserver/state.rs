/// Shared application state for the webserver
use crate::{
    broadcast::SubscriberRegistry, config::DashboardConfig, dashboard::DashboardService,
    rpc::RpcGateway,
};
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Cached snapshot access
    pub dashboard: DashboardService,

    /// Live push subscribers
    pub registry: Arc<SubscriberRegistry>,

    /// Dashboard settings exposed to the frontend
    pub dashboard_config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(
        dashboard: DashboardService,
        registry: Arc<SubscriberRegistry>,
        dashboard_config: DashboardConfig,
    ) -> Self {
        Self {
            dashboard,
            registry,
            dashboard_config: Arc::new(dashboard_config),
        }
    }

    /// Gateway for uncached pass-through calls
    pub fn gateway(&self) -> &RpcGateway {
        self.dashboard.aggregator().gateway()
    }
}
