use crate::webserver::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub mod dashboard;
pub mod node;
pub mod ws;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws/dashboard", get(ws::dashboard_ws))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(dashboard::routes())
        .merge(node::routes())
}
