mod server;

pub mod models;
pub mod routes;
pub mod state;
pub mod utils;
pub mod ws;

// Public API for starting the webserver
pub use server::{build_app, start_server};
pub use state::AppState;
