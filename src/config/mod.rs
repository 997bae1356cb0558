//! Configuration: TOML schemas with embedded defaults, loading and validation

pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, DashboardConfig, RpcConfig, WebserverConfig};
pub use utils::{load_config_from_path, parse_config, CONFIG_FILE_PATH};
