/// Configuration utilities - loading and validation
use super::schemas::{Config, DashboardConfig, RpcConfig, WebserverConfig};
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "config.toml";

pub const MIN_POLLING_INTERVAL_SECS: u64 = 1;
pub const MAX_POLLING_INTERVAL_SECS: u64 = 300;

/// Load and validate configuration from a TOML file
///
/// A missing file yields the defaults (which still have to validate, so the
/// RPC credentials must then come from somewhere else).
pub fn load_config_from_path(path: &str) -> Result<Config, ConfigError> {
    let config = if Path::new(path).exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        parse_config(path, &contents)?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path),
        );
        Config::default()
    };

    config.validate()?;
    Ok(config)
}

/// Parse configuration text without validating it
///
/// Unknown sections and keys are reported as warnings and otherwise ignored.
pub fn parse_config(path: &str, contents: &str) -> Result<Config, ConfigError> {
    let config = toml::from_str::<Config>(contents).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    for key in unknown_keys(contents) {
        logger::warning(
            LogTag::Config,
            &format!("Ignoring unknown key '{}' in '{}'", key, path),
        );
    }

    Ok(config)
}

/// Dotted paths of keys no config struct declares
fn unknown_keys(contents: &str) -> Vec<String> {
    let Ok(table) = contents.parse::<toml::Table>() else {
        return Vec::new();
    };

    let mut unknown = Vec::new();
    for (section, value) in &table {
        let known = match section.as_str() {
            "rpc" => RpcConfig::FIELD_NAMES,
            "dashboard" => DashboardConfig::FIELD_NAMES,
            "webserver" => WebserverConfig::FIELD_NAMES,
            _ => {
                unknown.push(section.clone());
                continue;
            }
        };
        if let Some(keys) = value.as_table() {
            unknown.extend(
                keys.keys()
                    .filter(|k| !known.contains(&k.as_str()))
                    .map(|k| format!("{}.{}", section, k)),
            );
        }
    }
    unknown
}

impl Config {
    /// Check every constraint and report all violations at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut violations = Vec::new();

        let rpc = &self.rpc;
        if rpc.scheme != "http" && rpc.scheme != "https" {
            violations.push(format!("rpc.scheme must be 'http' or 'https', got '{}'", rpc.scheme));
        }
        if rpc.host.trim().is_empty() {
            violations.push("rpc.host must not be blank".to_string());
        }
        if rpc.port == 0 {
            violations.push("rpc.port must be between 1 and 65535".to_string());
        }
        if rpc.user.trim().is_empty() {
            violations.push("rpc.user must not be blank".to_string());
        }
        if rpc.password.trim().is_empty() {
            violations.push("rpc.password must not be blank".to_string());
        }
        if rpc.timeout_ms == 0 {
            violations.push("rpc.timeout_ms must be greater than 0".to_string());
        }
        if url::Url::parse(&rpc.endpoint()).is_err() {
            violations.push(format!("rpc endpoint '{}' is not a valid URL", rpc.endpoint()));
        }

        let dashboard = &self.dashboard;
        if !(MIN_POLLING_INTERVAL_SECS..=MAX_POLLING_INTERVAL_SECS)
            .contains(&dashboard.polling_interval_secs)
        {
            violations.push(format!(
                "dashboard.polling_interval_secs must be between {} and {}, got {}",
                MIN_POLLING_INTERVAL_SECS, MAX_POLLING_INTERVAL_SECS, dashboard.polling_interval_secs
            ));
        }
        if dashboard.cache_validity_buffer_ms >= dashboard.polling_interval_ms() {
            violations.push(format!(
                "dashboard.cache_validity_buffer_ms ({}) must be less than the polling interval ({} ms)",
                dashboard.cache_validity_buffer_ms,
                dashboard.polling_interval_ms()
            ));
        }
        if dashboard.cache_max_items == 0 {
            violations.push("dashboard.cache_max_items must be at least 1".to_string());
        }
        if dashboard.min_outbound_peers == 0 {
            violations.push("dashboard.min_outbound_peers must be at least 1".to_string());
        }
        if dashboard.max_sessions == 0 {
            violations.push("dashboard.max_sessions must be at least 1".to_string());
        }

        if self.webserver.host.trim().is_empty() {
            violations.push("webserver.host must not be blank".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(violations))
        }
    }
}
