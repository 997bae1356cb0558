/// Command-line interface
///
/// Every flag, logging ones included, is declared here so clap rejects
/// unknown flags and bad values instead of silently falling back to defaults.
use crate::config::CONFIG_FILE_PATH;
use crate::logger::{LogLevel, LogTag, LoggerConfig};
use clap::Parser;

/// Accepted by `--debug` and `--verbose-tags` in place of a tag name
pub const ALL_TAGS: &str = "all";

/// Live dashboard backend for a Bitcoin Core full node
///
/// Log tags: system, config, rpc, aggregator, cache, broadcast, webserver.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "nodepulse", version, about)]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = CONFIG_FILE_PATH)]
    pub config: String,

    /// Override [webserver] host
    #[arg(long, value_parser = parse_host)]
    pub host: Option<String>,

    /// Override [webserver] port
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Probe the node once and exit
    #[arg(long)]
    pub check: bool,

    /// Only show warnings and errors
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show verbose output for every tag
    #[arg(long)]
    pub verbose: bool,

    /// Minimum level: error, warning, info, debug, verbose
    #[arg(long, value_parser = parse_level)]
    pub log_level: Option<LogLevel>,

    /// Only show these tags (comma-separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_tag)]
    pub log_tags: Vec<String>,

    /// Also append log lines to this file
    #[arg(long)]
    pub log_file: Option<String>,

    /// Enable debug output for these tags, or `all`
    #[arg(long, value_delimiter = ',', value_parser = parse_tag_or_all)]
    pub debug: Vec<String>,

    /// Enable verbose output for these tags, or `all`
    #[arg(long, value_delimiter = ',', value_parser = parse_tag_or_all)]
    pub verbose_tags: Vec<String>,
}

impl Args {
    /// Logger settings selected on the command line
    pub fn logger_config(&self) -> LoggerConfig {
        let mut config = LoggerConfig::default();

        if self.quiet {
            config.min_level = LogLevel::Warning;
        }
        if self.verbose {
            config.min_level = LogLevel::Verbose;
        }
        if let Some(level) = self.log_level {
            config.min_level = level;
        }

        config.debug_tags = expand_tags(&self.debug);
        config.verbose_tags = expand_tags(&self.verbose_tags);
        config.enabled_tags = self.log_tags.iter().cloned().collect();
        config.file_path = self.log_file.clone();

        config
    }
}

fn expand_tags(selected: &[String]) -> std::collections::HashSet<String> {
    if selected.iter().any(|t| t == ALL_TAGS) {
        LogTag::all().iter().map(LogTag::to_debug_key).collect()
    } else {
        selected.iter().cloned().collect()
    }
}

fn parse_host(value: &str) -> Result<String, String> {
    let host = value.trim();
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(format!("invalid host '{}'", value));
    }
    Ok(host.to_string())
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| {
        format!(
            "unknown level '{}' (expected error, warning, info, debug or verbose)",
            value
        )
    })
}

fn parse_tag(value: &str) -> Result<String, String> {
    LogTag::from_debug_key(value)
        .map(|tag| tag.to_debug_key())
        .ok_or_else(|| format!("unknown log tag '{}'", value))
}

fn parse_tag_or_all(value: &str) -> Result<String, String> {
    if value.trim().eq_ignore_ascii_case(ALL_TAGS) {
        return Ok(ALL_TAGS.to_string());
    }
    parse_tag(value)
}
