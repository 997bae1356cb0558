/// Core logging implementation with automatic filtering
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Debug requires --debug <tag> (or global --verbose)
/// 3. Verbose requires --verbose or --verbose-tags <tag>
/// 4. Anything else must be within the minimum level threshold
/// 5. If enabled_tags is non-empty, the tag must be in the set
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    let config = get_logger_config();

    let level_allowed = match level {
        LogLevel::Debug => is_debug_enabled_for_tag(tag),
        LogLevel::Verbose => {
            config.min_level == LogLevel::Verbose || is_verbose_enabled_for_tag(tag)
        }
        _ => level <= config.min_level,
    };
    if !level_allowed {
        return false;
    }

    config.enabled_tags.is_empty() || config.enabled_tags.contains(&tag.to_debug_key())
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
