/// Log tags identify which component produced a line
///
/// The debug key of a tag is what `--debug`, `--verbose-tags` and
/// `--log-tags` accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Rpc,
    Aggregator,
    Cache,
    Broadcast,
    Webserver,
}

impl LogTag {
    /// Key used for command-line flags and tag filtering
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system",
            LogTag::Config => "config",
            LogTag::Rpc => "rpc",
            LogTag::Aggregator => "aggregator",
            LogTag::Cache => "cache",
            LogTag::Broadcast => "broadcast",
            LogTag::Webserver => "webserver",
        }
        .to_string()
    }

    pub fn from_debug_key(key: &str) -> Option<LogTag> {
        let key = key.trim().to_lowercase();
        LogTag::all()
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key)
    }

    /// Upper-case label used in console and file output
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Rpc => "RPC",
            LogTag::Aggregator => "AGGREGATE",
            LogTag::Cache => "CACHE",
            LogTag::Broadcast => "BROADCAST",
            LogTag::Webserver => "WEBSERVER",
        }
    }

    pub fn all() -> &'static [LogTag] {
        &[
            LogTag::System,
            LogTag::Config,
            LogTag::Rpc,
            LogTag::Aggregator,
            LogTag::Cache,
            LogTag::Broadcast,
            LogTag::Webserver,
        ]
    }
}
