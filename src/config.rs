use std::path::PathBuf;
use std::time::Duration;

/// Set to "false" to skip the minimum supported version check
pub const VERSION_CHECK_ENV: &str = "LIVE_LOGS_VERSION_CHECK";
pub const SERVERS_FILE_ENV: &str = "LIVE_LOGS_SERVERS_FILE";
pub const REQUEST_TIMEOUT_ENV: &str = "LIVE_LOGS_REQUEST_TIMEOUT_SECS";
pub const LOG_REQUEST_TIMEOUT_ENV: &str = "LIVE_LOGS_LOG_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Log buffers can be large, so data requests get more time
pub const DEFAULT_LOG_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_secs(1);

/// Runtime settings for live-logs
#[derive(Clone, Debug)]
pub struct Settings {
    /// Whether adapters check the remote product's minimum version
    pub version_check: bool,
    /// Timeout for config and version requests
    pub request_timeout: Duration,
    /// Timeout for log data requests
    pub log_request_timeout: Duration,
    /// TOML file holding the server profiles
    pub servers_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version_check: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            log_request_timeout: DEFAULT_LOG_REQUEST_TIMEOUT,
            servers_file: default_servers_file(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let version_check = version_check_from(std::env::var(VERSION_CHECK_ENV).ok().as_deref());

        let request_timeout = secs_from_env(REQUEST_TIMEOUT_ENV).unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let log_request_timeout =
            secs_from_env(LOG_REQUEST_TIMEOUT_ENV).unwrap_or(DEFAULT_LOG_REQUEST_TIMEOUT);

        let servers_file = std::env::var(SERVERS_FILE_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_servers_file);

        Self {
            version_check,
            request_timeout,
            log_request_timeout,
            servers_file,
        }
    }
}

/// Only an explicit "false" disables the version check.
pub fn version_check_from(value: Option<&str>) -> bool {
    !matches!(value.map(str::trim), Some("false"))
}

fn secs_from_env(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn default_servers_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("live-logs")
        .join("servers.toml")
}
