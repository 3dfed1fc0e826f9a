use std::path::PathBuf;
use std::time::Duration;

/// Default backend location (the development server).
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default cap on concurrent horoscope requests.
const DEFAULT_CONCURRENCY: usize = 4;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Maximum number of requests in flight during a batch run.
    pub concurrency: usize,
    /// Per-request timeout. `None` keeps the transport defaults.
    pub request_timeout: Option<Duration>,
    /// Directory export documents are written to.
    pub export_dir: PathBuf,
}

/// A configuration variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: None,
            export_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `PORTAL_API_URL`              | `http://localhost:8000` |
    /// | `PORTAL_CONCURRENCY`          | `4`                     |
    /// | `PORTAL_REQUEST_TIMEOUT_SECS` | unset (no timeout)      |
    /// | `PORTAL_EXPORT_DIR`           | `.`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("PORTAL_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("PORTAL_CONCURRENCY") {
            config.concurrency = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError {
                        var: "PORTAL_CONCURRENCY",
                        expected: "a positive integer",
                        value: raw,
                    })
                }
            };
        }

        if let Some(raw) = lookup("PORTAL_REQUEST_TIMEOUT_SECS") {
            let secs = match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError {
                        var: "PORTAL_REQUEST_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value: raw,
                    })
                }
            };
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(dir) = lookup("PORTAL_EXPORT_DIR").filter(|v| !v.trim().is_empty()) {
            config.export_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
