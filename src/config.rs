//! Client configuration.
//!
//! Defaults point at the public Rambot deployment; every field can be
//! overridden from the environment or through the builder setters.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::SystemError;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://ai-mindflicker.com/api/v1";

/// Default agent that serves runs
pub const DEFAULT_AGENT_ID: &str = "rambot";

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "RAMBOT_API_URL";
pub const ENV_AGENT_ID: &str = "RAMBOT_AGENT_ID";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "RAMBOT_CONNECT_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "RAMBOT_DATA_DIR";

/// Configuration for the agent client and the session store.
///
/// # Example
///
/// ```ignore
/// use rambot::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_api_url("http://localhost:8000/api/v1")
///     .with_agent_id("rambot-dev");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash
    pub api_url: String,
    /// Agent id used in the runs endpoint
    pub agent_id: String,
    /// Bound on establishing a connection; streams have no read timeout
    pub connect_timeout: Duration,
    /// Where the session store lives (None = platform data dir)
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            agent_id: DEFAULT_AGENT_ID.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. Trailing slashes are removed.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the agent id.
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = agent_id.into();
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the session store directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Create config from `RAMBOT_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults. An unparseable timeout
    /// is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_value(ENV_API_URL) {
            config = config.with_api_url(url);
        }
        if let Some(agent) = env_value(ENV_AGENT_ID) {
            config = config.with_agent_id(agent);
        }
        if let Some(raw) = env_value(ENV_CONNECT_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) => config = config.with_connect_timeout(Duration::from_secs(secs)),
                Err(_) => warn!(
                    value = %raw,
                    "Ignoring invalid {}", ENV_CONNECT_TIMEOUT_SECS
                ),
            }
        }
        if let Some(dir) = env_value(ENV_DATA_DIR) {
            config = config.with_data_dir(dir);
        }

        config
    }

    /// URL that opens a run for the configured agent
    pub fn runs_url(&self) -> String {
        format!("{}/agents/{}/runs", self.api_url, self.agent_id)
    }

    /// URL of a session's history
    pub fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/sessions/{}?type=agent",
            self.api_url,
            urlencoding::encode(session_id)
        )
    }

    /// Resolve the session store directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, SystemError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("rambot"))
                .ok_or(SystemError::NoDataDirectory),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
