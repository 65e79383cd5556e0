use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub version: String,
    pub api_base_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_poll_interval() -> u64 {
    60
}

/// Optional classification rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Treat an email as Warning when any of its jobs has "retry" in the
    /// job or host name. Off unless explicitly enabled.
    #[serde(default)]
    pub retry_heuristic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Upper bound on emails whose nested lists are fetched concurrently.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_concurrent_requests() -> usize {
    8
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

impl DashboardConfig {
    /// A config pointing at `api_base_url` with every other field defaulted.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            version: "1.0".to_string(),
            api_base_url: api_base_url.into(),
            poll_interval_secs: default_poll_interval(),
            classification: ClassificationConfig::default(),
            http: HttpConfig::default(),
        }
    }
}
