use std::path::{Path, PathBuf};

use crate::config::schema::DashboardConfig;
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Returns the canonical config path: `~/.veeam-dashboard/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".veeam-dashboard").join("config.json"))
}

fn validate_config(config: &DashboardConfig) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    let url = config.api_base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Validation {
            message: format!(
                "api_base_url must start with http:// or https://, got '{}'",
                config.api_base_url
            ),
        });
    }

    if config.poll_interval_secs == 0 {
        return Err(ConfigError::Validation {
            message: "poll_interval_secs must be greater than zero".to_string(),
        });
    }

    if config.http.connect_timeout_secs == 0 || config.http.request_timeout_secs == 0 {
        return Err(ConfigError::Validation {
            message: "HTTP timeouts must be greater than zero".to_string(),
        });
    }

    if config.http.max_concurrent_requests == 0 {
        return Err(ConfigError::Validation {
            message: "max_concurrent_requests must be greater than zero".to_string(),
        });
    }

    Ok(())
}
