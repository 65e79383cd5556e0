use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Errors from the reporting API.
///
/// Only a failed email listing reaches the caller; per-email sub-fetches
/// log these and continue with an empty list.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("Request to '{url}' failed with status {status}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or timeout failure.
    #[error("Transport error for '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not the JSON array we expected.
    #[error("Failed to decode response from '{url}': {reason}")]
    Decode { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
