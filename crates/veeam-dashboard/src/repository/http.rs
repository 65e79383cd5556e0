//! REST implementation of [`BackupRepository`].

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use super::BackupRepository;
use crate::config::DashboardConfig;
use crate::error::FetchError;

/// Repository backed by the Flask reporting API.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

/// Creates an HTTP client with the configured timeouts.
fn create_http_client(config: &DashboardConfig) -> Result<Client, FetchError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.http.connect_timeout_secs))
        .timeout(Duration::from_secs(config.http.request_timeout_secs))
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

impl HttpRepository {
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: create_http_client(config)?,
            base_url: config.api_base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GETs `path` and expects a JSON array.
    async fn get_list(&self, path: &str) -> Result<Vec<Value>, FetchError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| FetchError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        match body {
            Value::Array(items) => Ok(items),
            other => Err(FetchError::Decode {
                url,
                reason: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl BackupRepository for HttpRepository {
    async fn list_emails(&self) -> Result<Vec<Value>, FetchError> {
        self.get_list("/api/emails/").await
    }

    async fn list_host_records_by_email(&self, email_id: i64) -> Result<Vec<Value>, FetchError> {
        self.get_list(&format!("/api/email-data/by-email/{}", email_id))
            .await
    }

    async fn list_backup_jobs_by_email(&self, email_id: i64) -> Result<Vec<Value>, FetchError> {
        self.get_list(&format!("/api/backup-jobs/by-email/{}", email_id))
            .await
    }

    async fn list_vms_by_job(&self, job_id: i64) -> Result<Vec<Value>, FetchError> {
        self.get_list(&format!("/api/backup-vms/by-job/{}", job_id))
            .await
    }

    async fn list_config_backups_by_email(
        &self,
        email_id: i64,
    ) -> Result<Vec<Value>, FetchError> {
        self.get_list(&format!("/api/config-backups/by-email/{}", email_id))
            .await
    }
}
