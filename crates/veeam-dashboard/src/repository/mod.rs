//! Access to the backup-reporting API.
//!
//! A repository hands back raw JSON records; [`Snapshot::fetch`] normalizes
//! them through [`crate::ingest`] and assembles one immutable snapshot per
//! fetch cycle.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

pub mod http;
pub mod snapshot;

pub use http::HttpRepository;
pub use snapshot::{fetch_job_detail, JobDetail, Snapshot, DEFAULT_FETCH_CONCURRENCY};

/// Source of raw report records.
#[async_trait]
pub trait BackupRepository: Send + Sync {
    async fn list_emails(&self) -> Result<Vec<Value>, FetchError>;

    async fn list_host_records_by_email(&self, email_id: i64) -> Result<Vec<Value>, FetchError>;

    async fn list_backup_jobs_by_email(&self, email_id: i64) -> Result<Vec<Value>, FetchError>;

    async fn list_vms_by_job(&self, job_id: i64) -> Result<Vec<Value>, FetchError>;

    async fn list_config_backups_by_email(
        &self,
        email_id: i64,
    ) -> Result<Vec<Value>, FetchError>;
}
