//! One fetch cycle's worth of records.

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use super::BackupRepository;
use crate::aggregate::unify_jobs;
use crate::error::FetchError;
use crate::ingest::{self, EmbeddedLists};
use crate::model::{BackupJob, Email, EmailIndex, JobSource, VmEntry};

/// Sub-fetches in flight at once when no limit is configured.
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Immutable set of emails with their nested jobs, host rows and
/// configuration backups.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub emails: Vec<Email>,
    pub fetched_at: DateTime<Utc>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Snapshot {
    pub fn new(emails: Vec<Email>) -> Self {
        Self {
            emails,
            fetched_at: Utc::now(),
        }
    }

    /// Loads every email and its nested lists.
    ///
    /// Only a failed email listing is returned as an error. Any per-email
    /// sub-fetch that fails is logged and treated as an empty list.
    pub async fn fetch<R>(repo: &R) -> Result<Self, FetchError>
    where
        R: BackupRepository + ?Sized,
    {
        Self::fetch_with_limit(repo, DEFAULT_FETCH_CONCURRENCY).await
    }

    /// Like [`Snapshot::fetch`], completing at most `limit` emails at a
    /// time. Emails keep the order of the listing.
    pub async fn fetch_with_limit<R>(repo: &R, limit: usize) -> Result<Self, FetchError>
    where
        R: BackupRepository + ?Sized,
    {
        let raw = repo.list_emails().await?;
        let parsed = ingest::emails(&raw);

        let emails: Vec<Email> = stream::iter(parsed)
            .map(|(email, embedded)| complete_email(repo, email, embedded))
            .buffered(limit.max(1))
            .collect()
            .await;

        let snapshot = Self::new(emails);
        info!(
            "Fetched {} emails with {} jobs",
            snapshot.emails.len(),
            snapshot.jobs().len()
        );
        Ok(snapshot)
    }

    /// All native and configuration jobs, in email order.
    pub fn jobs(&self) -> Vec<BackupJob> {
        unify_jobs(&self.emails)
    }

    pub fn index(&self) -> EmailIndex<'_> {
        EmailIndex::new(&self.emails)
    }
}

/// Fills in whatever nested lists the email payload did not carry.
async fn complete_email<R>(repo: &R, mut email: Email, embedded: EmbeddedLists) -> Email
where
    R: BackupRepository + ?Sized,
{
    let Some(id) = email.id else {
        warn!("Email without id, skipping nested fetches");
        return email;
    };

    if !embedded.host_data {
        email.backup_data = or_empty(
            repo.list_host_records_by_email(id).await,
            ingest::host_records,
            "host records",
            id,
        );
    }
    if !embedded.jobs {
        email.backup_jobs = or_empty(
            repo.list_backup_jobs_by_email(id).await,
            ingest::jobs,
            "backup jobs",
            id,
        );
    }
    if !embedded.config_backups {
        email.config_backups = or_empty(
            repo.list_config_backups_by_email(id).await,
            ingest::config_backups,
            "config backups",
            id,
        );
    }

    email
}

fn or_empty<T>(
    result: Result<Vec<Value>, FetchError>,
    parse: fn(&[Value]) -> Vec<T>,
    what: &str,
    email_id: i64,
) -> Vec<T> {
    match result {
        Ok(values) => parse(&values),
        Err(e) => {
            warn!("Failed to fetch {} for email {}: {}", what, email_id, e);
            Vec::new()
        }
    }
}

/// A job with its VM rows, for the detail view.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    pub job: BackupJob,
    pub vms: Vec<VmEntry>,
}

/// Loads the VM rows of one job. Configuration backups have none; a failed
/// fetch yields an empty list.
pub async fn fetch_job_detail<R>(repo: &R, job: &BackupJob) -> JobDetail
where
    R: BackupRepository + ?Sized,
{
    let vms = match (job.source, job.id) {
        (JobSource::Vm, Some(id)) => match repo.list_vms_by_job(id).await {
            Ok(values) => ingest::vms(&values),
            Err(e) => {
                warn!("Failed to fetch VMs for job {}: {}", id, e);
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    JobDetail {
        job: job.clone(),
        vms,
    }
}
