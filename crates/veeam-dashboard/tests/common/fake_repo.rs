//! In-memory repository for fetch tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use veeam_dashboard::repository::BackupRepository;
use veeam_dashboard::FetchError;

/// Serves canned JSON lists. A route that was never configured answers
/// with an empty list; a route marked failing answers with HTTP 500.
#[derive(Default)]
pub struct FakeRepository {
    emails: Option<Vec<Value>>,
    host_records: HashMap<i64, Option<Vec<Value>>>,
    jobs: HashMap<i64, Option<Vec<Value>>>,
    vms: HashMap<i64, Option<Vec<Value>>>,
    config_backups: HashMap<i64, Option<Vec<Value>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

fn answer(route: &str, entry: Option<&Option<Vec<Value>>>) -> Result<Vec<Value>, FetchError> {
    match entry {
        None => Ok(Vec::new()),
        Some(Some(values)) => Ok(values.clone()),
        Some(None) => Err(FetchError::Status {
            url: format!("fake://{}", route),
            status: 500,
        }),
    }
}

impl FakeRepository {
    pub fn new(emails: Vec<Value>) -> Self {
        Self {
            emails: Some(emails),
            ..Default::default()
        }
    }

    /// A repository whose email listing fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_jobs(mut self, email_id: i64, jobs: Vec<Value>) -> Self {
        self.jobs.insert(email_id, Some(jobs));
        self
    }

    pub fn failing_jobs(mut self, email_id: i64) -> Self {
        self.jobs.insert(email_id, None);
        self
    }

    pub fn with_host_records(mut self, email_id: i64, rows: Vec<Value>) -> Self {
        self.host_records.insert(email_id, Some(rows));
        self
    }

    pub fn with_config_backups(mut self, email_id: i64, rows: Vec<Value>) -> Self {
        self.config_backups.insert(email_id, Some(rows));
        self
    }

    pub fn failing_config_backups(mut self, email_id: i64) -> Self {
        self.config_backups.insert(email_id, None);
        self
    }

    pub fn with_vms(mut self, job_id: i64, rows: Vec<Value>) -> Self {
        self.vms.insert(job_id, Some(rows));
        self
    }

    pub fn failing_vms(mut self, job_id: i64) -> Self {
        self.vms.insert(job_id, None);
        self
    }

    /// Number of requests served so far, the email listing included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of job listings that were pending at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BackupRepository for FakeRepository {
    async fn list_emails(&self) -> Result<Vec<Value>, FetchError> {
        self.hit();
        match &self.emails {
            Some(values) => Ok(values.clone()),
            None => Err(FetchError::Status {
                url: "fake://emails".to_string(),
                status: 503,
            }),
        }
    }

    async fn list_host_records_by_email(&self, email_id: i64) -> Result<Vec<Value>, FetchError> {
        self.hit();
        answer("email-data", self.host_records.get(&email_id))
    }

    async fn list_backup_jobs_by_email(&self, email_id: i64) -> Result<Vec<Value>, FetchError> {
        self.hit();
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        // Let the other pending listings start before this one answers.
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        answer("backup-jobs", self.jobs.get(&email_id))
    }

    async fn list_vms_by_job(&self, job_id: i64) -> Result<Vec<Value>, FetchError> {
        self.hit();
        answer("backup-vms", self.vms.get(&job_id))
    }

    async fn list_config_backups_by_email(
        &self,
        email_id: i64,
    ) -> Result<Vec<Value>, FetchError> {
        self.hit();
        answer("config-backups", self.config_backups.get(&email_id))
    }
}
