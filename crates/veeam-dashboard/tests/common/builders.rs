//! Builder patterns for creating report test data.

#![allow(dead_code)]

use veeam_dashboard::model::{BackupJob, ConfigBackup, Email, Processed};

/// Builder for `BackupJob` rows.
pub struct JobBuilder {
    job: BackupJob,
}

impl JobBuilder {
    pub fn new(id: i64, email_id: i64) -> Self {
        Self {
            job: BackupJob {
                id: Some(id),
                email_id: Some(email_id),
                job_name: Some(format!("Job {}", id)),
                ..Default::default()
            },
        }
    }

    /// A job with neither id nor email back-reference.
    pub fn unidentified() -> Self {
        Self {
            job: BackupJob::default(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.job.job_name = Some(name.to_string());
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.job.host = Some(host.to_string());
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.job.status = Some(status.to_string());
        self
    }

    /// Sets the success, warning and error counters.
    pub fn counters(mut self, success: u32, warning: u32, error: u32) -> Self {
        self.job.summary_success = success;
        self.job.summary_warning = warning;
        self.job.summary_error = error;
        self
    }

    pub fn start_time(mut self, start: &str) -> Self {
        self.job.start_time = Some(start.to_string());
        self
    }

    pub fn total_size(mut self, size: &str) -> Self {
        self.job.total_size = Some(size.to_string());
        self
    }

    pub fn build(self) -> BackupJob {
        self.job
    }
}

/// Builder for `Email` records with nested jobs.
pub struct EmailBuilder {
    email: Email,
}

impl EmailBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            email: Email {
                id: Some(id),
                subject: Some(format!("[Success] Backup report {}", id)),
                ..Default::default()
            },
        }
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.email.subject = Some(subject.to_string());
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.email.date = Some(date.to_string());
        self
    }

    pub fn sent_time(mut self, time: &str) -> Self {
        self.email.sent_time = Some(time.to_string());
        self
    }

    pub fn processed(mut self, processed: bool) -> Self {
        self.email.is_processed = Processed::from_bool(processed);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.email.status = Some(status.to_string());
        self
    }

    pub fn job(mut self, job: BackupJob) -> Self {
        self.email.backup_jobs.push(job);
        self
    }

    pub fn config_backup(mut self, id: i64, server: &str, status: &str) -> Self {
        let email_id = self.email.id;
        self.email.config_backups.push(ConfigBackup {
            id: Some(id),
            email_id,
            server: Some(server.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> Email {
        self.email
    }
}
