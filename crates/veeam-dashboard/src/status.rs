//! Canonical status derivation for jobs and emails.
//!
//! Both classifiers are pure: they read a record and return a [`Status`];
//! nothing is written back.

use serde::{Deserialize, Serialize};

use crate::config::ClassificationConfig;
use crate::model::{BackupJob, Email, Processed};

/// Canonical status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
    Error,
    Pending,
    Unknown,
}

impl Status {
    /// Portuguese label shown in tables and badges.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Success => "Sucesso",
            Status::Warning => "Aviso",
            Status::Error | Status::Unknown => "Falha",
            Status::Pending => "Pendente",
        }
    }

    /// Summary bucket a status is counted in.
    ///
    /// Pending emails count as warnings and unknown records as errors, so
    /// every record lands in exactly one of the three buckets.
    pub fn bucket(&self) -> Bucket {
        match self {
            Status::Success => Bucket::Success,
            Status::Warning | Status::Pending => Bucket::Warning,
            Status::Error | Status::Unknown => Bucket::Error,
        }
    }
}

/// The three counters of every summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Success,
    Warning,
    Error,
}

/// Optional rules layered on top of the base precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationRules {
    /// A job or host name containing "retry" marks its email as Warning.
    pub retry_heuristic: bool,
}

impl From<&ClassificationConfig> for ClassificationRules {
    fn from(config: &ClassificationConfig) -> Self {
        Self {
            retry_heuristic: config.retry_heuristic,
        }
    }
}

fn eq_ignore_case(value: Option<&str>, expected: &str) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case(expected))
}

/// Classifies a job. `owner` is the processing flag of the job's email,
/// `Processed::Unknown` when the email could not be resolved.
///
/// Precedence, first match wins:
/// 1. error counter > 0 → Error
/// 2. status "warning" or warning counter > 0 → Warning
/// 3. status "success" → Success
/// 4. fallback on the owner flag: processed → Success, not processed →
///    Warning, unknown → Error
///
/// A job with neither an id nor an owning email is `Unknown` unless rule 1
/// already fired.
pub fn classify_job(job: &BackupJob, owner: Processed) -> Status {
    if job.summary_error > 0 {
        return Status::Error;
    }

    if job.is_unidentified() {
        return Status::Unknown;
    }

    let status = job.status.as_deref();
    if eq_ignore_case(status, "warning") || job.summary_warning > 0 {
        return Status::Warning;
    }

    if eq_ignore_case(status, "success") {
        return Status::Success;
    }

    match owner {
        Processed::Yes => Status::Success,
        Processed::No => Status::Warning,
        Processed::Unknown => Status::Error,
    }
}

/// Returns true when any of the email's jobs mentions a retry in its name.
pub fn has_retry_job(email: &Email) -> bool {
    email.backup_jobs.iter().any(|job| {
        job.display_name()
            .is_some_and(|name| name.to_lowercase().contains("retry"))
    })
}

/// Classifies an email for dashboard counters and the daily chart.
///
/// 1. status "warning" → Warning
/// 2. retry heuristic (only when enabled) → Warning
/// 3. processed → Success
/// 4. not processed → Pending
/// 5. otherwise → Error
///
/// An email without an id is `Unknown`.
pub fn classify_email(email: &Email, rules: ClassificationRules) -> Status {
    if email.id.is_none() {
        return Status::Unknown;
    }

    if eq_ignore_case(email.status.as_deref(), "warning") {
        return Status::Warning;
    }

    if rules.retry_heuristic && has_retry_job(email) {
        return Status::Warning;
    }

    match email.is_processed {
        Processed::Yes => Status::Success,
        Processed::No => Status::Pending,
        Processed::Unknown => Status::Error,
    }
}
