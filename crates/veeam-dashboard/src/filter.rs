//! Conjunctive job filters: status counter, free-text search, date range.
//! Also the subject and day filter of the email table.
//!
//! The UI sends `""` for every control left empty; those deserialize to
//! "no filter".

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::model::{BackupJob, Email, EmailIndex};

/// Status filter over the raw summary counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Success,
    Warning,
    Error,
}

impl StatusFilter {
    /// Parses the UI value; the empty string means "no filter".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Some(StatusFilter::Success),
            "warning" => Some(StatusFilter::Warning),
            "error" => Some(StatusFilter::Error),
            _ => None,
        }
    }

    fn matches(&self, job: &BackupJob) -> bool {
        match self {
            StatusFilter::Success => job.summary_success > 0,
            StatusFilter::Warning => job.summary_warning > 0,
            StatusFilter::Error => job.summary_error > 0,
        }
    }
}

fn status_or_blank<'de, D>(deserializer: D) -> Result<Option<StatusFilter>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => StatusFilter::parse(value).map(Some).ok_or_else(|| {
            de::Error::unknown_variant(value, &["", "success", "warning", "error"])
        }),
    }
}

fn text_or_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// A date bound that is absent, empty or whitespace is no bound.
fn bound(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// User-selected filters. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub search_text: String,
    #[serde(default, deserialize_with = "status_or_blank")]
    pub status_filter: Option<StatusFilter>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "text_or_blank")]
    pub date_start: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "text_or_blank")]
    pub date_end: Option<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.status_filter.is_none()
            && bound(&self.date_start).is_none()
            && bound(&self.date_end).is_none()
    }

    pub fn matches(&self, job: &BackupJob, index: &EmailIndex<'_>) -> bool {
        if let Some(status) = &self.status_filter {
            if !status.matches(job) {
                return false;
            }
        }

        let needle = self.search_text.trim().to_lowercase();
        if !needle.is_empty() && !search_fields(job).any(|f| f.to_lowercase().contains(&needle)) {
            return false;
        }

        let (start, end) = (bound(&self.date_start), bound(&self.date_end));
        if start.is_some() || end.is_some() {
            let Some(date) = index.iso_date_of(job) else {
                return false;
            };
            if start.is_some_and(|start| date.as_str() < start) {
                return false;
            }
            if end.is_some_and(|end| date.as_str() > end) {
                return false;
            }
        }

        true
    }
}

fn search_fields(job: &BackupJob) -> impl Iterator<Item = &str> {
    [
        &job.job_name,
        &job.host,
        &job.status,
        &job.created_by,
        &job.created_at,
        &job.start_time,
        &job.end_time,
        &job.total_size,
        &job.duration,
    ]
    .into_iter()
    .filter_map(|field| field.as_deref())
}

/// Returns the jobs matching every predicate in `state`, in input order.
pub fn filter_jobs(jobs: &[BackupJob], state: &FilterState, index: &EmailIndex<'_>) -> Vec<BackupJob> {
    if state.is_empty() {
        return jobs.to_vec();
    }
    jobs.iter()
        .filter(|job| state.matches(job, index))
        .cloned()
        .collect()
}

/// Filter of the email table: subject search and one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailFilter {
    #[serde(default)]
    pub subject: String,
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "text_or_blank")]
    pub date: Option<String>,
}

impl EmailFilter {
    pub fn is_empty(&self) -> bool {
        self.subject.trim().is_empty() && bound(&self.date).is_none()
    }

    /// Case-insensitive subject match and, when a day is set, same
    /// calendar day. Emails without a parseable date fail a day filter.
    pub fn matches(&self, email: &Email) -> bool {
        let needle = self.subject.trim().to_lowercase();
        if !needle.is_empty()
            && !email
                .subject
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
        {
            return false;
        }

        match bound(&self.date) {
            Some(day) => email
                .calendar_date()
                .is_some_and(|d| d.format("%Y-%m-%d").to_string() == day),
            None => true,
        }
    }
}

/// Returns the emails matching `filter`, in input order.
pub fn filter_emails(emails: &[Email], filter: &EmailFilter) -> Vec<Email> {
    if filter.is_empty() {
        return emails.to_vec();
    }
    emails.iter().filter(|e| filter.matches(e)).cloned().collect()
}
