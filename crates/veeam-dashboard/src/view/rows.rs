//! Presentation-ready row values.

use serde::Serialize;

use crate::model::dates::{display_date, parse_time_of_day};
use crate::model::{BackupJob, Email, EmailIndex, JobSource};
use crate::status::{classify_email, classify_job, ClassificationRules, Status};

const MISSING: &str = "-";

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub job_id: Option<i64>,
    pub email_id: Option<i64>,
    pub device_name: String,
    /// `dd/mm/yyyy` of the owning email, or "-".
    pub date: String,
    /// `HH:MM`, or "-".
    pub time: String,
    pub status: Status,
    pub status_label: &'static str,
    pub total_size: String,
    pub duration: String,
    pub source: JobSource,
}

fn or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

impl DisplayRow {
    pub fn from_job(job: &BackupJob, index: &EmailIndex<'_>) -> Self {
        let owner = index.owner_of(job);
        let status = classify_job(job, index.processed_of(job));

        let date = match owner {
            Some(email) => match email.calendar_date() {
                Some(d) => display_date(d),
                None => or_missing(email.date.as_deref()),
            },
            None => MISSING.to_string(),
        };

        let time = job
            .start_time
            .as_deref()
            .and_then(parse_time_of_day)
            .or_else(|| owner.and_then(|email| email.sent_time_of_day()))
            .map_or_else(|| MISSING.to_string(), |t| t.format("%H:%M").to_string());

        Self {
            job_id: job.id,
            email_id: job.email_id,
            device_name: job.display_name().unwrap_or("N/A").to_string(),
            date,
            time,
            status,
            status_label: status.label(),
            total_size: or_missing(job.total_size.as_deref()),
            duration: or_missing(job.duration.as_deref()),
            source: job.source,
        }
    }
}

/// Badge text of the email table. Anything neither warned nor processed
/// shows as pending.
pub fn email_badge(status: Status) -> &'static str {
    match status {
        Status::Warning => "Aviso",
        Status::Success => "Processado",
        Status::Pending | Status::Error | Status::Unknown => "Pendente",
    }
}

/// One line of the email table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRow {
    pub id: Option<i64>,
    pub subject: String,
    /// `dd/mm/yyyy HH:MM`, the date alone when no time was sent, or "-".
    pub sent_at: String,
    pub status: Status,
    pub badge: &'static str,
}

impl EmailRow {
    pub fn from_email(email: &Email, rules: ClassificationRules) -> Self {
        let status = classify_email(email, rules);

        let sent_at = match (email.calendar_date(), email.sent_time_of_day()) {
            (Some(date), Some(time)) => format!("{} {}", display_date(date), time.format("%H:%M")),
            (Some(date), None) => display_date(date),
            (None, _) => MISSING.to_string(),
        };

        Self {
            id: email.id,
            subject: email
                .subject
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("Sem assunto")
                .to_string(),
            sent_at,
            status,
            badge: email_badge(status),
        }
    }
}
