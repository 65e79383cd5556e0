//! Report emails and the host rows parsed out of them.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::dates::{parse_calendar_date, parse_time_of_day};
use super::job::{BackupJob, ConfigBackup};

/// Tri-state processing flag of an email.
///
/// The API sends booleans, 0/1 integers, or nothing at all; anything that
/// is not clearly true or false is `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Processed {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Processed {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Processed::Yes
        } else {
            Processed::No
        }
    }
}

/// One report email with everything parsed out of it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Email {
    pub id: Option<i64>,
    pub subject: Option<String>,
    /// Calendar date as sent by the API (not yet normalized).
    pub date: Option<String>,
    pub sent_time: Option<String>,
    pub is_processed: Processed,
    pub processed_date: Option<String>,
    pub status: Option<String>,
    pub backup_jobs: Vec<BackupJob>,
    pub backup_data: Vec<HostRecord>,
    pub config_backups: Vec<ConfigBackup>,
}

impl Email {
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_calendar_date)
    }

    pub fn sent_time_of_day(&self) -> Option<NaiveTime> {
        self.sent_time.as_deref().and_then(parse_time_of_day)
    }

    /// Native jobs followed by the adapted configuration backups.
    pub fn all_jobs(&self) -> impl Iterator<Item = BackupJob> + '_ {
        self.backup_jobs
            .iter()
            .cloned()
            .chain(self.config_backups.iter().map(BackupJob::from))
    }
}

/// Per-host status line from the legacy `email_data` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub email_id: Option<i64>,
    pub host: Option<String>,
    pub ip: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}
