//! Job → email resolution over one snapshot.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{BackupJob, Email, Processed};

/// Borrowed lookup of emails by id.
///
/// A job whose `email_id` is missing or not in the snapshot resolves to
/// nothing: its date is absent and its owner flag is `Unknown`.
pub struct EmailIndex<'a> {
    by_id: HashMap<i64, &'a Email>,
}

impl<'a> EmailIndex<'a> {
    pub fn new(emails: &'a [Email]) -> Self {
        let by_id = emails
            .iter()
            .filter_map(|email| email.id.map(|id| (id, email)))
            .collect();
        Self { by_id }
    }

    pub fn get(&self, email_id: Option<i64>) -> Option<&'a Email> {
        email_id.and_then(|id| self.by_id.get(&id).copied())
    }

    pub fn owner_of(&self, job: &BackupJob) -> Option<&'a Email> {
        self.get(job.email_id)
    }

    pub fn processed_of(&self, job: &BackupJob) -> Processed {
        self.owner_of(job)
            .map_or(Processed::Unknown, |email| email.is_processed)
    }

    pub fn date_of(&self, job: &BackupJob) -> Option<NaiveDate> {
        self.owner_of(job).and_then(Email::calendar_date)
    }

    /// The owning email's date as `YYYY-MM-DD`.
    pub fn iso_date_of(&self, job: &BackupJob) -> Option<String> {
        self.date_of(job).map(|d| d.format("%Y-%m-%d").to_string())
    }
}
