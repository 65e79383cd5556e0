//! Grouping of classified jobs into status sections.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{BackupJob, EmailIndex};
use crate::status::{classify_job, Status};

/// Jobs sharing one canonical status.
#[derive(Debug, Clone, Serialize)]
pub struct StatusGroup {
    pub status: Status,
    pub jobs: Vec<BackupJob>,
}

/// Groups jobs by canonical status.
///
/// Sections come out as Success, Warning, Error, then any other status.
/// Empty sections are omitted; jobs keep their input order inside a section.
pub fn group_by_status(jobs: &[BackupJob], index: &EmailIndex<'_>) -> Vec<StatusGroup> {
    // `Status` orders Success < Warning < Error < Pending < Unknown.
    let mut groups: BTreeMap<Status, Vec<BackupJob>> = BTreeMap::new();
    for job in jobs {
        let status = classify_job(job, index.processed_of(job));
        groups.entry(status).or_default().push(job.clone());
    }

    groups
        .into_iter()
        .map(|(status, jobs)| StatusGroup { status, jobs })
        .collect()
}
