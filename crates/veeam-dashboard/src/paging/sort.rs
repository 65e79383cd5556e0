use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};

use crate::model::dates::parse_time_of_day;
use crate::model::{BackupJob, EmailIndex};

/// Sort key: owning email's date, then the job's start time (falling back
/// to the email's sent time).
fn sort_key(job: &BackupJob, index: &EmailIndex<'_>) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let email = index.owner_of(job)?;
    let date = email.calendar_date()?;
    let time = job
        .start_time
        .as_deref()
        .and_then(parse_time_of_day)
        .or_else(|| email.sent_time_of_day());
    Some((date, time))
}

/// Newest first. Jobs with no resolvable date go last; ties keep their
/// input order.
pub fn sort_descending(jobs: &[BackupJob], index: &EmailIndex<'_>) -> Vec<BackupJob> {
    let mut keyed: Vec<_> = jobs
        .iter()
        .map(|job| (sort_key(job, index), job))
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, job)| job.clone()).collect()
}
