//! Seven-day stacked status chart.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::dates::display_date;
use crate::model::Email;
use crate::status::{classify_email, Bucket, ClassificationRules};

/// Number of calendar days in the trend chart, today included.
pub const CHART_DAYS: usize = 7;

/// Parallel series aligned to `labels` (oldest day first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub success: Vec<u32>,
    pub warning: Vec<u32>,
    pub error: Vec<u32>,
}

/// Buckets emails by calendar day over the window ending at `today`.
///
/// Emails dated outside the window, or with no parseable date, are skipped.
pub fn chart_series(emails: &[Email], today: NaiveDate, rules: ClassificationRules) -> ChartSeries {
    let days: Vec<NaiveDate> = (0..CHART_DAYS)
        .rev()
        .map(|back| today - Days::new(back as u64))
        .collect();

    let mut series = ChartSeries {
        labels: days.iter().map(|d| display_date(*d)).collect(),
        success: vec![0; CHART_DAYS],
        warning: vec![0; CHART_DAYS],
        error: vec![0; CHART_DAYS],
    };

    let mut skipped = 0usize;
    for email in emails {
        let Some(idx) = email
            .calendar_date()
            .and_then(|date| days.iter().position(|d| *d == date))
        else {
            skipped += 1;
            continue;
        };

        match classify_email(email, rules).bucket() {
            Bucket::Success => series.success[idx] += 1,
            Bucket::Warning => series.warning[idx] += 1,
            Bucket::Error => series.error[idx] += 1,
        }
    }

    if skipped > 0 {
        log::debug!("{} emails fell outside the {}-day chart window", skipped, CHART_DAYS);
    }

    series
}
