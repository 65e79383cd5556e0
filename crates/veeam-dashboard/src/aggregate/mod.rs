//! Roll-ups of classified records: counters, status sections and the
//! daily chart.

pub mod chart;
pub mod grouping;
pub mod summary;

pub use chart::{chart_series, ChartSeries, CHART_DAYS};
pub use grouping::{group_by_status, StatusGroup};
pub use summary::{
    aggregate, summarize_emails, summary_message, unify_jobs, EmailSummary, Summary,
};
