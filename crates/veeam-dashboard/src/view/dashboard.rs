use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use super::rows::{DisplayRow, EmailRow};
use crate::aggregate::{
    aggregate, chart_series, group_by_status, summarize_emails, summary_message, ChartSeries,
    EmailSummary, Summary,
};
use crate::filter::{filter_emails, filter_jobs, EmailFilter, FilterState};
use crate::model::{BackupJob, Email, EmailIndex};
use crate::paging::{paginate, sort_descending, PaginationState, TableId, PAGE_SIZE};
use crate::repository::Snapshot;
use crate::status::{classify_job, ClassificationRules, Status};

/// One status section of the grouped table.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRows {
    pub status: Status,
    pub label: &'static str,
    pub rows: Vec<DisplayRow>,
}

/// Rows of one page: job rows for the job tables, email rows for
/// [`TableId::Emails`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PageRows {
    Jobs(Vec<DisplayRow>),
    Emails(Vec<EmailRow>),
}

impl PageRows {
    pub fn len(&self) -> usize {
        match self {
            PageRows::Jobs(rows) => rows.len(),
            PageRows::Emails(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Job rows; empty on the email table.
    pub fn jobs(&self) -> &[DisplayRow] {
        match self {
            PageRows::Jobs(rows) => rows,
            PageRows::Emails(_) => &[],
        }
    }

    /// Email rows; empty on the job tables.
    pub fn emails(&self) -> &[EmailRow] {
        match self {
            PageRows::Emails(rows) => rows,
            PageRows::Jobs(_) => &[],
        }
    }
}

/// One rendered page of a table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub table: TableId,
    pub rows: PageRows,
    pub current_page: usize,
    pub total_pages: usize,
}

/// Read side of the dashboard over the latest snapshot.
///
/// Jobs are unified once per snapshot. The job filter, the email-table
/// filter and the page of every table live here. Changing the job filter
/// resets the job tables; changing the email filter resets the email table.
#[derive(Debug)]
pub struct Dashboard {
    snapshot: Snapshot,
    jobs: Vec<BackupJob>,
    rules: ClassificationRules,
    filter: FilterState,
    email_filter: EmailFilter,
    pages: PaginationState,
}

impl Dashboard {
    pub fn new(snapshot: Snapshot, rules: ClassificationRules) -> Self {
        let jobs = snapshot.jobs();
        Self {
            snapshot,
            jobs,
            rules,
            filter: FilterState::default(),
            email_filter: EmailFilter::default(),
            pages: PaginationState::new(),
        }
    }

    /// Swaps in a freshly fetched snapshot. Filters and pages are kept;
    /// pages are re-clamped on the next render.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.jobs = snapshot.jobs();
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn jobs(&self) -> &[BackupJob] {
        &self.jobs
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn email_filter(&self) -> &EmailFilter {
        &self.email_filter
    }

    /// Replaces the job filter. Returns whether it changed; a change sends
    /// every job table back to page 1.
    pub fn set_filter(&mut self, filter: FilterState) -> bool {
        if filter == self.filter {
            return false;
        }
        debug!("Filter changed, resetting job table pages");
        self.filter = filter;
        self.pages.reset_where(|table| table != TableId::Emails);
        true
    }

    /// Replaces the email-table filter. Returns whether it changed; a
    /// change sends the email table back to page 1.
    pub fn set_email_filter(&mut self, filter: EmailFilter) -> bool {
        if filter == self.email_filter {
            return false;
        }
        debug!("Email filter changed, resetting email table page");
        self.email_filter = filter;
        self.pages.reset_table(TableId::Emails);
        true
    }

    /// Job counters over the whole snapshot.
    pub fn get_summary(&self) -> Summary {
        aggregate(&self.jobs, &self.snapshot.emails)
    }

    /// Job counters restricted to jobs whose email falls on `date`.
    pub fn get_summary_for_date(&self, date: NaiveDate) -> Summary {
        let index = self.snapshot.index();
        let jobs: Vec<BackupJob> = self
            .jobs
            .iter()
            .filter(|job| index.date_of(job) == Some(date))
            .cloned()
            .collect();
        aggregate(&jobs, &self.snapshot.emails)
    }

    pub fn get_email_summary(&self) -> EmailSummary {
        summarize_emails(&self.snapshot.emails, self.rules)
    }

    /// Email counters for the emails dated `date`. Emails without a
    /// parseable date are left out.
    pub fn get_email_summary_for_date(&self, date: NaiveDate) -> EmailSummary {
        let emails: Vec<Email> = self
            .snapshot
            .emails
            .iter()
            .filter(|email| email.calendar_date() == Some(date))
            .cloned()
            .collect();
        summarize_emails(&emails, self.rules)
    }

    pub fn summary_message(&self) -> String {
        summary_message(&self.get_email_summary().buckets())
    }

    /// Info line for the summary panel scoped to one day.
    pub fn summary_message_for_date(&self, date: NaiveDate) -> String {
        summary_message(&self.get_email_summary_for_date(date).buckets())
    }

    /// Applies the current filter, sorts newest first and groups by
    /// canonical status. Each section pages as `TableId::Status`.
    pub fn get_grouped_table(&self) -> Vec<GroupedRows> {
        let index = self.snapshot.index();
        let sorted = sort_descending(&filter_jobs(&self.jobs, &self.filter, &index), &index);

        group_by_status(&sorted, &index)
            .into_iter()
            .map(|group| GroupedRows {
                status: group.status,
                label: group.status.label(),
                rows: group
                    .jobs
                    .iter()
                    .map(|job| DisplayRow::from_job(job, &index))
                    .collect(),
            })
            .collect()
    }

    pub fn get_chart_series(&self, today: NaiveDate) -> ChartSeries {
        chart_series(&self.snapshot.emails, today, self.rules)
    }

    /// Renders page `requested` of `table` and remembers the clamped page.
    pub fn get_page(&self, table: TableId, requested: i64) -> PageView {
        let (rows, page_state) = match table {
            TableId::Emails => {
                let emails = filter_emails(&self.snapshot.emails, &self.email_filter);
                let page = paginate(&emails, requested, PAGE_SIZE);
                let rows = page
                    .items
                    .iter()
                    .map(|email| EmailRow::from_email(email, self.rules))
                    .collect();
                (PageRows::Emails(rows), (page.safe_page, page.total_pages))
            }
            _ => {
                let index = self.snapshot.index();
                let jobs = self.table_jobs(table, &index);
                let page = paginate(&jobs, requested, PAGE_SIZE);
                let rows = page
                    .items
                    .iter()
                    .map(|job| DisplayRow::from_job(job, &index))
                    .collect();
                (PageRows::Jobs(rows), (page.safe_page, page.total_pages))
            }
        };

        let (current_page, total_pages) = page_state;
        self.pages.set(table, current_page);

        PageView {
            table,
            rows,
            current_page,
            total_pages,
        }
    }

    /// Renders the page `table` is currently on.
    pub fn current_page(&self, table: TableId) -> PageView {
        let requested = i64::try_from(self.pages.current(table)).unwrap_or(i64::MAX);
        self.get_page(table, requested)
    }

    pub fn next_page(&self, table: TableId) -> PageView {
        let requested = i64::try_from(self.pages.current(table)).unwrap_or(i64::MAX);
        self.get_page(table, requested.saturating_add(1))
    }

    pub fn previous_page(&self, table: TableId) -> PageView {
        let requested = i64::try_from(self.pages.current(table)).unwrap_or(i64::MAX);
        self.get_page(table, requested - 1)
    }

    fn table_jobs(&self, table: TableId, index: &EmailIndex<'_>) -> Vec<BackupJob> {
        match table {
            TableId::All => sort_descending(&self.jobs, index),
            TableId::Filtered => {
                sort_descending(&filter_jobs(&self.jobs, &self.filter, index), index)
            }
            TableId::Status(status) => {
                let section: Vec<BackupJob> = filter_jobs(&self.jobs, &self.filter, index)
                    .into_iter()
                    .filter(|job| classify_job(job, index.processed_of(job)) == status)
                    .collect();
                sort_descending(&section, index)
            }
            TableId::Emails => Vec::new(),
        }
    }
}
