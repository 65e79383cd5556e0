//! Current page per table.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Identifies one paginated table of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "status")]
pub enum TableId {
    /// Every job, unfiltered.
    All,
    /// Jobs matching the current filter.
    Filtered,
    /// One status section of the filtered table.
    Status(Status),
    /// The report email list.
    Emails,
}

/// Page numbers keyed by table.
///
/// Pages survive re-renders and are all reset to 1 when the filter changes.
/// Tables never visited are on page 1.
#[derive(Debug, Default)]
pub struct PaginationState {
    pages: Mutex<HashMap<TableId, usize>>,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TableId, usize>> {
        match self.pages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Pagination state lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn current(&self, table: TableId) -> usize {
        self.lock().get(&table).copied().unwrap_or(1)
    }

    pub fn set(&self, table: TableId, page: usize) {
        self.lock().insert(table, page.max(1));
    }

    /// Runs `f` with the table's stored page and stores the page it returns,
    /// under a single lock acquisition.
    pub fn update<F>(&self, table: TableId, f: F) -> usize
    where
        F: FnOnce(usize) -> usize,
    {
        let mut pages = self.lock();
        let current = pages.get(&table).copied().unwrap_or(1);
        let next = f(current).max(1);
        pages.insert(table, next);
        next
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Sends one table back to page 1.
    pub fn reset_table(&self, table: TableId) {
        self.lock().remove(&table);
    }

    /// Sends every table matching `pred` back to page 1.
    pub fn reset_where<F>(&self, pred: F)
    where
        F: Fn(TableId) -> bool,
    {
        self.lock().retain(|table, _| !pred(*table));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_first_page() {
        let state = PaginationState::new();
        assert_eq!(state.current(TableId::All), 1);
        assert_eq!(state.current(TableId::Status(Status::Error)), 1);
    }

    #[test]
    fn test_pages_are_independent_per_table() {
        let state = PaginationState::new();
        state.set(TableId::All, 3);
        state.set(TableId::Status(Status::Warning), 2);

        assert_eq!(state.current(TableId::All), 3);
        assert_eq!(state.current(TableId::Status(Status::Warning)), 2);
        assert_eq!(state.current(TableId::Status(Status::Success)), 1);
        assert_eq!(state.current(TableId::Filtered), 1);
    }

    #[test]
    fn test_reset_single_table() {
        let state = PaginationState::new();
        state.set(TableId::Emails, 3);
        state.set(TableId::All, 2);
        state.reset_table(TableId::Emails);
        assert_eq!(state.current(TableId::Emails), 1);
        assert_eq!(state.current(TableId::All), 2);

        state.set(TableId::Emails, 4);
        state.set(TableId::Filtered, 5);
        state.reset_where(|table| table != TableId::Emails);
        assert_eq!(state.current(TableId::Emails), 4);
        assert_eq!(state.current(TableId::All), 1);
        assert_eq!(state.current(TableId::Filtered), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let state = PaginationState::new();
        state.set(TableId::Filtered, 4);
        state.reset();
        assert_eq!(state.current(TableId::Filtered), 1);
    }

    #[test]
    fn test_update_is_atomic_read_modify_write() {
        let state = PaginationState::new();
        state.set(TableId::All, 2);
        let next = state.update(TableId::All, |p| p + 1);
        assert_eq!(next, 3);
        assert_eq!(state.update(TableId::All, |_| 0), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let state = std::sync::Arc::new(PaginationState::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || {
                    state.update(TableId::All, |p| p + 1);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(state.current(TableId::All), 9);
    }
}
