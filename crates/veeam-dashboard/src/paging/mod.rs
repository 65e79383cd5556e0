//! Ordering, page slicing and per-table page memory.

pub mod paginator;
pub mod sort;
pub mod state;

pub use paginator::{clamp_page, paginate, total_pages, Page, PAGE_SIZE};
pub use sort::sort_descending;
pub use state::{PaginationState, TableId};
