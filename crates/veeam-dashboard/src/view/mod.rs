//! Rendering-ready views over a snapshot.

mod dashboard;
mod rows;

pub use dashboard::{Dashboard, GroupedRows, PageRows, PageView};
pub use rows::{email_badge, DisplayRow, EmailRow};
