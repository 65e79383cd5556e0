pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod paging;
pub mod repository;
pub mod status;
pub mod view;

pub use aggregate::{ChartSeries, EmailSummary, StatusGroup, Summary};
pub use config::{load_config, DashboardConfig};
pub use error::{ConfigError, DashboardError, FetchError, Result};
pub use filter::{EmailFilter, FilterState, StatusFilter};
pub use model::{BackupJob, Email, Processed};
pub use paging::{Page, PaginationState, TableId};
pub use repository::{BackupRepository, HttpRepository, Snapshot};
pub use status::{classify_email, classify_job, ClassificationRules, Status};
pub use view::{Dashboard, DisplayRow, EmailRow, PageRows, PageView};
