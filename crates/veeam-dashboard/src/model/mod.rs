//! Canonical record types shared by every stage after ingestion.

pub mod dates;
pub mod email;
pub mod index;
pub mod job;

pub use email::{Email, HostRecord, Processed};
pub use index::EmailIndex;
pub use job::{BackupJob, ConfigBackup, JobSource, VmEntry};
