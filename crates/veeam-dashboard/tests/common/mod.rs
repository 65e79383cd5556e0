//! Shared test utilities for veeam-dashboard integration tests.
//!
//! This module provides:
//! - Builder patterns for emails and jobs
//! - `FakeRepository`, an in-memory `BackupRepository` serving canned JSON

pub mod builders;
pub mod fake_repo;

pub use builders::*;
pub use fake_repo::FakeRepository;
