//! Test utilities for folder-mover
//!
//! This crate provides a recording folder service, tree builders and account
//! fixtures for testing discovery and replication.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{AccountBuilder, FolderTreeBuilder, TEST_ACCOUNT_ID, TEST_REGION, test_account};
pub use mocks::{MockFolderService, ServiceCall};
