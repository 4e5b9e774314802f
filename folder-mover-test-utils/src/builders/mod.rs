//! Test data builders

mod folders;

pub use folders::{AccountBuilder, FolderTreeBuilder, TEST_ACCOUNT_ID, TEST_REGION, test_account};
