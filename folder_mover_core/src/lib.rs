//! folder-mover core library
//!
//! Discovers folder trees (folders, their analyses, dashboards and datasets,
//! and nested subfolders) from a folder service, serializes them as a
//! document, and replays them under a different parent with new ids.

pub mod builder;
pub mod catalog;
pub mod discovery;
pub mod document;
pub mod error;
pub mod filter;
pub mod memory;
pub mod model;
pub mod normalize;
pub mod progress;
pub mod replicate;
pub mod service;

// Re-export main types
pub use builder::TreeBuilder;
pub use catalog::FolderCatalog;
pub use discovery::Discovery;
pub use error::{Error, Result};
pub use filter::{FilterReport, FolderFilter};
pub use memory::{AccountSnapshot, InMemoryFolderService};
pub use model::{
    ContentKind, ContentRef, CreatedFolder, FolderContents, FolderMember, FolderNode,
    FolderSummary,
};
pub use normalize::TreeNormalizer;
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate, RecordingProvider};
pub use replicate::{
    DEFAULT_FOLDER_ID_PREFIX, PlannedFolder, ReplicatedFolder, ReplicationPlan, ReplicationReport,
    TreeReplicator, derive_folder_id,
};
pub use service::{AccountId, FolderService};
