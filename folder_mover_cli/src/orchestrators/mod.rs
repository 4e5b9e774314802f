//! Command orchestrators for business logic
//!
//! Orchestrators coordinate between the CLI layer and the core library
//! pipelines.

pub mod backend;
pub mod discover_orchestrator;
pub mod filter_orchestrator;
pub mod replicate_orchestrator;

pub use backend::SnapshotBackend;
