//! Progress reporting abstractions
//!
//! Traversals report what they are doing through [`ProgressProvider`] so the
//! core stays free of UI concerns.

use crate::model::ContentKind;
use std::sync::Mutex;

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// A folder and its content were fetched during discovery
    FolderDiscovered {
        folder_id: String,
        name: String,
        depth: usize,
    },

    /// A folder was created during replication
    FolderCreated {
        source_folder_id: String,
        new_folder_id: String,
        name: String,
    },

    /// A content item was attached to a replicated folder
    MembershipCreated {
        folder_id: String,
        member_id: String,
        kind: ContentKind,
    },

    /// Generic status message
    Status { message: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn complete(&self) {}
}

/// Provider that keeps every update, for inspection after a run
#[derive(Default)]
pub struct RecordingProvider {
    updates: Mutex<Vec<ProgressUpdate>>,
    completed: Mutex<bool>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates received so far
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }

    pub fn is_completed(&self) -> bool {
        self.completed.lock().map(|done| *done).unwrap_or(false)
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update);
        }
    }

    fn complete(&self) {
        if let Ok(mut done) = self.completed.lock() {
            *done = true;
        }
    }
}
