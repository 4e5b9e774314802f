//! Progress provider implementation for CLI
//!
//! Updates travel through a channel to a rendering task, so traversals never
//! wait on the terminal.

use super::renderer::render_progress;
use folder_mover_core::{NullProvider, ProgressProvider, ProgressUpdate};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Channel-based progress provider for CLI rendering
pub struct ChannelProvider {
    tx: Mutex<Option<mpsc::Sender<ProgressUpdate>>>,
}

impl ChannelProvider {
    pub fn new(tx: mpsc::Sender<ProgressUpdate>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    fn sender(&self) -> Option<mpsc::Sender<ProgressUpdate>> {
        match self.tx.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressProvider for ChannelProvider {
    fn report(&self, update: ProgressUpdate) {
        // Never block or fail the traversal because the renderer is behind
        if let Some(tx) = self.sender() {
            let _ = tx.try_send(update);
        }
    }

    fn complete(&self) {
        // Dropping the sender lets the renderer leave its loop
        match self.tx.lock() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

/// Provider plus the task rendering its updates, when progress is enabled
pub struct ProgressSession {
    provider: Box<dyn ProgressProvider>,
    renderer: Option<JoinHandle<()>>,
}

impl ProgressSession {
    /// Start rendering when `enabled`, otherwise discard updates
    pub fn start(enabled: bool) -> Self {
        if !enabled {
            return Self {
                provider: Box::new(NullProvider),
                renderer: None,
            };
        }

        let (tx, rx) = mpsc::channel(100);
        Self {
            provider: Box::new(ChannelProvider::new(tx)),
            renderer: Some(tokio::spawn(render_progress(rx))),
        }
    }

    pub fn provider(&self) -> &dyn ProgressProvider {
        self.provider.as_ref()
    }

    /// Close the channel and wait briefly for the spinner to clear
    pub async fn finish(self) {
        self.provider.complete();
        if let Some(handle) = self.renderer {
            let _ = tokio::time::timeout(Duration::from_millis(200), handle).await;
        }
    }
}
