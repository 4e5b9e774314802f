//! Progress reporting module for the CLI
//!
//! Bridges the core's `ProgressProvider` to a spinner rendered on stderr.

pub mod provider;
pub mod renderer;
pub mod utils;

pub use provider::{ChannelProvider, ProgressSession};
pub use renderer::render_progress;
pub use utils::format_elapsed;
