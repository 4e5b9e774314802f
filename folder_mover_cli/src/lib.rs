//! folder-mover CLI library
//!
//! Configuration, orchestration and terminal output for the `folder-mover`
//! binary.

pub mod config;
pub mod orchestrators;
pub mod output;
pub mod paths;
pub mod progress;
pub mod terminal;
