//! Binder CLI - command-line front end for member-binding resolution
//!
//! This crate loads type snapshots from JSON, runs one of the binding
//! configurations of `binder-core` over them and renders the resulting
//! bindings or the aggregate validation failure.

pub mod commands;
pub mod output;

// Re-export commonly used types for convenience
pub use commands::{handle_command, load_snapshot, BinderCommand, Outcome, ResolveRequest};
pub use output::{ConsoleSink, OutputSink};
