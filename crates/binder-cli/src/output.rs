//! Output rendering and notification
//!
//! Bindings are rendered either one per line through their `Display`
//! implementation or as a pretty-printed JSON array. Where the text goes is
//! decided by an [`OutputSink`].

use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;

/// Trait for handling command output
pub trait OutputSink: Send + Sync {
    /// Handle regular output
    fn on_output(&self, content: &str);

    /// Handle error output
    fn on_error(&self, content: &str);
}

/// Console sink: output to stdout, errors to stderr
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn on_output(&self, content: &str) {
        if !content.is_empty() {
            println!("{}", content);
        }
    }

    fn on_error(&self, content: &str) {
        eprintln!("{}", content);
    }
}

/// One binding per line
pub fn render_text<T: Display>(bindings: &[T]) -> String {
    bindings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json<T: Serialize>(bindings: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(bindings)?)
}
