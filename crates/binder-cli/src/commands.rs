//! Command definitions and handling
//!
//! Every subcommand of the `binder` binary maps to a [`BinderCommand`];
//! [`handle_command`] runs it and returns the text to print.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use binder_core::{
    BinderConfig, BindingKind, CommandBinder, DependencyBinder, NamingConventions, NamingRole,
    PropertyBinder, ResolveMode, ResolveOptions, TypeSnapshot,
};
use tracing::{debug, info};

use crate::output::{render_json, render_text};

/// A resolution run over one snapshot file
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub snapshot: PathBuf,
    pub kind: BindingKind,
    pub mode: ResolveMode,
    pub options: ResolveOptions,
    /// Print groups as JSON instead of one line per binding
    pub json: bool,
}

/// Available commands
#[derive(Debug, Clone)]
pub enum BinderCommand {
    /// Resolve the bindings of a type snapshot
    Resolve(ResolveRequest),
    /// Convert a member name from one naming role to another
    Convert {
        name: String,
        from: NamingRole,
        to: NamingRole,
    },
}

/// What a command produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    /// The input was read but did not pass validation
    Rejected(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Outcome::Success(text) | Outcome::Rejected(text) => text,
        }
    }
}

/// Read a [`TypeSnapshot`] from a JSON file
pub fn load_snapshot(path: &Path) -> Result<TypeSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: TypeSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    debug!(type_name = %snapshot.name, members = snapshot.members.len(), "loaded snapshot");
    Ok(snapshot)
}

/// Run a command. I/O problems are errors; validation failures are a
/// [`Outcome::Rejected`].
pub fn handle_command(command: BinderCommand) -> Result<Outcome> {
    match command {
        BinderCommand::Resolve(request) => resolve(&request),
        BinderCommand::Convert { name, from, to } => {
            let conventions = NamingConventions::default();
            Ok(match conventions.convert_name(&name, from, to) {
                Ok(converted) => Outcome::Success(converted),
                Err(error) => Outcome::Rejected(error.to_string()),
            })
        }
    }
}

fn resolve(request: &ResolveRequest) -> Result<Outcome> {
    let snapshot = load_snapshot(&request.snapshot)?;
    let config = BinderConfig::new().with_options(request.options);
    info!(
        kind = %request.kind,
        mode = %request.mode,
        type_name = %snapshot.name,
        "resolving bindings"
    );

    let (mode, json) = (request.mode, request.json);
    let rendered = match request.kind {
        BindingKind::Property => PropertyBinder::new(config)
            .resolve(&snapshot, mode)
            .map(|b| render(&b, json)),
        BindingKind::Command => CommandBinder::new(config)
            .resolve(&snapshot, mode)
            .map(|b| render(&b, json)),
        BindingKind::Dependency => DependencyBinder::new(config)
            .resolve(&snapshot, mode)
            .map(|b| render(&b, json)),
    };

    match rendered {
        Ok(text) => Ok(Outcome::Success(text?)),
        Err(failure) => Ok(Outcome::Rejected(failure.to_string())),
    }
}

fn render<T>(bindings: &[T], json: bool) -> Result<String>
where
    T: std::fmt::Display + serde::Serialize,
{
    if json {
        render_json(bindings)
    } else {
        Ok(render_text(bindings))
    }
}
