//! Validation reporting
//!
//! Every violation found during a resolution run is collected into a
//! [`Diagnostics`] accumulator; the run ends with either the validated groups
//! or a single [`AggregateFailure`] carrying all distinct messages in the
//! order they were first reported.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::model::LinkKind;

/// Which configuration produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    Property,
    Command,
    Dependency,
}

impl BindingKind {
    pub fn label(self) -> &'static str {
        match self {
            BindingKind::Property => "property",
            BindingKind::Command => "command",
            BindingKind::Dependency => "dependency property",
        }
    }
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BindingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "property" => Ok(BindingKind::Property),
            "command" => Ok(BindingKind::Command),
            "dependency" => Ok(BindingKind::Dependency),
            other => Err(format!("unknown binding kind '{}'", other)),
        }
    }
}

/// Error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    NameFormat,
    LinkResolution,
    Multiplicity,
    TypeMismatch,
    Shape,
    MutualExclusion,
}

/// A single violation. The `Display` text is part of the public contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("Not valid patching {role} name '{name}'")]
    InvalidName { role: &'static str, name: String },

    #[error("Not found {target} with name '{name}', specified in {link} at {owner_role} '{owner}'")]
    LinkNotFound {
        target: &'static str,
        name: String,
        link: LinkKind,
        owner_role: &'static str,
        owner: String,
    },

    #[error(
        "Found several {target}s with name '{name}', \
         specified in {link} at {owner_role} '{owner}'"
    )]
    LinkAmbiguous {
        target: &'static str,
        name: String,
        link: LinkKind,
        owner_role: &'static str,
        owner: String,
    },

    #[error("Found excluded {target} '{name}', specified in {link} at {owner_role} '{owner}'")]
    LinkToExcluded {
        target: &'static str,
        name: String,
        link: LinkKind,
        owner_role: &'static str,
        owner: String,
    },

    #[error("Not found {target} for {owner_role} '{owner}' when using RequireExplicitLink")]
    MissingRequiredLink {
        target: &'static str,
        owner_role: &'static str,
        owner: String,
    },

    #[error(
        "Multi-connect {owner_role} to {target} found: {owner_role} '{owner}', {target}s: {}",
        quoted(.candidates)
    )]
    MultiConnect {
        owner_role: &'static str,
        owner: String,
        target: &'static str,
        candidates: Vec<String>,
    },

    #[error("Types do not match inside group: {left_role} '{left}', {right_role} '{right}'")]
    TypeMismatch {
        left_role: &'static str,
        left: String,
        right_role: &'static str,
        right: String,
    },

    #[error("Patching {role} '{name}' {requirement}")]
    Shape {
        role: &'static str,
        name: String,
        requirement: String,
    },

    #[error("Can not use Include and Exclude together at {kind} '{name}'")]
    IncludeAndExclude { kind: &'static str, name: String },

    #[error("Can not use Exclude together with {link} at {kind} '{name}'")]
    ExcludedWithLink {
        link: LinkKind,
        kind: &'static str,
        name: String,
    },

    #[error(
        "Can not be connect to two {role}s '{first}', '{second}', \
         specified in {link} at {owner_role} '{owner}'"
    )]
    ConflictingMethods {
        role: &'static str,
        first: String,
        second: String,
        link: LinkKind,
        owner_role: &'static str,
        owner: String,
    },
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl BindingError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BindingError::InvalidName { .. } => ErrorCategory::NameFormat,
            BindingError::LinkNotFound { .. }
            | BindingError::LinkAmbiguous { .. }
            | BindingError::LinkToExcluded { .. }
            | BindingError::MissingRequiredLink { .. } => ErrorCategory::LinkResolution,
            BindingError::MultiConnect { .. } => ErrorCategory::Multiplicity,
            BindingError::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            BindingError::Shape { .. } => ErrorCategory::Shape,
            BindingError::IncludeAndExclude { .. }
            | BindingError::ExcludedWithLink { .. }
            | BindingError::ConflictingMethods { .. } => ErrorCategory::MutualExclusion,
        }
    }

    pub fn shape(role: &'static str, name: &str, requirement: impl Into<String>) -> Self {
        Self::Shape {
            role,
            name: name.to_string(),
            requirement: requirement.into(),
        }
    }

    pub fn type_mismatch(
        left_role: &'static str,
        left: &str,
        right_role: &'static str,
        right: &str,
    ) -> Self {
        Self::TypeMismatch {
            left_role,
            left: left.to_string(),
            right_role,
            right: right.to_string(),
        }
    }
}

/// Ordered, de-duplicated error accumulator for one resolution run
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    errors: Vec<BindingError>,
    seen: HashSet<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error unless an identical message was already recorded
    pub fn push(&mut self, error: BindingError) {
        if self.seen.insert(error.to_string()) {
            self.errors.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[BindingError] {
        &self.errors
    }

    /// `Ok(value)` when nothing was recorded, the aggregate failure otherwise
    pub fn finish<T>(self, binding_kind: BindingKind, value: T) -> Result<T, AggregateFailure> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(AggregateFailure {
                binding_kind,
                errors: self.errors,
            })
        }
    }
}

impl Extend<BindingError> for Diagnostics {
    fn extend<I: IntoIterator<Item = BindingError>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

/// The one failure a resolution run can end with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("internal errors of {binding_kind} patching:{}", numbered(.errors))]
pub struct AggregateFailure {
    pub binding_kind: BindingKind,
    pub errors: Vec<BindingError>,
}

fn numbered(errors: &[BindingError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(index, error)| format!("\n{}. {}", index + 1, error))
        .collect()
}

impl AggregateFailure {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn has_category(&self, category: ErrorCategory) -> bool {
        self.errors.iter().any(|error| error.category() == category)
    }
}
