//! # Binder Core
//!
//! Convention-driven member binding for MVVM assembly patching, including:
//! - Member snapshot model with typed annotations
//! - Naming-convention engine (five casing schemes, cross-role conversion)
//! - Generic multi-pass binding resolver
//! - Property, command and dependency-property binding configurations
//! - Aggregated validation reporting
//!
//! The crate is pure: it never loads assemblies or reads files. A caller hands
//! a [`TypeSnapshot`] to one of the binders and receives either validated
//! binding groups or a single [`AggregateFailure`] listing every violation.
//!
//! ```rust
//! use binder_core::{Member, PropertyBinder, ResolveMode, TypeSnapshot};
//!
//! let snapshot = TypeSnapshot::new("PersonViewModel")
//!     .with_member(Member::property("Name", "System.String"))
//!     .with_member(Member::field("name", "System.String"));
//!
//! let bindings = PropertyBinder::default().resolve(&snapshot, ResolveMode::All).unwrap();
//! assert_eq!(bindings[0].field.map(|f| f.name.as_str()), Some("name"));
//! ```

#![warn(clippy::all)]

pub mod configs;
pub mod model;
pub mod naming;
pub mod report;
pub mod resolver;

// Re-export commonly used types
pub use configs::{
    CommandBinder, CommandBinding, DependencyBinder, DependencyBinding, PropertyBinder,
    PropertyBinding,
};
pub use model::{
    Annotation, ExplicitLink, LinkKind, Member, MemberId, MemberKind, TypeSnapshot, TypeSystem,
};
pub use naming::{CasingScheme, NamingConvention, NamingConventions, NamingError, NamingRole};
pub use report::{AggregateFailure, BindingError, BindingKind, Diagnostics, ErrorCategory};
pub use resolver::{ResolveMode, ResolveOptions};

/// Binder version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for binder components
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("binder_core=info"));
    // A subscriber installed by the host application wins.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Everything a binder needs besides the snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinderConfig {
    /// Naming convention per role
    pub conventions: NamingConventions,
    /// Platform type names
    pub types: TypeSystem,
    /// Resolution policies
    pub options: ResolveOptions,
}

impl BinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(mut self, conventions: NamingConventions) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn with_types(mut self, types: TypeSystem) -> Self {
        self.types = types;
        self
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }
}

/// Error types for binder operations
#[derive(thiserror::Error, Debug)]
pub enum BinderError {
    /// Name does not follow its convention
    #[error("Naming error: {0}")]
    Naming(#[from] NamingError),

    /// Resolution finished with violations
    #[error(transparent)]
    Resolution(#[from] AggregateFailure),
}

/// Result type for binder operations
pub type Result<T> = std::result::Result<T, BinderError>;
