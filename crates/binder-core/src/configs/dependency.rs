/*!
# Dependency-Property Binding

Links a property of a UI element to the static descriptor field registered for
it. Properties without a descriptor are reported with no field so the patcher
can register one.
*/

use std::fmt;

use serde::Serialize;

use crate::model::{LinkKind, Member, MemberKind, TypeSnapshot};
use crate::naming::NamingRole;
use crate::report::{AggregateFailure, BindingError, BindingKind, Diagnostics};
use crate::resolver::{
    engine, AnchorSpec, BindingRules, CandidateGroup, LinkSource, ResolveContext, ResolveMode,
    RoleSpec,
};
use crate::BinderConfig;

const FIELD: usize = 0;

const ANCHOR: AnchorSpec = AnchorSpec {
    label: "property",
    kind: MemberKind::Property,
    naming: NamingRole::DependencyProperty,
};

const ROLES: [RoleSpec; 1] = [RoleSpec {
    label: "field",
    kind: MemberKind::Field,
    naming: NamingRole::DependencyField,
    source: LinkSource::Anchor,
    forward: LinkKind::LinkField,
    reverse: LinkKind::LinkProperty,
    explode: false,
    required_when_explicit: true,
}];

/// A resolved dependency-property binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyBinding<'a> {
    pub property: &'a Member,
    /// Static descriptor field, `None` when it has to be registered
    pub field: Option<&'a Member>,
}

impl fmt::Display for DependencyBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> descriptor: {}",
            self.property.name,
            self.field.map_or("-", |m| m.name.as_str())
        )
    }
}

/// Resolver configuration for dependency properties
#[derive(Debug, Clone, Default)]
pub struct DependencyBinder {
    config: BinderConfig,
}

impl DependencyBinder {
    pub fn new(config: BinderConfig) -> Self {
        Self { config }
    }

    pub fn resolve<'a>(
        &self,
        snapshot: &'a TypeSnapshot,
        mode: ResolveMode,
    ) -> Result<Vec<DependencyBinding<'a>>, AggregateFailure> {
        let ctx = ResolveContext::new(snapshot, &self.config, mode);
        let groups = engine::resolve(self, &ctx)?;
        Ok(groups
            .iter()
            .map(|group| DependencyBinding {
                property: snapshot.member(group.anchor()),
                field: group.single(FIELD).map(|id| snapshot.member(id)),
            })
            .collect())
    }
}

impl BindingRules for DependencyBinder {
    fn binding_kind(&self) -> BindingKind {
        BindingKind::Dependency
    }

    fn anchor(&self) -> &AnchorSpec {
        &ANCHOR
    }

    fn roles(&self) -> &[RoleSpec] {
        &ROLES
    }

    fn is_anchor_candidate(
        &self,
        _member: &Member,
        _linked: bool,
        _ctx: &ResolveContext<'_>,
    ) -> bool {
        true
    }

    fn validate_group(
        &self,
        ctx: &ResolveContext<'_>,
        group: &CandidateGroup,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(field) = group.single(FIELD).map(|id| ctx.member(id)) else {
            return;
        };
        if !field.is_static {
            diagnostics.push(BindingError::shape("field", &field.name, "can not be non static"));
        }
        let descriptor = &ctx.types.dependency_property_type;
        if field.declared_type() != Some(descriptor.as_str()) {
            diagnostics.push(BindingError::shape(
                "field",
                &field.name,
                format!("must be of type '{}'", descriptor),
            ));
        }
    }
}
