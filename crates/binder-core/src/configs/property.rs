/*!
# Property Binding

Links every patchable property to at most one backing field of the same
type. Properties typed as the command marker are left to the command binder.
*/

use std::fmt;

use serde::Serialize;

use crate::model::{LinkKind, Member, MemberKind, TypeSnapshot};
use crate::naming::NamingRole;
use crate::report::{AggregateFailure, BindingKind, Diagnostics};
use crate::resolver::{
    engine, AnchorSpec, BindingRules, CandidateGroup, LinkSource, ResolveContext, ResolveMode,
    RoleSpec,
};
use crate::BinderConfig;

use super::check_same_type;

const FIELD: usize = 0;

const ANCHOR: AnchorSpec = AnchorSpec {
    label: "property",
    kind: MemberKind::Property,
    naming: NamingRole::Property,
};

const ROLES: [RoleSpec; 1] = [RoleSpec {
    label: "field",
    kind: MemberKind::Field,
    naming: NamingRole::Field,
    source: LinkSource::Anchor,
    forward: LinkKind::LinkField,
    reverse: LinkKind::LinkProperty,
    explode: false,
    required_when_explicit: true,
}];

/// A resolved property binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyBinding<'a> {
    pub property: &'a Member,
    /// `None` when the patcher has to generate the backing field
    pub field: Option<&'a Member>,
}

impl fmt::Display for PropertyBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.map_or("-", |m| m.name.as_str());
        write!(f, "{} -> field: {}", self.property.name, field)
    }
}

/// Resolver configuration for plain properties
#[derive(Debug, Clone, Default)]
pub struct PropertyBinder {
    config: BinderConfig,
}

impl PropertyBinder {
    pub fn new(config: BinderConfig) -> Self {
        Self { config }
    }

    pub fn resolve<'a>(
        &self,
        snapshot: &'a TypeSnapshot,
        mode: ResolveMode,
    ) -> Result<Vec<PropertyBinding<'a>>, AggregateFailure> {
        let ctx = ResolveContext::new(snapshot, &self.config, mode);
        let groups = engine::resolve(self, &ctx)?;
        Ok(groups
            .iter()
            .map(|group| PropertyBinding {
                property: snapshot.member(group.anchor()),
                field: group.single(FIELD).map(|id| snapshot.member(id)),
            })
            .collect())
    }
}

impl BindingRules for PropertyBinder {
    fn binding_kind(&self) -> BindingKind {
        BindingKind::Property
    }

    fn anchor(&self) -> &AnchorSpec {
        &ANCHOR
    }

    fn roles(&self) -> &[RoleSpec] {
        &ROLES
    }

    fn is_anchor_candidate(
        &self,
        member: &Member,
        _linked: bool,
        ctx: &ResolveContext<'_>,
    ) -> bool {
        member.value_type.as_deref() != Some(ctx.types.command_type.as_str())
    }

    fn validate_group(
        &self,
        ctx: &ResolveContext<'_>,
        group: &CandidateGroup,
        diagnostics: &mut Diagnostics,
    ) {
        if let Some(field) = group.single(FIELD).map(|id| ctx.member(id)) {
            let property = ctx.member(group.anchor());
            check_same_type("property", property, "field", field, diagnostics);
        }
    }
}
