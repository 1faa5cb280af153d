/*!
# Command Binding

Groups an execute method with its optional can-execute method, the command
property exposing it and that property's backing field.

A property may name both methods in one `LinkCommandMethods` link; the two
targets are told apart by return type, the void one being the execute method.
Several properties bound to one execute method split the group, so each
property is matched to its own field.
*/

use std::fmt;

use serde::Serialize;

use crate::model::{ExplicitLink, LinkKind, Member, MemberId, MemberKind, TypeSnapshot};
use crate::naming::NamingRole;
use crate::report::{AggregateFailure, BindingError, BindingKind, Diagnostics};
use crate::resolver::{
    engine, AnchorSpec, BindingRules, CandidateGroup, LinkSource, ResolveContext, ResolveMode,
    ReverseTarget, RoleSpec,
};
use crate::BinderConfig;

use super::{check_method_shape, check_same_type};

const CAN_EXECUTE: usize = 0;
const PROPERTY: usize = 1;
const FIELD: usize = 2;

const ANCHOR: AnchorSpec = AnchorSpec {
    label: "execute method",
    kind: MemberKind::Method,
    naming: NamingRole::ExecuteMethod,
};

const ROLES: [RoleSpec; 3] = [
    RoleSpec {
        label: "can execute method",
        kind: MemberKind::Method,
        naming: NamingRole::CanExecuteMethod,
        source: LinkSource::Anchor,
        forward: LinkKind::LinkCanExecuteMethod,
        reverse: LinkKind::LinkExecuteMethod,
        explode: false,
        required_when_explicit: false,
    },
    RoleSpec {
        label: "property",
        kind: MemberKind::Property,
        naming: NamingRole::CommandProperty,
        source: LinkSource::Anchor,
        forward: LinkKind::LinkCommand,
        reverse: LinkKind::LinkCommandMethods,
        explode: true,
        required_when_explicit: true,
    },
    RoleSpec {
        label: "field",
        kind: MemberKind::Field,
        naming: NamingRole::CommandField,
        source: LinkSource::Role(PROPERTY),
        forward: LinkKind::LinkField,
        reverse: LinkKind::LinkProperty,
        explode: false,
        required_when_explicit: false,
    },
];

/// A resolved command binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBinding<'a> {
    pub execute: &'a Member,
    pub can_execute: Option<&'a Member>,
    /// `None` when the patcher has to generate the command property
    pub property: Option<&'a Member>,
    pub field: Option<&'a Member>,
}

impl CommandBinding<'_> {
    /// Whether the patcher has to add a backing field for the command
    pub fn needs_generated_field(&self) -> bool {
        self.field.is_none() && !self.property.is_some_and(Member::suppresses_auto_field)
    }
}

impl fmt::Display for CommandBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |member: Option<&Member>| member.map_or("-", |m| m.name.as_str()).to_string();
        write!(
            f,
            "{} -> can execute: {}, property: {}, field: {}",
            self.execute.name,
            name(self.can_execute),
            name(self.property),
            name(self.field)
        )
    }
}

/// Resolver configuration for commands
#[derive(Debug, Clone, Default)]
pub struct CommandBinder {
    config: BinderConfig,
}

impl CommandBinder {
    pub fn new(config: BinderConfig) -> Self {
        Self { config }
    }

    pub fn resolve<'a>(
        &self,
        snapshot: &'a TypeSnapshot,
        mode: ResolveMode,
    ) -> Result<Vec<CommandBinding<'a>>, AggregateFailure> {
        let ctx = ResolveContext::new(snapshot, &self.config, mode);
        let groups = engine::resolve(self, &ctx)?;
        let member = move |id: MemberId| snapshot.member(id);
        Ok(groups
            .iter()
            .map(|group| CommandBinding {
                execute: member(group.anchor()),
                can_execute: group.single(CAN_EXECUTE).map(member),
                property: group.single(PROPERTY).map(member),
                field: group.single(FIELD).map(member),
            })
            .collect())
    }
}

impl BindingRules for CommandBinder {
    fn binding_kind(&self) -> BindingKind {
        BindingKind::Command
    }

    fn anchor(&self) -> &AnchorSpec {
        &ANCHOR
    }

    fn roles(&self) -> &[RoleSpec] {
        &ROLES
    }

    /// Outside selective mode only parameterless void methods following the
    /// execute convention are picked up, unless a link names them.
    fn is_anchor_candidate(
        &self,
        member: &Member,
        linked: bool,
        ctx: &ResolveContext<'_>,
    ) -> bool {
        match ctx.mode {
            ResolveMode::Selectively => true,
            ResolveMode::All => {
                linked
                    || (member.parameters.is_empty()
                        && member.returns(&ctx.types.void_type)
                        && (member.requires_explicit_link()
                            || ctx.conventions.validate(&member.name, NamingRole::ExecuteMethod)))
            }
        }
    }

    fn split_reverse_link(
        &self,
        ctx: &ResolveContext<'_>,
        role: usize,
        owner: &Member,
        link: &ExplicitLink,
        primary: MemberId,
        secondary: Option<MemberId>,
    ) -> Result<ReverseTarget, BindingError> {
        let Some(secondary) = secondary.filter(|_| role == PROPERTY) else {
            return Ok(ReverseTarget {
                source: primary,
                companion: None,
            });
        };

        let types = ctx.types;
        let (first, second) = (ctx.member(primary), ctx.member(secondary));
        let conflict = |role: &'static str| BindingError::ConflictingMethods {
            role,
            first: first.name.clone(),
            second: second.name.clone(),
            link: link.kind,
            owner_role: "property",
            owner: owner.name.clone(),
        };

        let void = (first.returns(&types.void_type), second.returns(&types.void_type));
        let boolean = (first.returns(&types.bool_type), second.returns(&types.bool_type));
        let (execute, can_execute) = match (void, boolean) {
            ((true, true), _) => return Err(conflict("execute method")),
            ((false, true), _) => (secondary, primary),
            ((true, false), _) => (primary, secondary),
            (_, (true, true)) => return Err(conflict("can execute method")),
            (_, (true, false)) => (secondary, primary),
            _ => (primary, secondary),
        };
        Ok(ReverseTarget {
            source: execute,
            companion: Some((CAN_EXECUTE, can_execute)),
        })
    }

    /// The second name of `LinkCommandMethods` is expected to be the
    /// can-execute method
    fn second_target_label(&self, role: usize) -> Option<&'static str> {
        (role == PROPERTY).then_some(ROLES[CAN_EXECUTE].label)
    }

    fn validate_group(
        &self,
        ctx: &ResolveContext<'_>,
        group: &CandidateGroup,
        diagnostics: &mut Diagnostics,
    ) {
        let types = ctx.types;
        let execute = ctx.member(group.anchor());
        check_method_shape("execute method", execute, &types.void_type, diagnostics);

        if let Some(can_execute) = group.single(CAN_EXECUTE).map(|id| ctx.member(id)) {
            check_method_shape("can execute method", can_execute, &types.bool_type, diagnostics);
        }

        let Some(property) = group.single(PROPERTY).map(|id| ctx.member(id)) else {
            return;
        };
        if !property.declared_type().is_some_and(|t| types.is_command_assignable(t)) {
            diagnostics.push(BindingError::shape(
                "property",
                &property.name,
                format!("must be assignable from '{}'", types.command_type),
            ));
        }
        if let Some(field) = group.single(FIELD) {
            check_same_type("property", property, "field", ctx.member(field), diagnostics);
        }
    }
}
