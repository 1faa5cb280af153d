/*!
# Binding Resolver

Generic, convention-driven member-binding resolution.

A configuration describes its binding as an anchor plus an ordered list of
roles ([`RoleSpec`]) and supplies shape/type validation through the
[`BindingRules`] trait. The [`engine`] runs the shared multi-pass algorithm:

1. candidate selection and anchor name validation
2. one group per anchor
3. per role: convention match, forward explicit links, reverse explicit links
4. explosion of explodable roles with several candidates
5. multiplicity, required-link and configuration checks
6. one aggregate failure, or the groups

Nothing is cached between runs; every index lives in the [`ResolveContext`]
of a single call.
*/

pub mod engine;
pub mod group;
pub mod index;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{ExplicitLink, LinkKind, Member, MemberId, MemberKind, TypeSnapshot, TypeSystem};
use crate::naming::{NamingConventions, NamingRole};
use crate::report::{BindingError, BindingKind, Diagnostics};
use crate::BinderConfig;

pub use group::CandidateGroup;
pub use index::MemberIndex;

/// Which members are patched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Every member of a compatible shape
    #[default]
    All,
    /// Only members carrying `Include` or an explicit link
    Selectively,
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMode::All => f.write_str("all"),
            ResolveMode::Selectively => f.write_str("selectively"),
        }
    }
}

impl FromStr for ResolveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ResolveMode::All),
            "selectively" => Ok(ResolveMode::Selectively),
            other => Err(format!("unknown resolve mode '{}'", other)),
        }
    }
}

/// Caller policies for a resolution run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Silently drop anchors whose names do not follow their convention
    #[serde(default)]
    pub skip_invalid_names: bool,
    /// Skip convention search for a role when an explicit link for it exists
    #[serde(default)]
    pub prefer_explicit_over_name_search: bool,
}

impl ResolveOptions {
    pub fn with_skip_invalid_names(mut self, enabled: bool) -> Self {
        self.skip_invalid_names = enabled;
        self
    }

    pub fn with_prefer_explicit(mut self, enabled: bool) -> Self {
        self.prefer_explicit_over_name_search = enabled;
        self
    }
}

/// Where a role's links start from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    Anchor,
    /// Another, earlier role of the same group
    Role(usize),
}

/// The member a group is seeded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorSpec {
    pub label: &'static str,
    pub kind: MemberKind,
    pub naming: NamingRole,
}

/// One singular role of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSpec {
    /// Name used in messages, e.g. `can execute method`
    pub label: &'static str,
    pub kind: MemberKind,
    pub naming: NamingRole,
    pub source: LinkSource,
    /// Link declared on the source member, pointing at this role
    pub forward: LinkKind,
    /// Link declared on a member of this role, pointing back at the source
    pub reverse: LinkKind,
    /// Split the group when several candidates are found
    pub explode: bool,
    /// Must be resolved when the source member carries `RequireExplicitLink`
    pub required_when_explicit: bool,
}

/// A reverse link resolved to the source member it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseTarget {
    pub source: MemberId,
    /// Extra candidate for another role, carried by two-name links
    pub companion: Option<(usize, MemberId)>,
}

/// Everything one resolution run reads
#[derive(Debug, Clone)]
pub struct ResolveContext<'a> {
    pub index: MemberIndex<'a>,
    pub conventions: &'a NamingConventions,
    pub types: &'a TypeSystem,
    pub options: ResolveOptions,
    pub mode: ResolveMode,
}

impl<'a> ResolveContext<'a> {
    pub fn new(snapshot: &'a TypeSnapshot, config: &'a BinderConfig, mode: ResolveMode) -> Self {
        Self {
            index: MemberIndex::new(snapshot),
            conventions: &config.conventions,
            types: &config.types,
            options: config.options,
            mode,
        }
    }

    pub fn snapshot(&self) -> &'a TypeSnapshot {
        self.index.snapshot()
    }

    pub fn member(&self, id: MemberId) -> &'a Member {
        self.index.member(id)
    }
}

/// A binding configuration plugged into the resolver engine
pub trait BindingRules: Send + Sync {
    fn binding_kind(&self) -> BindingKind;

    fn anchor(&self) -> &AnchorSpec;

    /// Roles in resolution order
    fn roles(&self) -> &[RoleSpec];

    /// Shape filter applied to anchors before mode selection.
    ///
    /// `linked` is set when the member carries a forward link of this
    /// configuration or is the target of a sibling's reverse link.
    fn is_anchor_candidate(&self, member: &Member, linked: bool, ctx: &ResolveContext<'_>) -> bool;

    /// Decide which resolved target of a reverse link is the source member.
    ///
    /// `secondary` is present only for links carrying a second name.
    fn split_reverse_link(
        &self,
        ctx: &ResolveContext<'_>,
        role: usize,
        owner: &Member,
        link: &ExplicitLink,
        primary: MemberId,
        secondary: Option<MemberId>,
    ) -> Result<ReverseTarget, BindingError> {
        let _ = (ctx, role, owner, link, secondary);
        Ok(ReverseTarget {
            source: primary,
            companion: None,
        })
    }

    /// Label for the second name of a two-name reverse link declared by
    /// members of `role`; the role's source label is used when `None`
    fn second_target_label(&self, role: usize) -> Option<&'static str> {
        let _ = role;
        None
    }

    /// Configuration-specific checks on a finished group
    fn validate_group(
        &self,
        ctx: &ResolveContext<'_>,
        group: &CandidateGroup,
        diagnostics: &mut Diagnostics,
    );

    /// Label and naming role of the member a role links from
    fn source_of(&self, role: &RoleSpec) -> (&'static str, NamingRole) {
        match role.source {
            LinkSource::Anchor => (self.anchor().label, self.anchor().naming),
            LinkSource::Role(index) => {
                let source = &self.roles()[index];
                (source.label, source.naming)
            }
        }
    }
}
