/*!
# Resolution Engine

The multi-pass algorithm shared by the property, command and dependency
configurations. Errors never stop a pass; they are collected and turned into
one [`AggregateFailure`] at the end of [`resolve`].
*/

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::model::{LinkKind, MemberId, MemberKind};
use crate::report::{AggregateFailure, BindingError, Diagnostics};

use super::group::CandidateGroup;
use super::{BindingRules, LinkSource, ResolveContext, ResolveMode, RoleSpec};

/// A sibling whose reverse link points at a source member
#[derive(Debug, Clone, Copy)]
struct ReverseLink {
    owner: MemberId,
    source: MemberId,
    companion: Option<(usize, MemberId)>,
}

/// Run every pass and return the validated groups
pub fn resolve<R>(
    rules: &R,
    ctx: &ResolveContext<'_>,
) -> Result<Vec<CandidateGroup>, AggregateFailure>
where
    R: BindingRules + ?Sized,
{
    let mut diagnostics = Diagnostics::new();
    check_markers(rules, ctx, &mut diagnostics);

    let reverse: Vec<Vec<ReverseLink>> = (0..rules.roles().len())
        .map(|role| reverse_links(rules, ctx, role, &mut diagnostics))
        .collect();

    let anchors = select_anchors(rules, ctx, &reverse, &mut diagnostics);
    debug!(
        binding = %rules.binding_kind(),
        type_name = %ctx.snapshot().name,
        anchors = anchors.len(),
        "selected anchors"
    );

    let mut groups: Vec<CandidateGroup> = anchors
        .into_iter()
        .map(|anchor| CandidateGroup::seed(anchor, rules.roles().len()))
        .collect();

    for (role, spec) in rules.roles().iter().enumerate() {
        groups = groups
            .into_iter()
            .map(|group| link_role(rules, ctx, group, role, &reverse, &mut diagnostics))
            .collect();

        if spec.explode {
            let before = groups.len();
            groups = groups.into_iter().flat_map(|group| group.explode(role)).collect();
            if groups.len() != before {
                debug!(role = spec.label, before, after = groups.len(), "exploded groups");
            }
        }

        groups = groups
            .into_iter()
            .map(|group| attach_companions(group, role, &reverse[role]))
            .collect();
    }

    for group in &groups {
        check_multiplicity(rules, ctx, group, &mut diagnostics);
        check_required_links(rules, ctx, group, &mut diagnostics);
        rules.validate_group(ctx, group, &mut diagnostics);
    }

    debug!(groups = groups.len(), errors = diagnostics.len(), "resolution finished");
    diagnostics.finish(rules.binding_kind(), groups)
}

/// Member kinds and link kinds a configuration looks at
fn relevant_kinds<R: BindingRules + ?Sized>(rules: &R) -> (Vec<MemberKind>, Vec<LinkKind>) {
    let mut members = vec![rules.anchor().kind];
    let mut links = Vec::new();
    for spec in rules.roles() {
        if !members.contains(&spec.kind) {
            members.push(spec.kind);
        }
        for link in [spec.forward, spec.reverse] {
            if !links.contains(&link) {
                links.push(link);
            }
        }
    }
    (members, links)
}

fn check_markers<R: BindingRules + ?Sized>(
    rules: &R,
    ctx: &ResolveContext<'_>,
    diagnostics: &mut Diagnostics,
) {
    let (member_kinds, link_kinds) = relevant_kinds(rules);
    for (_, member) in ctx.snapshot().iter() {
        if !member_kinds.contains(&member.kind) || !member.is_excluded() {
            continue;
        }
        if member.is_included() {
            diagnostics.push(BindingError::IncludeAndExclude {
                kind: member.kind.label(),
                name: member.name.clone(),
            });
        }
        for link in member.links().filter(|link| link_kinds.contains(&link.kind)) {
            diagnostics.push(BindingError::ExcludedWithLink {
                link: link.kind,
                kind: member.kind.label(),
                name: member.name.clone(),
            });
        }
    }
}

/// Where an explicit link was declared
struct LinkSite<'s> {
    link: LinkKind,
    owner_role: &'static str,
    owner: &'s str,
}

/// Resolve one link target name; errors are recorded and yield `None`
fn resolve_link(
    ctx: &ResolveContext<'_>,
    kind: MemberKind,
    target: &'static str,
    name: &str,
    site: &LinkSite<'_>,
    diagnostics: &mut Diagnostics,
) -> Option<MemberId> {
    let (link, owner_role, owner) = (site.link, site.owner_role, site.owner.to_string());
    match ctx.index.lookup(kind, name) {
        [] => {
            diagnostics.push(BindingError::LinkNotFound {
                target,
                name: name.to_string(),
                link,
                owner_role,
                owner,
            });
            None
        }
        [id] if ctx.member(*id).is_excluded() => {
            diagnostics.push(BindingError::LinkToExcluded {
                target,
                name: name.to_string(),
                link,
                owner_role,
                owner,
            });
            None
        }
        [id] => Some(*id),
        _ => {
            diagnostics.push(BindingError::LinkAmbiguous {
                target,
                name: name.to_string(),
                link,
                owner_role,
                owner,
            });
            None
        }
    }
}

fn source_kind<R: BindingRules + ?Sized>(rules: &R, spec: &RoleSpec) -> MemberKind {
    match spec.source {
        LinkSource::Anchor => rules.anchor().kind,
        LinkSource::Role(index) => rules.roles()[index].kind,
    }
}

fn source_member(spec: &RoleSpec, group: &CandidateGroup) -> Option<MemberId> {
    match spec.source {
        LinkSource::Anchor => Some(group.anchor()),
        LinkSource::Role(index) => group.single(index),
    }
}

/// Resolve every reverse link declared by members of `role`
fn reverse_links<R: BindingRules + ?Sized>(
    rules: &R,
    ctx: &ResolveContext<'_>,
    role: usize,
    diagnostics: &mut Diagnostics,
) -> Vec<ReverseLink> {
    let spec = &rules.roles()[role];
    let (target_label, _) = rules.source_of(spec);
    let second_label = rules.second_target_label(role).unwrap_or(target_label);
    let target_kind = source_kind(rules, spec);

    let mut resolved = Vec::new();
    for (owner_id, owner) in ctx.snapshot().members_of(spec.kind) {
        if owner.is_excluded() {
            continue;
        }
        for link in owner.links_of(spec.reverse) {
            let site = LinkSite {
                link: link.kind,
                owner_role: spec.label,
                owner: &owner.name,
            };
            let targets: Vec<Option<MemberId>> = link
                .names()
                .enumerate()
                .map(|(position, name)| {
                    let label = if position == 0 { target_label } else { second_label };
                    resolve_link(ctx, target_kind, label, name, &site, diagnostics)
                })
                .collect();
            let (primary, secondary) = match targets.as_slice() {
                [Some(primary)] => (*primary, None),
                [Some(primary), Some(secondary)] => (*primary, Some(*secondary)),
                _ => continue,
            };
            match rules.split_reverse_link(ctx, role, owner, link, primary, secondary) {
                Ok(target) => {
                    trace!(owner = %owner.name, link = %link.kind, "resolved reverse link");
                    resolved.push(ReverseLink {
                        owner: owner_id,
                        source: target.source,
                        companion: target.companion,
                    });
                }
                Err(error) => diagnostics.push(error),
            }
        }
    }
    resolved
}

fn select_anchors<R: BindingRules + ?Sized>(
    rules: &R,
    ctx: &ResolveContext<'_>,
    reverse: &[Vec<ReverseLink>],
    diagnostics: &mut Diagnostics,
) -> Vec<MemberId> {
    let anchor = rules.anchor();
    let convention = ctx.conventions.get(anchor.naming);

    let anchor_roles = || {
        rules
            .roles()
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.source == LinkSource::Anchor)
    };
    let forward_links: Vec<LinkKind> = anchor_roles().map(|(_, spec)| spec.forward).collect();
    let targeted: HashSet<MemberId> = anchor_roles()
        .flat_map(|(role, _)| reverse[role].iter().map(|link| link.source))
        .collect();

    let mut selected = Vec::new();
    for (id, member) in ctx.snapshot().members_of(anchor.kind) {
        let linked = member.links().any(|link| forward_links.contains(&link.kind))
            || targeted.contains(&id);
        if member.is_excluded() || !rules.is_anchor_candidate(member, linked, ctx) {
            continue;
        }
        let chosen = match ctx.mode {
            ResolveMode::All => true,
            ResolveMode::Selectively => member.is_included() || linked,
        };
        if !chosen {
            continue;
        }
        if member.requires_explicit_link() {
            selected.push(id);
            continue;
        }
        if convention.validate(&member.name) {
            selected.push(id);
        } else if ctx.options.skip_invalid_names {
            trace!(name = %member.name, "skipped anchor with invalid name");
        } else {
            diagnostics.push(BindingError::InvalidName {
                role: anchor.label,
                name: member.name.clone(),
            });
        }
    }
    selected
}

fn link_role<R: BindingRules + ?Sized>(
    rules: &R,
    ctx: &ResolveContext<'_>,
    group: CandidateGroup,
    role: usize,
    reverse: &[Vec<ReverseLink>],
    diagnostics: &mut Diagnostics,
) -> CandidateGroup {
    let spec = &rules.roles()[role];
    let Some(source_id) = source_member(spec, &group) else {
        return group;
    };
    let source = ctx.member(source_id);
    let (source_label, source_naming) = rules.source_of(spec);
    let mut group = group;

    // A two-name link declared elsewhere counts for the role its companion fills
    let carried_companion = reverse.iter().flatten().any(|link| {
        link.source == source_id
            && matches!(link.companion, Some((companion_role, _)) if companion_role == role)
    });
    let has_explicit = source.links_of(spec.forward).next().is_some()
        || reverse[role].iter().any(|link| link.source == source_id)
        || carried_companion;
    let name_search = !source.requires_explicit_link()
        && !(ctx.options.prefer_explicit_over_name_search && has_explicit);

    if name_search {
        match ctx.conventions.convert_name(&source.name, source_naming, spec.naming) {
            Ok(name) => {
                for &id in ctx.index.lookup(spec.kind, &name) {
                    if !ctx.member(id).is_excluded() {
                        group = group.with_candidate(role, id);
                    }
                }
            }
            Err(error) => trace!(%error, role = spec.label, "no convention match"),
        }
    }

    for link in source.links_of(spec.forward) {
        let site = LinkSite {
            link: link.kind,
            owner_role: source_label,
            owner: &source.name,
        };
        if let Some(id) = resolve_link(ctx, spec.kind, spec.label, &link.name, &site, diagnostics) {
            group = group.with_candidate(role, id);
        }
    }

    for link in reverse[role].iter().filter(|link| link.source == source_id) {
        group = group.with_candidate(role, link.owner);
    }

    trace!(
        source = %source.name,
        role = spec.label,
        candidates = group.candidates(role).len(),
        "linked role"
    );
    group
}

/// Companions follow the member whose link carried them, so they are added
/// after explosion.
fn attach_companions(
    group: CandidateGroup,
    role: usize,
    reverse: &[ReverseLink],
) -> CandidateGroup {
    let mut group = group;
    for link in reverse {
        let Some((companion_role, companion)) = link.companion else {
            continue;
        };
        if link.source == group.anchor() && group.candidates(role).contains(&link.owner) {
            group = group.with_candidate(companion_role, companion);
        }
    }
    group
}

fn check_multiplicity<R: BindingRules + ?Sized>(
    rules: &R,
    ctx: &ResolveContext<'_>,
    group: &CandidateGroup,
    diagnostics: &mut Diagnostics,
) {
    for (role, spec) in rules.roles().iter().enumerate() {
        let candidates = group.candidates(role);
        if candidates.len() < 2 {
            continue;
        }
        let Some(source) = source_member(spec, group) else {
            continue;
        };
        let (owner_role, _) = rules.source_of(spec);
        diagnostics.push(BindingError::MultiConnect {
            owner_role,
            owner: ctx.member(source).name.clone(),
            target: spec.label,
            candidates: candidates.iter().map(|&id| ctx.member(id).name.clone()).collect(),
        });
    }
}

fn check_required_links<R: BindingRules + ?Sized>(
    rules: &R,
    ctx: &ResolveContext<'_>,
    group: &CandidateGroup,
    diagnostics: &mut Diagnostics,
) {
    for (role, spec) in rules.roles().iter().enumerate() {
        if !spec.required_when_explicit || !group.candidates(role).is_empty() {
            continue;
        }
        let Some(source) = source_member(spec, group).map(|id| ctx.member(id)) else {
            continue;
        };
        if source.requires_explicit_link() {
            let (owner_role, _) = rules.source_of(spec);
            diagnostics.push(BindingError::MissingRequiredLink {
                target: spec.label,
                owner_role,
                owner: source.name.clone(),
            });
        }
    }
}
