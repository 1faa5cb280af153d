//! Per-call name index over a type snapshot

use indexmap::IndexMap;

use crate::model::{Member, MemberId, MemberKind, TypeSnapshot};

/// Name → members lookup, built once per resolution run.
///
/// Members sharing a kind and a name (method overloads, malformed snapshots)
/// are kept in declaration order.
#[derive(Debug, Clone)]
pub struct MemberIndex<'a> {
    snapshot: &'a TypeSnapshot,
    by_kind: IndexMap<MemberKind, IndexMap<&'a str, Vec<MemberId>>>,
}

impl<'a> MemberIndex<'a> {
    pub fn new(snapshot: &'a TypeSnapshot) -> Self {
        let mut by_kind: IndexMap<MemberKind, IndexMap<&'a str, Vec<MemberId>>> = IndexMap::new();
        for (id, member) in snapshot.iter() {
            by_kind
                .entry(member.kind)
                .or_default()
                .entry(member.name.as_str())
                .or_default()
                .push(id);
        }
        Self { snapshot, by_kind }
    }

    /// Members of `kind` named `name`
    pub fn lookup(&self, kind: MemberKind, name: &str) -> &[MemberId] {
        self.by_kind
            .get(&kind)
            .and_then(|by_name| by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn member(&self, id: MemberId) -> &'a Member {
        self.snapshot.member(id)
    }

    pub fn snapshot(&self) -> &'a TypeSnapshot {
        self.snapshot
    }
}
