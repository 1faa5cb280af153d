//! Candidate groups
//!
//! A group is a value record: every update returns a new group, so clones
//! produced by [`CandidateGroup::explode`] never share candidate lists.

use crate::model::MemberId;

/// An anchor plus the candidates accumulated for each role
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateGroup {
    anchor: MemberId,
    roles: Vec<Vec<MemberId>>,
}

impl CandidateGroup {
    /// Empty group for `anchor` with `role_count` role slots
    pub fn seed(anchor: MemberId, role_count: usize) -> Self {
        Self {
            anchor,
            roles: vec![Vec::new(); role_count],
        }
    }

    pub fn anchor(&self) -> MemberId {
        self.anchor
    }

    /// Candidates of `role` in discovery order
    pub fn candidates(&self, role: usize) -> &[MemberId] {
        &self.roles[role]
    }

    /// The role's member when exactly one candidate was found
    pub fn single(&self, role: usize) -> Option<MemberId> {
        match self.roles[role].as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Add a candidate; an already present candidate is kept in its first position
    pub fn with_candidate(mut self, role: usize, candidate: MemberId) -> Self {
        if !self.roles[role].contains(&candidate) {
            self.roles[role].push(candidate);
        }
        self
    }

    /// One group per candidate of `role`, all other roles carried unchanged
    pub fn explode(self, role: usize) -> Vec<Self> {
        if self.roles[role].len() <= 1 {
            return vec![self];
        }
        self.roles[role]
            .iter()
            .map(|&candidate| {
                let mut clone = self.clone();
                clone.roles[role] = vec![candidate];
                clone
            })
            .collect()
    }
}
