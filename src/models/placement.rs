//! Placement (solution) model.
//!
//! A [`Roster`] is the complete solution of a placement run: one
//! user↔group binding per user per module, recorded as index-based
//! mappings in both directions so membership lookups need no back
//! references between users and groups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Group;

/// One solved user↔group binding in one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Module the binding belongs to.
    pub module: String,
    /// User index into the request's user arena.
    pub user: usize,
    /// Group index into the module's group list.
    pub group: usize,
    /// Position of the group in the user's normalized choice list.
    pub rank: usize,
    /// Exact edge cost paid (rank cost, or the ineligibility penalty).
    pub cost: i64,
}

/// A complete placement solution.
///
/// Grows only during extraction, one module at a time; each user's slot
/// for a module is written at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    placements: Vec<Placement>,
    /// user index → module → group index.
    user_groups: Vec<BTreeMap<String, usize>>,
    /// module → group index → member user indexes.
    group_members: BTreeMap<String, Vec<Vec<usize>>>,
}

impl Roster {
    /// Creates an empty roster sized for the given users and catalog.
    pub fn new(user_count: usize, groups: &BTreeMap<String, Vec<Group>>) -> Self {
        let group_members = groups
            .iter()
            .map(|(module, list)| (module.clone(), vec![Vec::new(); list.len()]))
            .collect();
        Self {
            placements: Vec::new(),
            user_groups: vec![BTreeMap::new(); user_count],
            group_members,
        }
    }

    /// Records a binding, updating both direction maps.
    pub fn record(&mut self, placement: Placement) {
        self.user_groups[placement.user].insert(placement.module.clone(), placement.group);
        if let Some(members) = self.group_members.get_mut(&placement.module) {
            members[placement.group].push(placement.user);
        }
        self.placements.push(placement);
    }

    /// Group index assigned to a user in a module, if any.
    pub fn group_of(&self, user: usize, module: &str) -> Option<usize> {
        self.user_groups.get(user)?.get(module).copied()
    }

    /// Member user indexes of a group.
    pub fn members(&self, module: &str, group: usize) -> &[usize] {
        self.group_members
            .get(module)
            .and_then(|m| m.get(group))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All recorded bindings, in extraction order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of recorded bindings.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Sum of the edge costs actually paid.
    pub fn total_cost(&self) -> i64 {
        self.placements.iter().map(|p| p.cost).sum()
    }

    /// Whether every user holds a binding in every listed module.
    pub fn is_complete(&self, modules: &[&str]) -> bool {
        self.user_groups
            .iter()
            .all(|slots| modules.iter().all(|m| slots.contains_key(*m)))
    }
}
