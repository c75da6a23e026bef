//! Per-module flow network construction.
//!
//! The network shape, per module with N users:
//! - one node per user, demand −1 (each must emit one unit);
//! - one node per group, demand 0 (pure transshipment);
//! - one sink node, demand +N;
//! - user→group edges for each normalized choice: capacity 1, cost from
//!   the rank table, overridden by the ineligibility penalty when the
//!   group's grade set excludes the user;
//! - group→sink edges: capacity `max_users`, cost 0.
//!
//! The graph is a DAG, so the negative rank costs are safe for the
//! solver. A feasible flow moves exactly N units no matter what the
//! costs are, so minimizing cost decides *which* user lands *where*,
//! never whether a user is placed.

use std::collections::HashMap;

use crate::config::PlacementConfig;
use crate::error::{PlacementError, Result};
use crate::flow::FlowNetwork;
use crate::models::{Group, User};

/// Binding between one user→group network edge and the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEdge {
    /// Edge index in the owning [`FlowNetwork`].
    pub edge: usize,
    /// User index into the request's user arena.
    pub user: usize,
    /// Group index into the module's group list.
    pub group: usize,
    /// Preference rank this edge realizes.
    pub rank: usize,
    /// Edge cost (rank cost or ineligibility penalty).
    pub cost: i64,
}

/// A module's constructed network plus its domain bindings.
#[derive(Debug, Clone)]
pub struct ModuleNetwork {
    /// Module the network was built for.
    pub module: String,
    /// The capacitated-cost graph.
    pub network: FlowNetwork,
    /// One entry per user→group edge, in insertion order.
    pub choice_edges: Vec<ChoiceEdge>,
}

impl ModuleNetwork {
    /// Builds the flow network for one module.
    ///
    /// `choices` holds each user's normalized choice list (exactly K
    /// distinct valid names), indexed like `users`. Nodes and edges are
    /// inserted in user order then rank order, which fixes the solver's
    /// tie-breaking: on equal cost, earlier users keep earlier-ranked
    /// groups.
    ///
    /// # Errors
    /// [`PlacementError::CapacityExceeded`] if the module's summed group
    /// capacity is below the user count; the network cannot be feasible.
    /// [`PlacementError::InvalidRecord`] if a choice names a group
    /// missing from `groups` (normalization is expected to prevent this).
    pub fn build(
        module: &str,
        groups: &[Group],
        users: &[User],
        choices: &[Vec<String>],
        config: &PlacementConfig,
    ) -> Result<Self> {
        let capacity: usize = groups.iter().map(|g| g.max_users).sum();
        if capacity < users.len() {
            return Err(PlacementError::CapacityExceeded {
                module: module.to_string(),
                capacity,
                users: users.len(),
            });
        }

        let group_index: HashMap<&str, usize> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.name.as_str(), i))
            .collect();

        let mut network = FlowNetwork::new();
        let user_nodes: Vec<usize> = users.iter().map(|_| network.add_node(-1)).collect();
        let group_nodes: Vec<usize> = groups.iter().map(|_| network.add_node(0)).collect();
        let sink = network.add_node(users.len() as i64);

        let mut choice_edges = Vec::with_capacity(users.len() * config.choices_per_module);
        for (user_idx, (user, list)) in users.iter().zip(choices).enumerate() {
            for (rank, name) in list.iter().enumerate() {
                let &group_idx = group_index.get(name.as_str()).ok_or_else(|| {
                    PlacementError::invalid_record(format!(
                        "choice '{name}' does not name a group in module '{module}'"
                    ))
                })?;
                let cost = if groups[group_idx].admits(user.grade) {
                    config.cost_table.cost(rank)
                } else {
                    config.ineligible_penalty
                };
                let edge = network.add_edge(user_nodes[user_idx], group_nodes[group_idx], 1, cost);
                choice_edges.push(ChoiceEdge {
                    edge,
                    user: user_idx,
                    group: group_idx,
                    rank,
                    cost,
                });
            }
        }

        for (group, &node) in groups.iter().zip(&group_nodes) {
            network.add_edge(node, sink, group.max_users as i64, 0);
        }

        Ok(Self {
            module: module.to_string(),
            network,
            choice_edges,
        })
    }
}
