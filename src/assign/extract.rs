//! Assignment extraction from a solved flow.
//!
//! Reads the per-edge flow values back through the [`ChoiceEdge`]
//! bindings and materializes one [`Placement`] per user. A user carrying
//! zero or several positive-flow edges means the solver or the network
//! construction is defective; that run cannot be trusted and aborts.

use crate::error::{PlacementError, Result};
use crate::flow::Flow;
use crate::models::{Placement, User};

use super::network::{ChoiceEdge, ModuleNetwork};

/// Extracts one placement per user from a solved module flow.
///
/// # Errors
/// [`PlacementError::InconsistentFlow`] if any user has a number of
/// positive-flow choice edges other than exactly one.
pub fn extract_placements(
    net: &ModuleNetwork,
    flow: &Flow,
    users: &[User],
) -> Result<Vec<Placement>> {
    let mut chosen: Vec<Option<&ChoiceEdge>> = vec![None; users.len()];

    for choice in &net.choice_edges {
        if flow.edge_flows[choice.edge] <= 0 {
            continue;
        }
        if chosen[choice.user].is_some() {
            return Err(inconsistent(net, flow, users, choice.user));
        }
        chosen[choice.user] = Some(choice);
    }

    chosen
        .into_iter()
        .enumerate()
        .map(|(user, choice)| {
            let choice = choice.ok_or_else(|| inconsistent(net, flow, users, user))?;
            Ok(Placement {
                module: net.module.clone(),
                user,
                group: choice.group,
                rank: choice.rank,
                cost: choice.cost,
            })
        })
        .collect()
}

fn inconsistent(net: &ModuleNetwork, flow: &Flow, users: &[User], user: usize) -> PlacementError {
    let edges = net
        .choice_edges
        .iter()
        .filter(|c| c.user == user && flow.edge_flows[c.edge] > 0)
        .count();
    PlacementError::InconsistentFlow {
        module: net.module.clone(),
        user: users[user].name.clone(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacementConfig;
    use crate::models::Group;

    fn setup() -> (ModuleNetwork, Vec<User>) {
        let groups = vec![
            Group::new("Art", "A", 1, 1),
            Group::new("Art", "B", 2, 1),
        ];
        let users = vec![
            User::new(1, "Ada", "ada@example.com", 9),
            User::new(2, "Bob", "bob@example.com", 9),
        ];
        let choices = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["B".to_string(), "A".to_string()],
        ];
        let config = PlacementConfig::default().with_choices_per_module(2);
        let net = ModuleNetwork::build("Art", &groups, &users, &choices, &config).unwrap();
        (net, users)
    }

    #[test]
    fn test_extracts_one_placement_per_user() {
        let (net, users) = setup();
        let flow = net.network.min_cost_flow().unwrap();
        let placements = extract_placements(&net, &flow, &users).unwrap();

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].user, 0);
        assert_eq!(placements[0].group, 0); // Ada → A, her rank 0
        assert_eq!(placements[0].rank, 0);
        assert_eq!(placements[1].user, 1);
        assert_eq!(placements[1].group, 1); // Bob → B, his rank 0
        assert_eq!(placements[1].cost, -100);
    }

    #[test]
    fn test_zero_flow_user_is_inconsistent() {
        let (net, users) = setup();
        let mut flow = net.network.min_cost_flow().unwrap();
        // Erase Bob's flow to fake a defective solve.
        for choice in &net.choice_edges {
            if choice.user == 1 {
                flow.edge_flows[choice.edge] = 0;
            }
        }

        let err = extract_placements(&net, &flow, &users).unwrap_err();
        match err {
            PlacementError::InconsistentFlow {
                module,
                user,
                edges,
            } => {
                assert_eq!(module, "Art");
                assert_eq!(user, "Bob");
                assert_eq!(edges, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_double_flow_user_is_inconsistent() {
        let (net, users) = setup();
        let mut flow = net.network.min_cost_flow().unwrap();
        for choice in &net.choice_edges {
            if choice.user == 0 {
                flow.edge_flows[choice.edge] = 1;
            }
        }

        let err = extract_placements(&net, &flow, &users).unwrap_err();
        match err {
            PlacementError::InconsistentFlow { user, edges, .. } => {
                assert_eq!(user, "Ada");
                assert_eq!(edges, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
