//! Placement engine.
//!
//! # Algorithm
//!
//! For each module, in sorted module order:
//! 1. Repair every user's choice list to exactly K distinct valid names.
//! 2. Build the capacitated-cost network (users → groups → sink).
//! 3. Solve for a minimum-cost flow.
//! 4. Extract one binding per user into the roster.
//!
//! Modules touch disjoint group sets and disjoint per-module roster
//! slots, so each module's solve-and-extract is a self-contained
//! transaction; a failure in any module aborts the whole run.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 12: Assignments

use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::PlacementConfig;
use crate::error::{PlacementError, Result};
use crate::flow::FlowError;
use crate::models::{Group, Roster, User};
use crate::normalize::normalize_choices;

use super::extract::extract_placements;
use super::kpi::PlacementKpi;
use super::network::ModuleNetwork;

/// Input container for a placement run.
///
/// Module names are the catalog's `BTreeMap` keys, so modules are always
/// processed in sorted name order and runs are reproducible.
#[derive(Debug, Clone, Default)]
pub struct PlacementRequest {
    /// Group catalog, module name → groups in catalog order.
    pub groups: BTreeMap<String, Vec<Group>>,
    /// User arena; placements refer to users by index into this list.
    pub users: Vec<User>,
}

impl PlacementRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module and its groups.
    pub fn with_module(mut self, module: impl Into<String>, groups: Vec<Group>) -> Self {
        self.groups.insert(module.into(), groups);
        self
    }

    /// Adds a user.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Module names in processing (sorted) order.
    pub fn module_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }
}

/// A completed run: the roster plus its metrics.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// One binding per user per module.
    pub roster: Roster,
    /// Run-level cost accounting.
    pub kpi: PlacementKpi,
}

/// Runs the normalize → build → solve → extract pipeline per module.
///
/// # Example
/// ```
/// use groupflow::assign::{PlacementEngine, PlacementRequest};
/// use groupflow::config::PlacementConfig;
/// use groupflow::models::{Group, User};
///
/// let request = PlacementRequest::new()
///     .with_module("Art", vec![Group::new("Art", "Painting", 1, 2)])
///     .with_user(
///         User::new(1, "Ada", "ada@example.com", 9)
///             .with_choices("Art", vec!["Painting".into()]),
///     );
/// let config = PlacementConfig::default().with_choices_per_module(1);
///
/// let outcome = PlacementEngine::with_config(config).place(&request).unwrap();
/// assert_eq!(outcome.roster.group_of(0, "Art"), Some(0));
/// assert_eq!(outcome.kpi.total_cost, -100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Places every user into one group per module.
    ///
    /// # Errors
    /// Fatal for the whole run, naming the offending module:
    /// [`PlacementError::InsufficientGroups`],
    /// [`PlacementError::CapacityExceeded`] (from the precheck or from a
    /// solver-detected reachable-capacity shortfall), or
    /// [`PlacementError::InconsistentFlow`].
    pub fn place(&self, request: &PlacementRequest) -> Result<PlacementOutcome> {
        let started = Instant::now();
        let k = self.config.choices_per_module;
        let mut roster = Roster::new(request.users.len(), &request.groups);

        for (module, groups) in &request.groups {
            tracing::debug!(
                module = %module,
                groups = groups.len(),
                users = request.users.len(),
                "building assignment network"
            );

            let valid: Vec<String> = groups.iter().map(|g| g.name.clone()).collect();
            let choices: Vec<Vec<String>> = request
                .users
                .iter()
                .map(|u| normalize_choices(module, u.choices_for(module), &valid, k))
                .collect::<Result<_>>()?;

            let net = ModuleNetwork::build(module, groups, &request.users, &choices, &self.config)?;
            let flow = net.network.min_cost_flow().map_err(|e| match e {
                FlowError::Unbalanced { .. } | FlowError::Infeasible { .. } => {
                    PlacementError::CapacityExceeded {
                        module: module.clone(),
                        capacity: groups.iter().map(|g| g.max_users).sum(),
                        users: request.users.len(),
                    }
                }
            })?;

            let placements = extract_placements(&net, &flow, &request.users)?;
            let module_cost: i64 = placements.iter().map(|p| p.cost).sum();
            for placement in placements {
                roster.record(placement);
            }

            tracing::info!(module = %module, cost = module_cost, "module placed");
        }

        let kpi = PlacementKpi::calculate(&roster, request, &self.config, started.elapsed());
        tracing::info!(
            total_cost = kpi.total_cost,
            perfect_cost = kpi.perfect_cost,
            elapsed_ms = kpi.elapsed_ms,
            "placement run complete"
        );

        Ok(PlacementOutcome { roster, kpi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostTable;

    fn config(k: usize) -> PlacementConfig {
        PlacementConfig::default()
            .with_choices_per_module(k)
            .with_cost_table(CostTable::new(vec![-100, -50], -1))
    }

    fn user(id: i64, name: &str, grade: i32) -> User {
        User::new(id, name, format!("{}@example.com", name.to_lowercase()), grade)
    }

    fn art_groups(cap_a: usize, cap_b: usize) -> Vec<Group> {
        vec![
            Group::new("Art", "A", 1, cap_a),
            Group::new("Art", "B", 2, cap_b),
        ]
    }

    fn choices(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_everyone_gets_top_choice_when_capacity_allows() {
        // U1 [A,B], U2 [A,B], U3 [B,A]; A seats 2, B seats 1.
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(2, 1))
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(3, "U3", 9).with_choices("Art", choices(&["B", "A"])));

        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        assert_eq!(outcome.roster.group_of(0, "Art"), Some(0));
        assert_eq!(outcome.roster.group_of(1, "Art"), Some(0));
        assert_eq!(outcome.roster.group_of(2, "Art"), Some(1));
        assert_eq!(outcome.kpi.total_cost, -300);
        assert_eq!(outcome.kpi.perfect_cost, -300);
        assert!(outcome.kpi.achieved_perfect());
    }

    #[test]
    fn test_capacity_spills_one_user_to_second_choice() {
        // All three want A, which seats only two.
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(2, 1))
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(3, "U3", 9).with_choices("Art", choices(&["A", "B"])));

        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        let in_a = outcome.roster.members("Art", 0).len();
        let in_b = outcome.roster.members("Art", 1).len();
        assert_eq!(in_a, 2);
        assert_eq!(in_b, 1);
        assert_eq!(outcome.kpi.total_cost, -250);
        assert_eq!(outcome.kpi.perfect_cost, -300);
        assert!(!outcome.kpi.achieved_perfect());
    }

    #[test]
    fn test_ineligible_user_still_placed_with_penalty() {
        // B only admits grade 10; a grade-9 user whose feasible seat is B
        // still lands there, at the penalty cost.
        let groups = vec![
            Group::new("Art", "A", 1, 1),
            Group::new("Art", "B", 2, 1).with_grades(vec![10]),
        ];
        let request = PlacementRequest::new()
            .with_module("Art", groups)
            .with_user(user(1, "U1", 10).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])));

        let cfg = config(2);
        let penalty = cfg.ineligible_penalty;
        let outcome = PlacementEngine::with_config(cfg).place(&request).unwrap();

        // The solver shields the grade-9 user from the penalty by giving
        // them A; the grade-10 user absorbs B at rank cost.
        assert_eq!(outcome.roster.group_of(1, "Art"), Some(0));
        assert_eq!(outcome.roster.group_of(0, "Art"), Some(1));
        assert_eq!(outcome.kpi.total_cost, -150);
        assert_eq!(outcome.kpi.penalized_count, 0);

        // Force the penalty: both users are grade 9.
        let groups = vec![
            Group::new("Art", "A", 1, 1),
            Group::new("Art", "B", 2, 1).with_grades(vec![10]),
        ];
        let request = PlacementRequest::new()
            .with_module("Art", groups)
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])));
        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        assert_eq!(outcome.kpi.total_cost, -100 + penalty);
        assert_eq!(outcome.kpi.penalized_count, 1);
    }

    #[test]
    fn test_multiple_modules_accumulate_into_one_roster() {
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(1, 1))
            .with_module(
                "Sport",
                vec![
                    Group::new("Sport", "Run", 3, 1),
                    Group::new("Sport", "Swim", 4, 1),
                ],
            )
            .with_user(
                user(1, "U1", 9)
                    .with_choices("Art", choices(&["A", "B"]))
                    .with_choices("Sport", choices(&["Swim", "Run"])),
            )
            .with_user(
                user(2, "U2", 9)
                    .with_choices("Art", choices(&["B", "A"]))
                    .with_choices("Sport", choices(&["Run", "Swim"])),
            );

        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        assert!(outcome.roster.is_complete(&["Art", "Sport"]));
        assert_eq!(outcome.roster.placement_count(), 4);
        // Everyone got rank 0 everywhere.
        assert_eq!(outcome.kpi.total_cost, -400);
        assert_eq!(outcome.kpi.perfect_cost, -400);
    }

    #[test]
    fn test_missing_choices_are_repaired() {
        // U2 submitted nothing; normalization fills deterministically and
        // the solver still seats everyone.
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(1, 1))
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["B"])))
            .with_user(user(2, "U2", 9));

        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        assert_eq!(outcome.roster.group_of(0, "Art"), Some(1));
        assert_eq!(outcome.roster.group_of(1, "Art"), Some(0));
    }

    #[test]
    fn test_insufficient_groups_aborts() {
        let request = PlacementRequest::new()
            .with_module("Art", vec![Group::new("Art", "A", 1, 5)])
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A"])));

        let err = PlacementEngine::with_config(config(2)).place(&request).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::InsufficientGroups { needed: 2, available: 1, .. }
        ));
    }

    #[test]
    fn test_capacity_exceeded_aborts() {
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(1, 0))
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])));

        let err = PlacementEngine::with_config(config(2)).place(&request).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::CapacityExceeded { capacity: 1, users: 2, .. }
        ));
    }

    #[test]
    fn test_total_cost_matches_roster_recomputation() {
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(2, 1))
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(3, "U3", 9).with_choices("Art", choices(&["A", "B"])));

        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        assert_eq!(outcome.kpi.total_cost, outcome.roster.total_cost());
    }

    #[test]
    fn test_determinism_across_runs() {
        let request = PlacementRequest::new()
            .with_module("Art", art_groups(2, 2))
            .with_user(user(1, "U1", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(2, "U2", 9).with_choices("Art", choices(&["A", "B"])))
            .with_user(user(3, "U3", 9).with_choices("Art", choices(&["A", "B"])));

        let engine = PlacementEngine::with_config(config(2));
        let first = engine.place(&request).unwrap();
        let second = engine.place(&request).unwrap();
        assert_eq!(first.roster, second.roster);
    }

    #[test]
    fn test_empty_request() {
        let outcome = PlacementEngine::new().place(&PlacementRequest::new()).unwrap();
        assert_eq!(outcome.roster.placement_count(), 0);
        assert_eq!(outcome.kpi.total_cost, 0);
        assert_eq!(outcome.kpi.perfect_cost, 0);
    }

    #[test]
    fn test_no_users_with_modules() {
        let request = PlacementRequest::new().with_module("Art", art_groups(1, 1));
        let outcome = PlacementEngine::with_config(config(2)).place(&request).unwrap();
        assert_eq!(outcome.roster.placement_count(), 0);
    }
}
