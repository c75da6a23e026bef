//! Run-level cost accounting.
//!
//! Aggregates the realized cost of a roster and compares it against the
//! unconstrained best case. `perfect_cost` assumes every user lands
//! their rank-0 choice in every module, ignoring capacity and
//! eligibility. It may be unreachable, and falling short of it is
//! expected, not an error.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Cost | Σ flow × edge cost over placed edges |
//! | Perfect Cost | rank-0 cost × (users × modules) |
//! | Top-Choice Rate | Fraction of placements at rank 0 |
//! | Penalized Count | Placements paying the ineligibility penalty |
//! | Rank Counts | Placements per realized rank |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::PlacementConfig;
use crate::models::Roster;

use super::engine::PlacementRequest;

/// Placement run metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementKpi {
    /// Realized cost across all modules.
    pub total_cost: i64,
    /// Unconstrained best-case baseline (may be unreachable).
    pub perfect_cost: i64,
    /// Wall time of the run, in milliseconds.
    pub elapsed_ms: u64,
    /// Total bindings recorded.
    pub placement_count: usize,
    /// Realized cost per module.
    pub cost_by_module: BTreeMap<String, i64>,
    /// Placements per realized preference rank, rank 0 first.
    pub rank_counts: Vec<usize>,
    /// Fraction of placements at rank 0 (1.0 for an empty roster).
    pub top_choice_rate: f64,
    /// Placements that paid the ineligibility penalty.
    pub penalized_count: usize,
}

impl PlacementKpi {
    /// Computes metrics from a completed roster.
    pub fn calculate(
        roster: &Roster,
        request: &PlacementRequest,
        config: &PlacementConfig,
        elapsed: Duration,
    ) -> Self {
        let mut cost_by_module: BTreeMap<String, i64> = BTreeMap::new();
        let mut rank_counts = vec![0usize; config.choices_per_module];
        let mut penalized_count = 0usize;
        let mut top_choices = 0usize;

        for placement in roster.placements() {
            *cost_by_module.entry(placement.module.clone()).or_insert(0) += placement.cost;
            if placement.rank < rank_counts.len() {
                rank_counts[placement.rank] += 1;
            }
            if placement.cost == config.ineligible_penalty {
                penalized_count += 1;
            }
            if placement.rank == 0 {
                top_choices += 1;
            }
        }

        let placement_count = roster.placement_count();
        let top_choice_rate = if placement_count == 0 {
            1.0
        } else {
            top_choices as f64 / placement_count as f64
        };

        // Every user needs one seat in every module.
        let seats = request.users.len() * request.groups.len();
        let perfect_cost = config.cost_table.top_cost() * seats as i64;

        Self {
            total_cost: roster.total_cost(),
            perfect_cost,
            elapsed_ms: elapsed.as_millis() as u64,
            placement_count,
            cost_by_module,
            rank_counts,
            top_choice_rate,
            penalized_count,
        }
    }

    /// Whether the run matched the unconstrained best case.
    pub fn achieved_perfect(&self) -> bool {
        self.total_cost == self.perfect_cost
    }
}
