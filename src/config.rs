//! Run configuration.
//!
//! A [`PlacementConfig`] is built once and passed immutably to every
//! component: choice repair, network construction, and cost accounting
//! all read the same value, so a run cannot drift between stages.

use serde::{Deserialize, Serialize};

/// Default number of ranked choices each user submits per module.
pub const DEFAULT_CHOICES_PER_MODULE: usize = 4;

/// Default cost for landing a user on a choice the cost table does not
/// cover (ranks beyond the table).
pub const DEFAULT_FALLBACK_COST: i64 = -1;

/// Default penalty for assigning a user to a group whose grade
/// restriction excludes them. Large but finite: the assignment stays
/// possible, it is just strongly discouraged.
pub const DEFAULT_INELIGIBLE_PENALTY: i64 = 100_000;

/// Cost of a placement by preference rank.
///
/// More negative = more preferred; minimizing total cost maximizes
/// aggregate preference satisfaction. Ranks past the table fall back to
/// [`default_cost`](CostTable::default_cost).
///
/// # Example
/// ```
/// use groupflow::config::CostTable;
///
/// let table = CostTable::default();
/// assert_eq!(table.cost(0), -100);
/// assert_eq!(table.cost(1), -50);
/// assert_eq!(table.cost(99), -1); // fallback
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    /// Cost per rank index, rank 0 first.
    ranks: Vec<i64>,
    /// Fallback cost for ranks beyond the table.
    default_cost: i64,
}

impl CostTable {
    /// Creates a cost table from per-rank costs and a fallback.
    pub fn new(ranks: Vec<i64>, default_cost: i64) -> Self {
        Self {
            ranks,
            default_cost,
        }
    }

    /// Cost of a placement at the given preference rank.
    pub fn cost(&self, rank: usize) -> i64 {
        self.ranks.get(rank).copied().unwrap_or(self.default_cost)
    }

    /// Cost of a rank-0 (top-choice) placement.
    ///
    /// Used as the per-user unit of the perfect-cost baseline.
    pub fn top_cost(&self) -> i64 {
        self.cost(0)
    }

    /// Number of ranks the table covers explicitly.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the table covers no rank explicitly.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            ranks: vec![-100, -50, -20, -10, 5, 10],
            default_cost: DEFAULT_FALLBACK_COST,
        }
    }
}

/// Immutable configuration for a placement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Ranked choices per user per module (K). Choice lists are repaired
    /// to exactly this length before network construction.
    pub choices_per_module: usize,
    /// Per-rank placement costs.
    pub cost_table: CostTable,
    /// Cost override for grade-ineligible placements.
    pub ineligible_penalty: i64,
}

impl PlacementConfig {
    /// Creates a configuration with default costs and K.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of choices per module.
    pub fn with_choices_per_module(mut self, k: usize) -> Self {
        self.choices_per_module = k;
        self
    }

    /// Sets the cost table.
    pub fn with_cost_table(mut self, table: CostTable) -> Self {
        self.cost_table = table;
        self
    }

    /// Sets the ineligibility penalty.
    pub fn with_ineligible_penalty(mut self, penalty: i64) -> Self {
        self.ineligible_penalty = penalty;
        self
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            choices_per_module: DEFAULT_CHOICES_PER_MODULE,
            cost_table: CostTable::default(),
            ineligible_penalty: DEFAULT_INELIGIBLE_PENALTY,
        }
    }
}
