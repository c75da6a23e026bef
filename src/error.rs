//! Error taxonomy for placement runs.
//!
//! The three core kinds — `InsufficientGroups`, `CapacityExceeded`,
//! `InconsistentFlow` — are structural defects in the input or the solve
//! and abort the whole run; there is no partial-success mode. Eligibility
//! mismatches are *not* errors: they are absorbed into the optimization
//! as a cost penalty. The remaining variants belong to the CSV boundary.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlacementError>;

/// A fatal placement error.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// A module has fewer distinct groups than choices required per user,
    /// so choice lists cannot be repaired to full length.
    #[error(
        "module '{module}' has {available} distinct groups but {needed} choices are required"
    )]
    InsufficientGroups {
        /// Offending module.
        module: String,
        /// Choices required per user (K).
        needed: usize,
        /// Distinct groups available in the module.
        available: usize,
    },

    /// A module cannot seat its population: either the summed group
    /// capacity is below the user count, or the capacity reachable
    /// through the users' choice edges is.
    #[error("module '{module}' capacity {capacity} cannot seat {users} users")]
    CapacityExceeded {
        /// Offending module.
        module: String,
        /// Summed `max_users` across the module's groups.
        capacity: usize,
        /// Users requiring a seat.
        users: usize,
    },

    /// A solved flow carried zero or multiple assignment edges for one
    /// user. Indicates a solver or network-construction defect.
    #[error(
        "user '{user}' in module '{module}' has {edges} assignment edges with flow; expected exactly 1"
    )]
    InconsistentFlow {
        /// Module whose flow was being extracted.
        module: String,
        /// Affected user (by name).
        user: String,
        /// Number of positive-flow edges found.
        edges: usize,
    },

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input record had the wrong shape or an unparseable field.
    #[error("invalid record: {message}")]
    InvalidRecord {
        /// What was wrong, including the offending value.
        message: String,
    },
}

impl PlacementError {
    /// Shorthand for an [`InvalidRecord`](Self::InvalidRecord) error.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}
