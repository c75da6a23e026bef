//! Placement pipeline: network construction, solving, extraction, KPIs.
//!
//! Each module is processed independently (normalize every user's
//! choices, build a capacitated-cost network, solve it, extract the
//! bindings) and the results accumulate into one [`Roster`] with
//! run-level [`PlacementKpi`] metrics.
//!
//! [`Roster`]: crate::models::Roster

mod engine;
mod extract;
mod kpi;
mod network;

pub use engine::{PlacementEngine, PlacementOutcome, PlacementRequest};
pub use extract::extract_placements;
pub use kpi::PlacementKpi;
pub use network::{ChoiceEdge, ModuleNetwork};
