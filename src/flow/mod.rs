//! Self-contained minimum-cost flow.
//!
//! A narrow solver contract (nodes with supply/demand, edges with
//! capacity and cost, per-edge flow values out) so the placement core
//! does not depend on any external graph library's data model.
//!
//! # Reference
//! Ahuja, Magnanti & Orlin (1993), "Network Flows", Ch. 9

mod solver;

pub use solver::{Edge, Flow, FlowError, FlowNetwork};
