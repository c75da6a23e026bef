//! CSV boundary: record ingestion and result serialization.
//!
//! The core operates purely on in-memory structured records; this module
//! is the flat-text edge around it. Input is a `groups.csv` catalog and a
//! `users.csv` submission sheet; output is a per-user placement table
//! plus per-group membership listings.

mod ingest;
mod report;

pub use ingest::{grade_range, load_request, parse_groups, parse_users};
pub use report::{group_csv, users_csv, write_reports};
