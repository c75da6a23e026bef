//! Placement domain models.
//!
//! Core data types for representing group-placement problems and
//! solutions. Domain-agnostic within assignment — applicable to course
//! placement, activity sign-ups, and workshop allocation.
//!
//! # Domain Mappings
//!
//! | groupflow | School | Conference | Clubs |
//! |-----------|--------|------------|-------|
//! | Module | Subject Track | Session Slot | Activity Day |
//! | Group | Class Section | Workshop | Club |
//! | User | Student | Attendee | Member |
//! | Roster | Timetable | Attendance Plan | Club Lists |
//!
//! Users and groups are arena-owned by a request and addressed by index;
//! a [`Roster`] records assignments as index mappings in both directions,
//! so there are no ownership cycles between users and groups.

mod group;
mod placement;
mod user;

pub use group::Group;
pub use placement::{Placement, Roster};
pub use user::User;
