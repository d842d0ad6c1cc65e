//! Domain types for the subway network.
//!
//! This module contains the value records the rest of the crate is built on:
//! stations, lines and the sections connecting them. All types enforce their
//! invariants at construction time, so code that receives them can trust
//! their validity.

mod error;
mod line;
mod section;
mod station;

pub use error::DomainError;
pub use line::{Line, LineId};
pub use section::{Section, SectionId};
pub use station::{Station, StationId};
