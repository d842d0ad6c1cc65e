//! Per-line section chains.
//!
//! The sections of a line always form one simple path from a top station to
//! a bottom station. `Sections` enforces that shape under insertion and
//! removal, splitting or merging distances as needed, and reports the
//! individual section changes so a store can persist them.

mod chain;
mod error;

pub use chain::{InsertOutcome, RemoveOutcome, Sections};
pub use error::TopologyError;
