//! Domain error types.
//!
//! These errors are construction-time validation failures of the value
//! records. They are distinct from topology, path and store errors.

use super::StationId;

/// A value record could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Line surcharge below zero
    #[error("extra fare must not be negative (got {0})")]
    NegativeExtraFare(i64),

    /// Section length of zero or less
    #[error("section distance must be positive (got {0})")]
    NonPositiveDistance(i64),

    /// Section length that does not fit the distance type
    #[error("section distance {0} is too large")]
    DistanceOverflow(i64),

    /// Section whose two ends are the same station
    #[error("section cannot start and end at station {0}")]
    SameStation(StationId),
}
