//! Path search error types.

use crate::domain::StationId;

/// No path could be found between the requested stations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Station has no section on any line
    #[error("station {0} is not on the network")]
    UnknownStation(StationId),

    /// Source and destination are the same station
    #[error("source and destination are both station {0}")]
    SameStation(StationId),

    /// Stations are on disconnected parts of the network
    #[error("no path from station {from} to station {to}")]
    NotConnected { from: StationId, to: StationId },
}
