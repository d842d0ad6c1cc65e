//! Topology error types.

use crate::domain::{LineId, StationId};

/// A chain could not be built, or a mutation would break the single-path
/// shape of a line.
///
/// A failed mutation never leaves the chain partially modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// No sections to build a chain from
    #[error("a line needs at least one section")]
    Empty,

    /// Section belongs to another line
    #[error("section belongs to line {found}, expected line {expected}")]
    ForeignLine { expected: LineId, found: LineId },

    /// Two sections leave from, or arrive at, the same station
    #[error("station {0} would branch the line")]
    Branching(StationId),

    /// Sections do not form one path from a single top station
    #[error("sections do not form a single path")]
    Disconnected,

    /// New section shares no station with the line
    #[error("section {up} -> {down} shares no station with the line")]
    NoSharedStation { up: StationId, down: StationId },

    /// Both ends are already on the line
    #[error("stations {up} and {down} are already connected on the line")]
    AlreadyConnected { up: StationId, down: StationId },

    /// A split segment must be strictly shorter than what it splits
    #[error("section of length {candidate} cannot split a section of length {existing}")]
    SplitTooLong { existing: u32, candidate: u32 },

    /// Merged distance does not fit
    #[error("merged section distance is too large")]
    DistanceOverflow,

    /// Removal would leave the line without sections
    #[error("cannot remove from a line with a single section")]
    SingleSection,

    /// Station to remove is not on the line
    #[error("station {0} is not on the line")]
    StationNotOnLine(StationId),
}
