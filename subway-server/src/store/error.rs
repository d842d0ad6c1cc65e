//! Store error types.

use crate::domain::{LineId, SectionId, StationId};

/// Errors from looking up or writing network records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No station with this id
    #[error("station {0} not found")]
    UnknownStation(StationId),

    /// No line with this id
    #[error("line {0} not found")]
    UnknownLine(LineId),

    /// No section with this id
    #[error("section {0} not found")]
    UnknownSection(SectionId),

    /// Another line already uses this name
    #[error("a line named {0:?} already exists")]
    DuplicateLineName(String),

    /// Section id already stored
    #[error("section {0} already exists")]
    DuplicateSection(SectionId),
}
