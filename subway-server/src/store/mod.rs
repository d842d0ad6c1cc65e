//! Network record storage.
//!
//! `NetworkStore` is the boundary between the core and persistence: it hands
//! out ids, resolves stations and lines, supplies sections and applies the
//! section changes that chain edits produce. `MemoryStore` keeps everything
//! in process.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::domain::{Line, LineId, Section, SectionId, Station, StationId};
use crate::sections::{InsertOutcome, RemoveOutcome};

/// Persistence collaborator for stations, lines and sections.
///
/// Every method is atomic on its own. Callers that read a line's sections,
/// edit them and write the outcome back must serialise those edits
/// themselves.
pub trait NetworkStore {
    /// Allocate a fresh station id.
    fn next_station_id(&self) -> StationId;

    /// Allocate a fresh line id.
    fn next_line_id(&self) -> LineId;

    /// Allocate a fresh section id.
    fn next_section_id(&self) -> SectionId;

    /// Store a new station.
    fn insert_station(
        &self,
        station: Station,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Look up a station.
    fn station(&self, id: StationId) -> impl Future<Output = Result<Station, StoreError>> + Send;

    /// All stations, by id.
    fn stations(&self) -> impl Future<Output = Vec<Station>> + Send;

    /// Store a new line together with its first section.
    ///
    /// Fails if another line has the same name.
    fn insert_line(
        &self,
        line: Line,
        first: Section,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Look up a line.
    fn line(&self, id: LineId) -> impl Future<Output = Result<Line, StoreError>> + Send;

    /// All lines, by id.
    fn lines(&self) -> impl Future<Output = Vec<Line>> + Send;

    /// Sections of one line, in no particular order.
    fn sections_of_line(
        &self,
        id: LineId,
    ) -> impl Future<Output = Result<Vec<Section>, StoreError>> + Send;

    /// Sections of every line.
    fn all_sections(&self) -> impl Future<Output = Vec<Section>> + Send;

    /// Persist an insertion: one create and at most one update.
    fn apply_insert(
        &self,
        outcome: &InsertOutcome,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Persist a removal: one delete and at most one update.
    fn apply_remove(
        &self,
        outcome: &RemoveOutcome,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
