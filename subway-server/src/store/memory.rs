//! In-process store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::debug;

use super::{NetworkStore, StoreError};
use crate::domain::{Line, LineId, Section, SectionId, Station, StationId};
use crate::sections::{InsertOutcome, RemoveOutcome};

#[derive(Debug, Default)]
struct Tables {
    stations: BTreeMap<StationId, Station>,
    lines: BTreeMap<LineId, Line>,
    sections: BTreeMap<SectionId, Section>,
}

#[derive(Debug, Default)]
struct Sequences {
    station: AtomicU64,
    line: AtomicU64,
    section: AtomicU64,
}

fn next(sequence: &AtomicU64) -> u64 {
    sequence.fetch_add(1, Ordering::Relaxed) + 1
}

/// Thread-safe in-memory store.
///
/// Cloning shares the underlying tables. Ids start at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    sequences: Arc<Sequences>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NetworkStore for MemoryStore {
    fn next_station_id(&self) -> StationId {
        StationId(next(&self.sequences.station))
    }

    fn next_line_id(&self) -> LineId {
        LineId(next(&self.sequences.line))
    }

    fn next_section_id(&self) -> SectionId {
        SectionId(next(&self.sequences.section))
    }

    async fn insert_station(&self, station: Station) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.stations.insert(station.id(), station);
        Ok(())
    }

    async fn station(&self, id: StationId) -> Result<Station, StoreError> {
        let tables = self.tables.read().await;
        tables
            .stations
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownStation(id))
    }

    async fn stations(&self) -> Vec<Station> {
        let tables = self.tables.read().await;
        tables.stations.values().cloned().collect()
    }

    async fn insert_line(&self, line: Line, first: Section) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.lines.values().any(|l| l.is_named(line.name())) {
            return Err(StoreError::DuplicateLineName(line.name().to_string()));
        }
        if tables.sections.contains_key(&first.id()) {
            return Err(StoreError::DuplicateSection(first.id()));
        }
        debug!(line = %line.id(), name = line.name(), "storing line");
        tables.lines.insert(line.id(), line);
        tables.sections.insert(first.id(), first);
        Ok(())
    }

    async fn line(&self, id: LineId) -> Result<Line, StoreError> {
        let tables = self.tables.read().await;
        tables
            .lines
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownLine(id))
    }

    async fn lines(&self) -> Vec<Line> {
        let tables = self.tables.read().await;
        tables.lines.values().cloned().collect()
    }

    async fn sections_of_line(&self, id: LineId) -> Result<Vec<Section>, StoreError> {
        let tables = self.tables.read().await;
        if !tables.lines.contains_key(&id) {
            return Err(StoreError::UnknownLine(id));
        }
        Ok(tables
            .sections
            .values()
            .filter(|s| s.line().id() == id)
            .cloned()
            .collect())
    }

    async fn all_sections(&self) -> Vec<Section> {
        let tables = self.tables.read().await;
        tables.sections.values().cloned().collect()
    }

    async fn apply_insert(&self, outcome: &InsertOutcome) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let created = &outcome.created;
        if tables.sections.contains_key(&created.id()) {
            return Err(StoreError::DuplicateSection(created.id()));
        }
        if let Some(updated) = &outcome.updated
            && !tables.sections.contains_key(&updated.id())
        {
            return Err(StoreError::UnknownSection(updated.id()));
        }

        tables.sections.insert(created.id(), created.clone());
        if let Some(updated) = &outcome.updated {
            tables.sections.insert(updated.id(), updated.clone());
        }
        Ok(())
    }

    async fn apply_remove(&self, outcome: &RemoveOutcome) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let removed = outcome.removed.id();
        if !tables.sections.contains_key(&removed) {
            return Err(StoreError::UnknownSection(removed));
        }
        if let Some(updated) = &outcome.updated
            && !tables.sections.contains_key(&updated.id())
        {
            return Err(StoreError::UnknownSection(updated.id()));
        }

        tables.sections.remove(&removed);
        if let Some(updated) = &outcome.updated {
            tables.sections.insert(updated.id(), updated.clone());
        }
        Ok(())
    }
}
