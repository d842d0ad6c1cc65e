//! Line and section management.

use tokio::sync::Mutex;
use tracing::{debug, info};

use super::ServiceError;
use crate::domain::{Line, LineId, Section, Station, StationId};
use crate::sections::Sections;
use crate::store::NetworkStore;

/// Request to open a line with its first section.
#[derive(Debug, Clone)]
pub struct NewLine {
    pub name: String,
    pub color: String,
    pub extra_fare: i64,
    pub up_station: StationId,
    pub down_station: StationId,
    pub distance: i64,
}

/// Request to add a section to an existing line.
#[derive(Debug, Clone, Copy)]
pub struct NewSection {
    pub up_station: StationId,
    pub down_station: StationId,
    pub distance: i64,
}

/// A line with its stations in travel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetail {
    pub line: Line,
    pub stations: Vec<Station>,
}

/// Creates lines and edits their section chains.
///
/// Section edits read a line's chain, change it and write the outcome back.
/// They hold `edits` for that whole cycle, so concurrent edits never work
/// from a stale chain.
#[derive(Debug)]
pub struct LineService<'a, S> {
    store: &'a S,
    edits: &'a Mutex<()>,
}

impl<'a, S: NetworkStore> LineService<'a, S> {
    pub fn new(store: &'a S, edits: &'a Mutex<()>) -> Self {
        Self { store, edits }
    }

    /// Open a line whose first section runs `up_station -> down_station`.
    pub async fn create_line(&self, new: NewLine) -> Result<LineDetail, ServiceError> {
        let up = self.store.station(new.up_station).await?;
        let down = self.store.station(new.down_station).await?;

        let line = Line::new(self.store.next_line_id(), new.name, new.color, new.extra_fare)?;
        let first = Section::new(
            self.store.next_section_id(),
            line.clone(),
            up.clone(),
            down.clone(),
            new.distance,
        )?;
        self.store.insert_line(line.clone(), first).await?;

        info!(line = %line.id(), name = line.name(), "line created");
        Ok(LineDetail {
            line,
            stations: vec![up, down],
        })
    }

    pub async fn line(&self, id: LineId) -> Result<LineDetail, ServiceError> {
        let line = self.store.line(id).await?;
        let chain = self.chain(id).await?;
        Ok(LineDetail {
            line,
            stations: chain.sorted_stations(),
        })
    }

    pub async fn lines(&self) -> Result<Vec<LineDetail>, ServiceError> {
        let mut details = Vec::new();
        for line in self.store.lines().await {
            let chain = self.chain(line.id()).await?;
            details.push(LineDetail {
                line,
                stations: chain.sorted_stations(),
            });
        }
        Ok(details)
    }

    /// Attach a section to a line, splitting an existing section if needed.
    pub async fn add_section(
        &self,
        id: LineId,
        new: NewSection,
    ) -> Result<LineDetail, ServiceError> {
        let _edit = self.edits.lock().await;

        let line = self.store.line(id).await?;
        let mut chain = self.chain(id).await?;
        let up = self.store.station(new.up_station).await?;
        let down = self.store.station(new.down_station).await?;

        let candidate = Section::new(
            self.store.next_section_id(),
            line.clone(),
            up,
            down,
            new.distance,
        )?;
        let outcome = chain.add_section(candidate)?;
        self.store.apply_insert(&outcome).await?;

        debug!(
            created = %outcome.created,
            updated = ?outcome.updated.as_ref().map(Section::id),
            "section applied"
        );
        info!(line = %id, sections = chain.len(), "section added");
        Ok(LineDetail {
            line,
            stations: chain.sorted_stations(),
        })
    }

    /// Take a station off a line, merging its neighbouring sections.
    pub async fn remove_station(
        &self,
        id: LineId,
        station: StationId,
    ) -> Result<LineDetail, ServiceError> {
        let _edit = self.edits.lock().await;

        let line = self.store.line(id).await?;
        let mut chain = self.chain(id).await?;
        let outcome = chain.remove_station(station)?;
        self.store.apply_remove(&outcome).await?;

        info!(line = %id, station = %station, sections = chain.len(), "station removed from line");
        Ok(LineDetail {
            line,
            stations: chain.sorted_stations(),
        })
    }

    async fn chain(&self, id: LineId) -> Result<Sections, ServiceError> {
        let sections = self.store.sections_of_line(id).await?;
        Ok(Sections::new(sections)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::sections::TopologyError;
    use crate::service::StationService;
    use crate::store::{MemoryStore, StoreError};

    struct Fixture {
        store: MemoryStore,
        edits: Mutex<()>,
        stations: Vec<Station>,
    }

    impl Fixture {
        async fn new(names: &[&str]) -> Self {
            let store = MemoryStore::new();
            let mut stations = Vec::new();
            for name in names {
                let station = StationService::new(&store)
                    .create_station(*name)
                    .await
                    .unwrap();
                stations.push(station);
            }
            Self {
                store,
                edits: Mutex::new(()),
                stations,
            }
        }

        fn service(&self) -> LineService<'_, MemoryStore> {
            LineService::new(&self.store, &self.edits)
        }

        fn id(&self, index: usize) -> StationId {
            self.stations[index].id()
        }

        fn new_line(&self, name: &str, up: usize, down: usize, distance: i64) -> NewLine {
            NewLine {
                name: name.to_string(),
                color: "green".to_string(),
                extra_fare: 0,
                up_station: self.id(up),
                down_station: self.id(down),
                distance,
            }
        }

        fn section(&self, up: usize, down: usize, distance: i64) -> NewSection {
            NewSection {
                up_station: self.id(up),
                down_station: self.id(down),
                distance,
            }
        }
    }

    fn names(detail: &LineDetail) -> Vec<&str> {
        detail.stations.iter().map(Station::name).collect()
    }

    #[tokio::test]
    async fn create_line_with_first_section() {
        let fx = Fixture::new(&["A", "B"]).await;
        let detail = fx
            .service()
            .create_line(fx.new_line("Line 2", 0, 1, 10))
            .await
            .unwrap();

        assert_eq!(detail.line.name(), "Line 2");
        assert_eq!(names(&detail), ["A", "B"]);
        assert_eq!(fx.service().line(detail.line.id()).await.unwrap(), detail);
    }

    #[tokio::test]
    async fn create_line_rejects_bad_input() {
        let fx = Fixture::new(&["A", "B"]).await;
        let service = fx.service();

        let mut negative = fx.new_line("Line 1", 0, 1, 10);
        negative.extra_fare = -1;
        assert_eq!(
            service.create_line(negative).await,
            Err(ServiceError::Domain(DomainError::NegativeExtraFare(-1)))
        );

        assert_eq!(
            service.create_line(fx.new_line("Line 1", 0, 1, 0)).await,
            Err(ServiceError::Domain(DomainError::NonPositiveDistance(0)))
        );

        let mut unknown = fx.new_line("Line 1", 0, 1, 10);
        unknown.down_station = StationId(99);
        assert_eq!(
            service.create_line(unknown).await,
            Err(ServiceError::Store(StoreError::UnknownStation(StationId(99))))
        );

        assert!(service.lines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_line_name_rejected() {
        let fx = Fixture::new(&["A", "B", "C"]).await;
        let service = fx.service();
        service
            .create_line(fx.new_line("Line 1", 0, 1, 10))
            .await
            .unwrap();

        assert_eq!(
            service.create_line(fx.new_line("Line 1", 1, 2, 5)).await,
            Err(ServiceError::Store(StoreError::DuplicateLineName(
                "Line 1".into()
            )))
        );
    }

    #[tokio::test]
    async fn split_then_merge_round_trip() {
        let fx = Fixture::new(&["A", "B", "C"]).await;
        let service = fx.service();
        let line = service
            .create_line(fx.new_line("Line 1", 0, 2, 10))
            .await
            .unwrap()
            .line;

        let detail = service.add_section(line.id(), fx.section(0, 1, 4)).await.unwrap();
        assert_eq!(names(&detail), ["A", "B", "C"]);

        let stored = fx.store.sections_of_line(line.id()).await.unwrap();
        let mut distances: Vec<_> = stored.iter().map(Section::distance).collect();
        distances.sort();
        assert_eq!(distances, [4, 6]);

        let detail = service.remove_station(line.id(), fx.id(1)).await.unwrap();
        assert_eq!(names(&detail), ["A", "C"]);

        let stored = fx.store.sections_of_line(line.id()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].distance(), 10);
    }

    #[tokio::test]
    async fn extend_both_ends() {
        let fx = Fixture::new(&["A", "B", "C", "D"]).await;
        let service = fx.service();
        let line = service
            .create_line(fx.new_line("Line 1", 1, 2, 5))
            .await
            .unwrap()
            .line;

        service.add_section(line.id(), fx.section(0, 1, 3)).await.unwrap();
        let detail = service.add_section(line.id(), fx.section(2, 3, 7)).await.unwrap();
        assert_eq!(names(&detail), ["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn failed_edit_leaves_store_untouched() {
        let fx = Fixture::new(&["A", "B", "C"]).await;
        let service = fx.service();
        let line = service
            .create_line(fx.new_line("Line 1", 0, 2, 10))
            .await
            .unwrap()
            .line;

        assert_eq!(
            service.add_section(line.id(), fx.section(0, 1, 10)).await,
            Err(ServiceError::Topology(TopologyError::SplitTooLong {
                existing: 10,
                candidate: 10
            }))
        );
        assert_eq!(
            service.remove_station(line.id(), fx.id(0)).await,
            Err(ServiceError::Topology(TopologyError::SingleSection))
        );
        assert_eq!(
            service.remove_station(line.id(), fx.id(1)).await,
            Err(ServiceError::Topology(TopologyError::StationNotOnLine(fx.id(1))))
        );

        let stored = fx.store.sections_of_line(line.id()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].distance(), 10);
    }

    #[tokio::test]
    async fn edits_on_unknown_line() {
        let fx = Fixture::new(&["A", "B"]).await;
        assert_eq!(
            fx.service().add_section(LineId(7), fx.section(0, 1, 3)).await,
            Err(ServiceError::Store(StoreError::UnknownLine(LineId(7))))
        );
        assert_eq!(
            fx.service().line(LineId(7)).await,
            Err(ServiceError::Store(StoreError::UnknownLine(LineId(7))))
        );
    }

    #[tokio::test]
    async fn interleaved_edits_keep_chain_consistent() {
        let fx = Fixture::new(&["A", "B", "C", "D", "E"]).await;
        let line = fx
            .service()
            .create_line(fx.new_line("Line 1", 1, 3, 20))
            .await
            .unwrap()
            .line;

        let service = fx.service();
        let (top, middle, bottom) = tokio::join!(
            service.add_section(line.id(), fx.section(0, 1, 5)),
            service.add_section(line.id(), fx.section(1, 2, 10)),
            service.add_section(line.id(), fx.section(3, 4, 5)),
        );
        top.unwrap();
        middle.unwrap();
        bottom.unwrap();

        let detail = service.line(line.id()).await.unwrap();
        assert_eq!(names(&detail), ["A", "B", "C", "D", "E"]);
        let total: u32 = fx
            .store
            .sections_of_line(line.id())
            .await
            .unwrap()
            .iter()
            .map(Section::distance)
            .sum();
        assert_eq!(total, 30);
    }
}
