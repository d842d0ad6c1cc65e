//! The section chain of a single line.

use std::collections::BTreeMap;

use tracing::trace;

use super::TopologyError;
use crate::domain::{Line, Section, Station, StationId};

/// Persisted changes produced by inserting a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    /// The inserted section, unchanged.
    pub created: Section,
    /// The existing section that was shortened by a split, if any.
    pub updated: Option<Section>,
}

/// Persisted changes produced by removing a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// The section that no longer exists.
    pub removed: Section,
    /// The upper section, extended over the removed station, if any.
    pub updated: Option<Section>,
}

/// The ordered sections of one line.
///
/// # Invariants
///
/// - At least one section
/// - Every section belongs to `line`
/// - Each station leaves at most one section and arrives at most one
///   section, and walking up → down from the single top station visits every
///   section exactly once
///
/// The chain is stored as adjacency maps keyed by station; the top and
/// bottom stations are derived from them rather than stored.
#[derive(Debug, Clone)]
pub struct Sections {
    line: Line,
    /// up-station → the section leaving it
    by_up: BTreeMap<StationId, Section>,
    /// down-station → up-station of the section arriving at it
    by_down: BTreeMap<StationId, StationId>,
}

impl Sections {
    /// Build a chain from a line's sections, in any order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `sections` is empty
    /// - sections belong to different lines
    /// - a station would have two successors or two predecessors
    /// - the sections do not join into one path (gaps or cycles)
    pub fn new(sections: Vec<Section>) -> Result<Self, TopologyError> {
        let line = sections
            .first()
            .map(|s| s.line().clone())
            .ok_or(TopologyError::Empty)?;

        let mut chain = Self {
            line,
            by_up: BTreeMap::new(),
            by_down: BTreeMap::new(),
        };

        for section in sections {
            chain.check_line(&section)?;
            let up = section.up_station().id();
            let down = section.down_station().id();
            if chain.by_up.contains_key(&up) {
                return Err(TopologyError::Branching(up));
            }
            if chain.by_down.contains_key(&down) {
                return Err(TopologyError::Branching(down));
            }
            chain.link(section);
        }

        let mut tops = chain
            .by_up
            .keys()
            .filter(|id| !chain.by_down.contains_key(id));
        let top = match (tops.next(), tops.next()) {
            (Some(top), None) => *top,
            _ => return Err(TopologyError::Disconnected),
        };

        let mut visited = 0;
        let mut cursor = chain.by_up.get(&top);
        while let Some(section) = cursor {
            visited += 1;
            cursor = chain.by_up.get(&section.down_station().id());
        }
        if visited != chain.by_up.len() {
            return Err(TopologyError::Disconnected);
        }

        Ok(chain)
    }

    /// The line these sections belong to.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Number of sections in the chain.
    pub fn len(&self) -> usize {
        self.by_up.len()
    }

    /// Always false: a chain has at least one section.
    pub fn is_empty(&self) -> bool {
        self.by_up.is_empty()
    }

    /// Returns true if `station` is either end of any section.
    pub fn contains_station(&self, station: StationId) -> bool {
        self.by_up.contains_key(&station) || self.by_down.contains_key(&station)
    }

    /// The station no section arrives at.
    pub fn top_station(&self) -> &Station {
        self.top_section().up_station()
    }

    /// The station no section leaves from.
    pub fn bottom_station(&self) -> &Station {
        self.bottom_section().down_station()
    }

    /// Sections from top to bottom.
    pub fn sorted_sections(&self) -> Vec<&Section> {
        let mut sorted = Vec::with_capacity(self.len());
        let mut cursor = Some(self.top_section());
        while let Some(section) = cursor {
            sorted.push(section);
            cursor = self.by_up.get(&section.down_station().id());
        }
        sorted
    }

    /// Stations from top to bottom.
    ///
    /// Always one longer than the number of sections.
    pub fn sorted_stations(&self) -> Vec<Station> {
        let sections = self.sorted_sections();
        let mut stations = Vec::with_capacity(sections.len() + 1);
        stations.push(self.top_station().clone());
        stations.extend(sections.into_iter().map(|s| s.down_station().clone()));
        stations
    }

    /// Insert a section, extending the line or splitting an existing section.
    ///
    /// A section whose down-station is the top station is prepended, and one
    /// whose up-station is the bottom station is appended. Otherwise it is
    /// placed inside the existing section that shares its up-station (or its
    /// down-station), which is shortened by the new section's distance.
    ///
    /// # Errors
    ///
    /// Returns `Err` without modifying the chain if:
    /// - the section belongs to another line
    /// - neither end is on the line
    /// - both ends are already on the line
    /// - a split would need a section at least as long as the one it splits
    pub fn add_section(&mut self, candidate: Section) -> Result<InsertOutcome, TopologyError> {
        self.check_line(&candidate)?;

        let up = candidate.up_station().id();
        let down = candidate.down_station().id();
        match (self.contains_station(up), self.contains_station(down)) {
            (false, false) => return Err(TopologyError::NoSharedStation { up, down }),
            (true, true) => return Err(TopologyError::AlreadyConnected { up, down }),
            _ => {}
        }

        if down == self.top_station().id() || up == self.bottom_station().id() {
            trace!(line = %self.line.id(), section = %candidate, "extending line");
            self.link(candidate.clone());
            return Ok(InsertOutcome {
                created: candidate,
                updated: None,
            });
        }

        let existing = match self.by_up.get(&up) {
            Some(section) => section.clone(),
            None => {
                let upper = self
                    .by_down
                    .get(&down)
                    .and_then(|up| self.by_up.get(up))
                    .ok_or(TopologyError::Disconnected)?;
                upper.clone()
            }
        };

        let remaining = existing
            .distance()
            .checked_sub(candidate.distance())
            .filter(|d| *d > 0)
            .ok_or(TopologyError::SplitTooLong {
                existing: existing.distance(),
                candidate: candidate.distance(),
            })?;

        let shortened = if existing.up_station().id() == up {
            existing.reshaped(
                candidate.down_station().clone(),
                existing.down_station().clone(),
                remaining,
            )
        } else {
            existing.reshaped(
                existing.up_station().clone(),
                candidate.up_station().clone(),
                remaining,
            )
        };

        trace!(
            line = %self.line.id(),
            section = %candidate,
            split = %existing,
            "splitting section"
        );
        self.unlink(&existing);
        self.link(shortened.clone());
        self.link(candidate.clone());

        Ok(InsertOutcome {
            created: candidate,
            updated: Some(shortened),
        })
    }

    /// Remove a station from the line.
    ///
    /// A terminal station takes its only section with it. An interior
    /// station's two sections are merged: the upper section keeps its id and
    /// spans both distances, and the lower section is removed.
    ///
    /// # Errors
    ///
    /// Returns `Err` without modifying the chain if:
    /// - the station is not on the line
    /// - the line has a single section
    pub fn remove_station(&mut self, station: StationId) -> Result<RemoveOutcome, TopologyError> {
        if !self.contains_station(station) {
            return Err(TopologyError::StationNotOnLine(station));
        }
        if self.len() == 1 {
            return Err(TopologyError::SingleSection);
        }

        let lower = self.by_up.get(&station).cloned();
        let upper = self
            .by_down
            .get(&station)
            .and_then(|up| self.by_up.get(up))
            .cloned();

        let outcome = match (upper, lower) {
            (Some(upper), Some(lower)) => {
                let distance = upper
                    .distance()
                    .checked_add(lower.distance())
                    .ok_or(TopologyError::DistanceOverflow)?;
                let merged = upper.reshaped(
                    upper.up_station().clone(),
                    lower.down_station().clone(),
                    distance,
                );
                self.unlink(&upper);
                self.unlink(&lower);
                self.link(merged.clone());
                RemoveOutcome {
                    removed: lower,
                    updated: Some(merged),
                }
            }
            (Some(terminal), None) | (None, Some(terminal)) => {
                self.unlink(&terminal);
                RemoveOutcome {
                    removed: terminal,
                    updated: None,
                }
            }
            (None, None) => return Err(TopologyError::StationNotOnLine(station)),
        };

        trace!(
            line = %self.line.id(),
            station = %station,
            removed = %outcome.removed,
            merged = outcome.updated.is_some(),
            "removed station"
        );
        Ok(outcome)
    }

    fn check_line(&self, section: &Section) -> Result<(), TopologyError> {
        if section.line() != &self.line {
            return Err(TopologyError::ForeignLine {
                expected: self.line.id(),
                found: section.line().id(),
            });
        }
        Ok(())
    }

    fn top_section(&self) -> &Section {
        self.by_up
            .values()
            .find(|s| !self.by_down.contains_key(&s.up_station().id()))
            .expect("a non-empty simple path has a top station")
    }

    fn bottom_section(&self) -> &Section {
        self.by_up
            .values()
            .find(|s| !self.by_up.contains_key(&s.down_station().id()))
            .expect("a non-empty simple path has a bottom station")
    }

    fn link(&mut self, section: Section) {
        self.by_down
            .insert(section.down_station().id(), section.up_station().id());
        self.by_up.insert(section.up_station().id(), section);
    }

    fn unlink(&mut self, section: &Section) {
        self.by_up.remove(&section.up_station().id());
        self.by_down.remove(&section.down_station().id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, SectionId};

    fn line() -> Line {
        Line::new(LineId(1), "Line 2", "green", 100).unwrap()
    }

    fn station(id: u64) -> Station {
        Station::new(StationId(id), format!("S{id}"))
    }

    fn section(id: u64, up: u64, down: u64, distance: i64) -> Section {
        Section::new(SectionId(id), line(), station(up), station(down), distance).unwrap()
    }

    /// (id, up, down, distance) for each section, top to bottom.
    fn shape(chain: &Sections) -> Vec<(u64, u64, u64, u32)> {
        chain
            .sorted_sections()
            .iter()
            .map(|s| {
                (
                    s.id().0,
                    s.up_station().id().0,
                    s.down_station().id().0,
                    s.distance(),
                )
            })
            .collect()
    }

    fn ids(stations: &[Station]) -> Vec<u64> {
        stations.iter().map(|s| s.id().0).collect()
    }

    #[test]
    fn reject_empty() {
        assert_eq!(Sections::new(vec![]).unwrap_err(), TopologyError::Empty);
    }

    #[test]
    fn reject_mixed_lines() {
        let other = Line::new(LineId(2), "Line 3", "orange", 0).unwrap();
        let foreign = Section::new(SectionId(2), other, station(2), station(3), 4).unwrap();
        let err = Sections::new(vec![section(1, 1, 2, 3), foreign]).unwrap_err();
        assert_eq!(
            err,
            TopologyError::ForeignLine {
                expected: LineId(1),
                found: LineId(2)
            }
        );
    }

    #[test]
    fn reject_branching() {
        let err = Sections::new(vec![section(1, 1, 2, 3), section(2, 1, 3, 4)]).unwrap_err();
        assert_eq!(err, TopologyError::Branching(StationId(1)));

        let err = Sections::new(vec![section(1, 1, 3, 3), section(2, 2, 3, 4)]).unwrap_err();
        assert_eq!(err, TopologyError::Branching(StationId(3)));
    }

    #[test]
    fn reject_gaps_and_cycles() {
        let gap = Sections::new(vec![section(1, 1, 2, 3), section(2, 3, 4, 4)]);
        assert_eq!(gap.unwrap_err(), TopologyError::Disconnected);

        let cycle = Sections::new(vec![section(1, 1, 2, 3), section(2, 2, 1, 4)]);
        assert_eq!(cycle.unwrap_err(), TopologyError::Disconnected);

        let path_and_cycle = Sections::new(vec![
            section(1, 1, 2, 3),
            section(2, 3, 4, 4),
            section(3, 4, 3, 4),
        ]);
        assert_eq!(path_and_cycle.unwrap_err(), TopologyError::Disconnected);
    }

    #[test]
    fn sorted_stations_from_unordered_input() {
        let chain = Sections::new(vec![
            section(3, 3, 4, 4),
            section(1, 1, 2, 1),
            section(2, 2, 3, 2),
        ])
        .unwrap();

        assert_eq!(ids(&chain.sorted_stations()), vec![1, 2, 3, 4]);
        assert_eq!(chain.top_station().id(), StationId(1));
        assert_eq!(chain.bottom_station().id(), StationId(4));
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
    }

    #[test]
    fn sorted_stations_is_restartable() {
        let chain = Sections::new(vec![section(2, 2, 3, 2), section(1, 1, 2, 1)]).unwrap();
        assert_eq!(chain.sorted_stations(), chain.sorted_stations());
    }

    #[test]
    fn add_rejects_unattached_section() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 2)]).unwrap();
        let err = chain.add_section(section(2, 3, 4, 2)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::NoSharedStation {
                up: StationId(3),
                down: StationId(4)
            }
        );
        assert_eq!(shape(&chain), vec![(1, 1, 2, 2)]);
    }

    #[test]
    fn add_rejects_existing_connection() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 2), section(2, 2, 3, 3)]).unwrap();
        let err = chain.add_section(section(3, 1, 3, 3)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::AlreadyConnected {
                up: StationId(1),
                down: StationId(3)
            }
        );
    }

    #[test]
    fn add_rejects_cycle() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 2), section(2, 2, 3, 3)]).unwrap();
        assert!(matches!(
            chain.add_section(section(3, 3, 1, 3)),
            Err(TopologyError::AlreadyConnected { .. })
        ));
    }

    #[test]
    fn add_rejects_foreign_line() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 2)]).unwrap();
        let other = Line::new(LineId(5), "Line 5", "purple", 0).unwrap();
        let foreign = Section::new(SectionId(2), other, station(2), station(3), 4).unwrap();
        assert!(matches!(
            chain.add_section(foreign),
            Err(TopologyError::ForeignLine { .. })
        ));
    }

    #[test]
    fn add_above_top() {
        let mut chain = Sections::new(vec![section(1, 2, 3, 3)]).unwrap();
        let outcome = chain.add_section(section(2, 1, 2, 4)).unwrap();

        assert_eq!(outcome.created.id(), SectionId(2));
        assert!(outcome.updated.is_none());
        assert_eq!(shape(&chain), vec![(2, 1, 2, 4), (1, 2, 3, 3)]);
    }

    #[test]
    fn add_below_bottom() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 3)]).unwrap();
        let outcome = chain.add_section(section(2, 2, 3, 4)).unwrap();

        assert!(outcome.updated.is_none());
        assert_eq!(shape(&chain), vec![(1, 1, 2, 3), (2, 2, 3, 4)]);
    }

    #[test]
    fn split_on_shared_up_station() {
        let mut chain = Sections::new(vec![section(2, 1, 3, 10)]).unwrap();
        let outcome = chain.add_section(section(1, 1, 2, 3)).unwrap();

        let updated = outcome.updated.unwrap();
        assert_eq!(updated.id(), SectionId(2));
        assert_eq!(updated.up_station().id(), StationId(2));
        assert_eq!(updated.distance(), 7);
        assert_eq!(shape(&chain), vec![(1, 1, 2, 3), (2, 2, 3, 7)]);
    }

    #[test]
    fn split_on_shared_down_station() {
        let mut chain = Sections::new(vec![section(2, 1, 3, 10)]).unwrap();
        let outcome = chain.add_section(section(1, 2, 3, 3)).unwrap();

        let updated = outcome.updated.unwrap();
        assert_eq!(updated.id(), SectionId(2));
        assert_eq!(updated.down_station().id(), StationId(2));
        assert_eq!(shape(&chain), vec![(2, 1, 2, 7), (1, 2, 3, 3)]);
    }

    #[test]
    fn split_inside_longer_line() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 5), section(2, 2, 4, 6)]).unwrap();
        chain.add_section(section(3, 2, 3, 2)).unwrap();
        assert_eq!(shape(&chain), vec![(1, 1, 2, 5), (3, 2, 3, 2), (2, 3, 4, 4)]);
    }

    #[test]
    fn worked_split_example() {
        let mut chain = Sections::new(vec![section(1, 1, 3, 10)]).unwrap();
        chain.add_section(section(2, 1, 2, 4)).unwrap();
        assert_eq!(shape(&chain), vec![(2, 1, 2, 4), (1, 2, 3, 6)]);

        let mut chain = Sections::new(vec![section(1, 1, 3, 10)]).unwrap();
        for distance in [10, 11] {
            assert!(matches!(
                chain.add_section(section(2, 1, 2, distance)),
                Err(TopologyError::SplitTooLong { existing: 10, .. })
            ));
        }
    }

    #[test]
    fn split_rejects_equal_or_longer() {
        for distance in [2, 3] {
            let mut chain = Sections::new(vec![section(2, 1, 3, 2)]).unwrap();
            let err = chain.add_section(section(1, 1, 2, distance)).unwrap_err();
            assert_eq!(
                err,
                TopologyError::SplitTooLong {
                    existing: 2,
                    candidate: distance as u32
                }
            );
            assert_eq!(shape(&chain), vec![(2, 1, 3, 2)]);

            let err = chain.add_section(section(1, 2, 3, distance)).unwrap_err();
            assert!(matches!(err, TopologyError::SplitTooLong { .. }));
        }
    }

    #[test]
    fn remove_rejects_absent_station() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 2)]).unwrap();
        assert_eq!(
            chain.remove_station(StationId(3)).unwrap_err(),
            TopologyError::StationNotOnLine(StationId(3))
        );
    }

    #[test]
    fn remove_rejects_single_section() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 2)]).unwrap();
        assert_eq!(
            chain.remove_station(StationId(2)).unwrap_err(),
            TopologyError::SingleSection
        );
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn remove_top_station() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 3), section(2, 2, 3, 4)]).unwrap();
        let outcome = chain.remove_station(StationId(1)).unwrap();

        assert_eq!(outcome.removed.id(), SectionId(1));
        assert!(outcome.updated.is_none());
        assert_eq!(shape(&chain), vec![(2, 2, 3, 4)]);
        assert_eq!(chain.top_station().id(), StationId(2));
    }

    #[test]
    fn remove_bottom_station() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 3), section(2, 2, 3, 4)]).unwrap();
        let outcome = chain.remove_station(StationId(3)).unwrap();

        assert_eq!(outcome.removed.id(), SectionId(2));
        assert!(outcome.updated.is_none());
        assert_eq!(shape(&chain), vec![(1, 1, 2, 3)]);
        assert_eq!(chain.bottom_station().id(), StationId(2));
    }

    #[test]
    fn remove_interior_station_merges() {
        let mut chain = Sections::new(vec![section(1, 1, 2, 3), section(2, 2, 3, 4)]).unwrap();
        let outcome = chain.remove_station(StationId(2)).unwrap();

        assert_eq!(outcome.removed.id(), SectionId(2));
        let merged = outcome.updated.unwrap();
        assert_eq!(merged.id(), SectionId(1));
        assert_eq!(merged.distance(), 7);
        assert_eq!(shape(&chain), vec![(1, 1, 3, 7)]);
        assert!(!chain.contains_station(StationId(2)));
    }
}
