//! Section types.
//!
//! A `Section` is one edge of a line: it runs from an up-station to a
//! down-station over a positive distance.

use std::fmt;

use super::{DomainError, Line, Station};

/// Identifier of a section, allocated by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(pub u64);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An edge between two stations on one line.
///
/// # Invariants
///
/// - `distance > 0`
/// - `up_station != down_station`
///
/// The direction (up → down) only matters for the ordering of a line's
/// chain. Path search treats sections as undirected.
#[derive(Debug, Clone)]
pub struct Section {
    id: SectionId,
    line: Line,
    up_station: Station,
    down_station: Station,
    distance: u32,
}

impl Section {
    /// Create a section, validating its distance and endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use subway_server::domain::{Line, LineId, Section, SectionId, Station, StationId};
    ///
    /// let line = Line::new(LineId(1), "Line 2", "green", 0).unwrap();
    /// let a = Station::new(StationId(1), "A");
    /// let b = Station::new(StationId(2), "B");
    ///
    /// let section = Section::new(SectionId(1), line.clone(), a.clone(), b, 5).unwrap();
    /// assert_eq!(section.distance(), 5);
    ///
    /// assert!(Section::new(SectionId(2), line.clone(), a.clone(), a.clone(), 5).is_err());
    /// assert!(Section::new(SectionId(3), line, a, Station::new(StationId(3), "C"), 0).is_err());
    /// ```
    pub fn new(
        id: SectionId,
        line: Line,
        up_station: Station,
        down_station: Station,
        distance: i64,
    ) -> Result<Self, DomainError> {
        if distance <= 0 {
            return Err(DomainError::NonPositiveDistance(distance));
        }
        let distance =
            u32::try_from(distance).map_err(|_| DomainError::DistanceOverflow(distance))?;
        if up_station == down_station {
            return Err(DomainError::SameStation(up_station.id()));
        }
        Ok(Self {
            id,
            line,
            up_station,
            down_station,
            distance,
        })
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn up_station(&self) -> &Station {
        &self.up_station
    }

    pub fn down_station(&self) -> &Station {
        &self.down_station
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Returns true if `station` is either end of this section.
    pub fn touches(&self, station: &Station) -> bool {
        &self.up_station == station || &self.down_station == station
    }

    /// Same section id and line, re-pointed at new ends.
    ///
    /// Callers keep the invariants: distinct ends and a positive distance.
    pub(crate) fn reshaped(
        &self,
        up_station: Station,
        down_station: Station,
        distance: u32,
    ) -> Self {
        debug_assert!(distance > 0);
        debug_assert!(up_station != down_station);
        Self {
            id: self.id,
            line: self.line.clone(),
            up_station,
            down_station,
            distance,
        }
    }
}

/// Sections are the same section iff their ids match.
impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Section {}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}km, line {})",
            self.up_station.name(),
            self.down_station.name(),
            self.distance,
            self.line.id()
        )
    }
}
