//! Station types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier of a station, allocated by the store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub u64);

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station on the network.
///
/// Stations are small value records: they are cloned wherever a section or
/// path needs them. Two stations are equal iff their ids match, so a renamed
/// copy still compares equal to the original.
///
/// # Examples
///
/// ```
/// use subway_server::domain::{Station, StationId};
///
/// let a = Station::new(StationId(1), "Gangnam");
/// let b = Station::new(StationId(1), "Gangnam (renamed)");
/// assert_eq!(a, b);
/// assert_eq!(a.name(), "Gangnam");
/// ```
#[derive(Debug, Clone)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Create a station record.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
