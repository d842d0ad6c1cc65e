//! Line types.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::DomainError;

/// Identifier of a line, allocated by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, colored service with a per-trip surcharge.
///
/// The surcharge ("extra fare") is never negative; this is checked at
/// construction. Equality is by id only.
///
/// # Examples
///
/// ```
/// use subway_server::domain::{Line, LineId};
///
/// let line = Line::new(LineId(2), "Line 2", "green", 100).unwrap();
/// assert_eq!(line.extra_fare(), 100);
///
/// assert!(Line::new(LineId(2), "Line 2", "green", -1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Line {
    id: LineId,
    name: String,
    color: String,
    extra_fare: u32,
}

impl Line {
    /// Create a line, rejecting a negative surcharge.
    pub fn new(
        id: LineId,
        name: impl Into<String>,
        color: impl Into<String>,
        extra_fare: i64,
    ) -> Result<Self, DomainError> {
        let extra_fare =
            u32::try_from(extra_fare).map_err(|_| DomainError::NegativeExtraFare(extra_fare))?;
        Ok(Self {
            id,
            name: name.into(),
            color: color.into(),
            extra_fare,
        })
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Surcharge added once per trip when this line is the most expensive used.
    pub fn extra_fare(&self) -> u32 {
        self.extra_fare
    }

    /// Returns true if this line is called `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Line {}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
