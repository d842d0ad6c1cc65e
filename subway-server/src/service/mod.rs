//! Application services.
//!
//! Services load records from a `NetworkStore`, run the core (section chains,
//! path search, fares) over them and write the outcome back.

mod line;
mod path;
mod station;

pub use line::{LineDetail, LineService, NewLine, NewSection};
pub use path::{PathReport, PathService};
pub use station::StationService;

use crate::domain::DomainError;
use crate::fare::FareError;
use crate::path::PathError;
use crate::sections::TopologyError;
use crate::store::StoreError;

/// Any failure surfaced by a service call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Fare(#[from] FareError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
