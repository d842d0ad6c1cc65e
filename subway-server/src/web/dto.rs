//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Station, StationId};
use crate::service::{LineDetail, NewLine, NewSection, PathReport};

/// Request to register a station.
#[derive(Debug, Deserialize)]
pub struct CreateStationRequest {
    pub name: String,
}

/// A station.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

/// Request to open a line with its first section.
#[derive(Debug, Deserialize)]
pub struct CreateLineRequest {
    pub name: String,

    pub color: String,

    /// Surcharge added to any trip riding this line
    #[serde(default)]
    pub extra_fare: i64,

    pub up_station_id: u64,

    pub down_station_id: u64,

    /// Length of the first section in km
    pub distance: i64,
}

/// A line with its stations in travel order.
#[derive(Debug, Serialize)]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub extra_fare: u32,
    pub stations: Vec<StationResponse>,
}

/// Request to add a section to a line.
#[derive(Debug, Deserialize)]
pub struct AddSectionRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Station to take off a line.
#[derive(Debug, Deserialize)]
pub struct RemoveStationQuery {
    pub station_id: u64,
}

/// Shortest-path query.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub source: u64,
    pub target: u64,

    /// Rider's age, used for discounts
    pub age: u32,
}

/// Shortest path with its fare.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    /// Stations from source to target inclusive
    pub stations: Vec<StationResponse>,

    /// Total distance in km
    pub distance: u64,

    pub fare: u64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Station> for StationResponse {
    fn from(station: &Station) -> Self {
        Self {
            id: station.id().0,
            name: station.name().to_string(),
        }
    }
}

impl From<CreateLineRequest> for NewLine {
    fn from(req: CreateLineRequest) -> Self {
        Self {
            name: req.name,
            color: req.color,
            extra_fare: req.extra_fare,
            up_station: StationId(req.up_station_id),
            down_station: StationId(req.down_station_id),
            distance: req.distance,
        }
    }
}

impl From<AddSectionRequest> for NewSection {
    fn from(req: AddSectionRequest) -> Self {
        Self {
            up_station: StationId(req.up_station_id),
            down_station: StationId(req.down_station_id),
            distance: req.distance,
        }
    }
}

impl From<&LineDetail> for LineResponse {
    fn from(detail: &LineDetail) -> Self {
        Self {
            id: detail.line.id().0,
            name: detail.line.name().to_string(),
            color: detail.line.color().to_string(),
            extra_fare: detail.line.extra_fare(),
            stations: detail.stations.iter().map(StationResponse::from).collect(),
        }
    }
}

impl From<&PathReport> for PathResponse {
    fn from(report: &PathReport) -> Self {
        Self {
            stations: report.stations.iter().map(StationResponse::from).collect(),
            distance: report.distance,
            fare: report.fare,
        }
    }
}
