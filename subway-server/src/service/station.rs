//! Station registration.

use tracing::info;

use super::ServiceError;
use crate::domain::Station;
use crate::store::NetworkStore;

/// Registers and lists stations.
#[derive(Debug)]
pub struct StationService<'a, S> {
    store: &'a S,
}

impl<'a, S: NetworkStore> StationService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register a new station under a freshly allocated id.
    pub async fn create_station(&self, name: impl Into<String>) -> Result<Station, ServiceError> {
        let station = Station::new(self.store.next_station_id(), name);
        self.store.insert_station(station.clone()).await?;
        info!(station = %station.id(), name = station.name(), "station created");
        Ok(station)
    }

    pub async fn stations(&self) -> Vec<Station> {
        self.store.stations().await
    }
}
