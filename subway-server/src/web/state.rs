//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::fare::FareCalculator;
use crate::path::DijkstraStrategy;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains everything the services need to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Stations, lines and sections
    pub store: MemoryStore,

    /// Held while a section edit runs
    pub section_edits: Arc<Mutex<()>>,

    /// Shortest-path algorithm for fare queries
    pub strategy: DijkstraStrategy,

    /// Fare table and discount policy
    pub fares: Arc<FareCalculator>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: MemoryStore, fares: FareCalculator) -> Self {
        Self {
            store,
            section_edits: Arc::new(Mutex::new(())),
            strategy: DijkstraStrategy,
            fares: Arc::new(fares),
        }
    }
}
