//! Shortest-path fare queries.

use tracing::info;

use super::ServiceError;
use crate::domain::{Station, StationId};
use crate::fare::{AgeDiscountPolicy, DiscountPolicy, FareCalculator};
use crate::path::{DijkstraStrategy, PathGraph, ShortestPathStrategy};
use crate::store::NetworkStore;

/// Answer to a path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    /// Stations from source to target inclusive
    pub stations: Vec<Station>,

    /// Total distance in km
    pub distance: u64,

    /// Fare after surcharge and discount
    pub fare: u64,
}

/// Finds the shortest route between two stations and prices it.
///
/// Each query builds a fresh `PathGraph` from every stored section.
#[derive(Debug)]
pub struct PathService<
    'a,
    S,
    Q: ShortestPathStrategy = DijkstraStrategy,
    P: DiscountPolicy = AgeDiscountPolicy,
> {
    store: &'a S,
    strategy: &'a Q,
    fares: &'a FareCalculator<P>,
}

impl<'a, S, Q, P> PathService<'a, S, Q, P>
where
    S: NetworkStore,
    Q: ShortestPathStrategy,
    P: DiscountPolicy,
{
    pub fn new(store: &'a S, strategy: &'a Q, fares: &'a FareCalculator<P>) -> Self {
        Self {
            store,
            strategy,
            fares,
        }
    }

    /// Shortest path from `source` to `target`, priced for a rider of `age`.
    pub async fn find_path(
        &self,
        source: StationId,
        target: StationId,
        age: u32,
    ) -> Result<PathReport, ServiceError> {
        let sections = self.store.all_sections().await;
        let graph = PathGraph::from_sections(&sections);

        let path = self.strategy.find_path(&graph, source, target)?;
        let fare = self.fares.calculate_path(&path, age)?;

        info!(
            source = %source,
            target = %target,
            distance = path.distance(),
            fare,
            "path found"
        );
        Ok(PathReport {
            stations: path.stations().to_vec(),
            distance: path.distance(),
            fare,
        })
    }
}
