//! Shortest-path strategies.

use pathfinding::prelude::dijkstra;
use tracing::debug;

use crate::domain::{Line, Station, StationId};

use super::{PathError, PathGraph};

/// A path found through the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    stations: Vec<Station>,
    distance: u64,
    used_lines: Vec<Line>,
}

impl Path {
    /// Create a path from its parts.
    pub fn new(stations: Vec<Station>, distance: u64, used_lines: Vec<Line>) -> Self {
        Self {
            stations,
            distance,
            used_lines,
        }
    }

    /// Stations from source to destination.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Total distance, the sum of the edges ridden.
    pub fn distance(&self) -> u64 {
        self.distance
    }

    /// Distinct lines whose edges make up the path, in order of first use.
    pub fn used_lines(&self) -> &[Line] {
        &self.used_lines
    }
}

/// Capability to find a minimum-weight path through a `PathGraph`.
///
/// This abstraction lets the path service swap algorithms without touching
/// fare or chain logic.
pub trait ShortestPathStrategy {
    /// Find the shortest path from `source` to `target`.
    ///
    /// Implementations must be deterministic for a given graph.
    fn find_path(
        &self,
        graph: &PathGraph,
        source: StationId,
        target: StationId,
    ) -> Result<Path, PathError>;
}

/// Dijkstra's single-source shortest-path search.
///
/// Lines are attributed after the path is fixed: between two consecutive
/// stations the shortest parallel edge is the one ridden, whatever its
/// surcharge.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraStrategy;

impl ShortestPathStrategy for DijkstraStrategy {
    fn find_path(
        &self,
        graph: &PathGraph,
        source: StationId,
        target: StationId,
    ) -> Result<Path, PathError> {
        graph.check_endpoints(source, target)?;

        let (ids, distance) = dijkstra(
            &source,
            |id| {
                graph
                    .neighbours(*id)
                    .map(|(next, d)| (next, u64::from(d)))
                    .collect::<Vec<_>>()
            },
            |id| *id == target,
        )
        .ok_or(PathError::NotConnected {
            from: source,
            to: target,
        })?;

        let mut used_lines: Vec<Line> = Vec::new();
        for pair in ids.windows(2) {
            let (_, line) = graph
                .shortest_edge(pair[0], pair[1])
                .ok_or(PathError::NotConnected {
                    from: pair[0],
                    to: pair[1],
                })?;
            if !used_lines.contains(line) {
                used_lines.push(line.clone());
            }
        }

        let stations = ids
            .iter()
            .filter_map(|id| graph.station(*id).cloned())
            .collect::<Vec<_>>();

        debug!(
            source = %source,
            target = %target,
            stations = stations.len(),
            distance,
            lines = used_lines.len(),
            "shortest path found"
        );

        Ok(Path::new(stations, distance, used_lines))
    }
}
