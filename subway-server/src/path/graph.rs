//! The station graph used for path search.

use std::collections::BTreeMap;

use crate::domain::{Line, Section, Station, StationId};

use super::PathError;

/// One direction of a section, as seen from its start.
#[derive(Debug, Clone)]
struct Edge {
    to: StationId,
    distance: u32,
    line: Line,
}

/// Weighted undirected multigraph over every station of every line.
///
/// Each section contributes an edge in both directions, tagged with the
/// section's line. Parallel edges from different lines are all kept so the
/// line actually ridden can be attributed once a path is fixed.
///
/// Built fresh for each query and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct PathGraph {
    stations: BTreeMap<StationId, Station>,
    edges: BTreeMap<StationId, Vec<Edge>>,
}

impl PathGraph {
    /// Build the graph from the sections of all lines.
    pub fn from_sections<'a>(sections: impl IntoIterator<Item = &'a Section>) -> Self {
        let mut graph = Self::default();
        for section in sections {
            graph.add_section(section);
        }
        graph
    }

    fn add_section(&mut self, section: &Section) {
        let up = section.up_station();
        let down = section.down_station();
        self.stations.entry(up.id()).or_insert_with(|| up.clone());
        self.stations.entry(down.id()).or_insert_with(|| down.clone());

        for (from, to) in [(up.id(), down.id()), (down.id(), up.id())] {
            self.edges.entry(from).or_default().push(Edge {
                to,
                distance: section.distance(),
                line: section.line().clone(),
            });
        }
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Returns true if any section touches `id`.
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// Number of stations in the graph.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of sections in the graph (each counted once).
    pub fn section_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Neighbours of `id` with the edge distance, one entry per edge.
    pub fn neighbours(&self, id: StationId) -> impl Iterator<Item = (StationId, u32)> + '_ {
        self.edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(|edge| (edge.to, edge.distance))
    }

    /// The shortest edge between two adjacent stations and its line.
    ///
    /// Among equally short parallel edges the one added first wins.
    pub fn shortest_edge(&self, from: StationId, to: StationId) -> Option<(u32, &Line)> {
        self.edges
            .get(&from)?
            .iter()
            .filter(|edge| edge.to == to)
            .min_by_key(|edge| edge.distance)
            .map(|edge| (edge.distance, &edge.line))
    }

    /// Check that a query's endpoints are distinct stations on the graph.
    pub fn check_endpoints(&self, source: StationId, target: StationId) -> Result<(), PathError> {
        for id in [source, target] {
            if !self.contains(id) {
                return Err(PathError::UnknownStation(id));
            }
        }
        if source == target {
            return Err(PathError::SameStation(source));
        }
        Ok(())
    }
}
