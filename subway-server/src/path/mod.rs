//! Shortest-path search over the whole network.
//!
//! A `PathGraph` is assembled from every line's sections for each query, and
//! a `ShortestPathStrategy` finds the minimum-distance route through it. The
//! resulting `Path` records which lines were ridden so the fare can be priced.

mod error;
mod graph;
mod strategy;

pub use error::PathError;
pub use graph::PathGraph;
pub use strategy::{DijkstraStrategy, Path, ShortestPathStrategy};
