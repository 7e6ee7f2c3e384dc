//! Shortest-path search over user-defined graphs.
//!
//! This crate provides:
//!
//! - the [`Graph`] trait, implemented by callers over their own storage
//!   (cell grids, adjacency matrices, named-vertex maps, ...),
//! - **Dijkstra** single-source search ([`GraphExt::shortest_paths`]) with
//!   predecessor-based path reconstruction ([`ShortestPaths::path_to`],
//!   [`GraphExt::path`]) and an all-pairs helper
//!   ([`GraphExt::distance_table`]),
//! - a double-ended [`PriorityQueue`] backed by a min-max heap.
//!
//! Unreachable targets are never errors: they are simply absent from the
//! result maps, and reconstructing a path to them yields an empty list.

mod dijkstra;
mod pqueue;
mod traits;

pub use dijkstra::{GraphExt, ShortestPaths, UNREACHABLE, dijkstra};
pub use pqueue::PriorityQueue;
pub use traits::Graph;
