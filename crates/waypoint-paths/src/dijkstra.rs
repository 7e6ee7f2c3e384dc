use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, trace};
use waypoint_core::List;

use crate::pqueue::PriorityQueue;
use crate::traits::Graph;

/// Sentinel priority meaning "unreachable". A search stops as soon as the
/// cheapest remaining entry carries it.
pub const UNREACHABLE: i64 = i64::MAX;

/// Result of a single-source shortest-path query.
///
/// Only indices reached by the search appear in the maps; absence means no
/// finite path is known. The source maps to distance 0 and never has a
/// predecessor.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(deserialize = "I: serde::Deserialize<'de> + Eq + Hash"))
)]
pub struct ShortestPaths<I> {
    source: I,
    distances: HashMap<I, i64>,
    previous: HashMap<I, I>,
}

impl<I: Eq + Hash + Clone> ShortestPaths<I> {
    /// The index the query started from.
    #[inline]
    pub fn source(&self) -> &I {
        &self.source
    }

    /// Shortest known distance from the source, or `None` if unreachable.
    #[inline]
    pub fn distance_to(&self, index: &I) -> Option<i64> {
        self.distances.get(index).copied()
    }

    /// Predecessor of `index` on its shortest path.
    #[inline]
    pub fn previous(&self, index: &I) -> Option<&I> {
        self.previous.get(index)
    }

    /// Whether the search reached `index`.
    #[inline]
    pub fn is_reachable(&self, index: &I) -> bool {
        self.distances.contains_key(index)
    }

    /// Distance map of every reached index.
    pub fn distances(&self) -> &HashMap<I, i64> {
        &self.distances
    }

    /// Predecessor map of every reached index except the source.
    pub fn predecessors(&self) -> &HashMap<I, I> {
        &self.previous
    }

    /// Take both maps, distances first.
    pub fn into_maps(self) -> (HashMap<I, i64>, HashMap<I, I>) {
        (self.distances, self.previous)
    }

    /// Walk predecessors back from `end` to the source.
    ///
    /// Returns the path including both endpoints, or the empty list if `end`
    /// was not reached. The path to the source itself is `[source]`.
    pub fn path_to(&self, end: &I) -> List<I> {
        let mut path = List::new();
        let mut current = end.clone();
        while current != self.source {
            let Some(prev) = self.previous.get(&current) else {
                return List::new();
            };
            path = path.prepend(current);
            current = prev.clone();
        }
        path.prepend(current)
    }
}

/// Run Dijkstra's algorithm from `start` over every reachable index.
///
/// Costs must be non-negative. An index may sit in the queue several times
/// with different priorities; entries worse than the recorded distance are
/// stale and skipped when popped. A route whose cost reaches
/// [`UNREACHABLE`] is never recorded.
pub fn dijkstra<G: Graph + ?Sized>(graph: &G, start: &G::Index) -> ShortestPaths<G::Index> {
    let mut distances = HashMap::from([(start.clone(), 0)]);
    let mut previous = HashMap::new();

    let mut open = PriorityQueue::new();
    open.insert(start.clone(), 0);

    let mut nbuf = Vec::new();
    let mut settled = 0usize;

    while let Some((current, current_distance)) = open.pop_first() {
        if current_distance == UNREACHABLE {
            break;
        }
        if distances
            .get(&current)
            .is_some_and(|&best| current_distance > best)
        {
            continue;
        }
        settled += 1;
        trace!("settled index at distance {current_distance}");

        nbuf.clear();
        graph.neighbors(&current, &mut nbuf);

        for neighbor in nbuf.drain(..) {
            let candidate =
                current_distance.saturating_add(graph.distance(&current, &neighbor));
            if candidate == UNREACHABLE {
                continue;
            }
            let improves = distances
                .get(&neighbor)
                .is_none_or(|&known| candidate < known);
            if improves {
                previous.insert(neighbor.clone(), current.clone());
                distances.insert(neighbor.clone(), candidate);
                open.insert(neighbor, candidate);
            }
        }
    }

    debug!(
        "dijkstra: settled {settled} indices, reached {} of {}",
        distances.len(),
        graph.count()
    );

    ShortestPaths {
        source: start.clone(),
        distances,
        previous,
    }
}

/// Search operations available on every [`Graph`].
pub trait GraphExt: Graph {
    /// Single-source shortest distances and predecessors from `start`.
    fn shortest_paths(&self, start: &Self::Index) -> ShortestPaths<Self::Index> {
        dijkstra(self, start)
    }

    /// Shortest path from `start` to `end`, both included.
    ///
    /// Returns the empty list when `end` is unreachable. When `start == end`
    /// the path is `[start]`.
    fn path(&self, start: &Self::Index, end: &Self::Index) -> List<Self::Index> {
        self.shortest_paths(start).path_to(end)
    }

    /// Shortest distances between every pair of connected indices, keyed by
    /// source. Runs one query per index.
    fn distance_table(&self) -> HashMap<Self::Index, HashMap<Self::Index, i64>> {
        self.indices()
            .into_iter()
            .map(|index| {
                let (distances, _) = self.shortest_paths(&index).into_maps();
                (index, distances)
            })
            .collect()
    }
}

impl<G: Graph + ?Sized> GraphExt for G {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    struct Chain;

    impl Graph for Chain {
        type Element = ();
        type Index = u32;

        fn element(&self, _index: &u32) -> &() {
            &()
        }

        fn neighbors(&self, index: &u32, buf: &mut Vec<u32>) {
            if *index < 3 {
                buf.push(index + 1);
            }
        }

        fn distance(&self, _from: &u32, _to: &u32) -> i64 {
            2
        }

        fn indices(&self) -> Vec<u32> {
            vec![0, 1, 2, 3]
        }
    }

    #[test]
    fn shortest_paths_round_trip() {
        let sp = Chain.shortest_paths(&0);
        let json = serde_json::to_string(&sp).unwrap();
        let back: ShortestPaths<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.source(), &0);
        assert_eq!(back.distances(), sp.distances());
        assert_eq!(back.predecessors(), sp.predecessors());
        assert_eq!(back.path_to(&3), List::from([0, 1, 2, 3]));
    }
}
