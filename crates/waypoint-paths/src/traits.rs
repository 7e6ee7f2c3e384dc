use std::hash::Hash;

/// A finite, weighted graph that search algorithms can query.
///
/// Implementors own their storage (a cell grid, an adjacency matrix, ...)
/// and decide what adjacency means. Algorithms only ever read through this
/// interface and never mutate the graph.
pub trait Graph {
    /// Value stored at each index.
    type Element;

    /// Key identifying a vertex. The ordering is used to break ties between
    /// equally distant vertices, so searches are deterministic.
    type Index: Ord + Hash + Clone;

    /// The value stored at `index`.
    ///
    /// # Panics
    ///
    /// Implementations panic when `index` is not part of the graph.
    fn element(&self, index: &Self::Index) -> &Self::Element;

    /// Append the vertices reachable in one step from `index` into `buf`.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, index: &Self::Index, buf: &mut Vec<Self::Index>);

    /// Cost of the step from `from` to `to`. Must be non-negative.
    fn distance(&self, from: &Self::Index, to: &Self::Index) -> i64;

    /// Every valid index.
    fn indices(&self) -> Vec<Self::Index>;

    /// Number of valid indices.
    fn count(&self) -> usize {
        self.indices().len()
    }
}
