//! Double-ended priority queue.
//!
//! Entries are stored in a min-max heap keyed by `(priority, element)`.
//! Even levels of the heap hold local minima and odd levels local maxima,
//! so both the smallest and the largest entry are reachable in O(1) and
//! removable in O(log n).

use std::cmp::Ordering;

/// An entry in the queue. Field order gives the derived ordering: priority
/// first, the element only as a tiebreaker.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry<T> {
    priority: i64,
    element: T,
}

/// A priority queue that can pop from either end.
///
/// [`pop_first`](Self::pop_first) returns the entry with the lowest priority
/// and [`pop_last`](Self::pop_last) the one with the highest. Entries with
/// equal priority come out in the element's natural order (ascending from
/// the front, descending from the back). Duplicates are allowed and there
/// is no decrease-key: callers that need one insert again and ignore the
/// stale entry when it surfaces.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<Entry<T>>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Add `element` with the given priority.
    pub fn insert(&mut self, element: T, priority: i64) {
        self.heap.push(Entry { priority, element });
        self.bubble_up(self.heap.len() - 1);
    }

    /// The lowest-priority entry, without removing it.
    pub fn peek_first(&self) -> Option<(&T, i64)> {
        self.heap.first().map(|e| (&e.element, e.priority))
    }

    /// The highest-priority entry, without removing it.
    pub fn peek_last(&self) -> Option<(&T, i64)> {
        let i = self.last_index()?;
        let e = &self.heap[i];
        Some((&e.element, e.priority))
    }

    /// Remove and return the lowest-priority entry.
    pub fn pop_first(&mut self) -> Option<(T, i64)> {
        if self.heap.is_empty() {
            return None;
        }
        let entry = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.trickle_down(0);
        }
        Some((entry.element, entry.priority))
    }

    /// Remove and return the highest-priority entry.
    pub fn pop_last(&mut self) -> Option<(T, i64)> {
        let i = self.last_index()?;
        let entry = self.heap.swap_remove(i);
        if i < self.heap.len() {
            self.trickle_down(i);
        }
        Some((entry.element, entry.priority))
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    /// Index of the maximum entry: the root or one of its children.
    fn last_index(&self) -> Option<usize> {
        match self.heap.len() {
            0 => None,
            1 => Some(0),
            2 => Some(1),
            _ if self.heap[1] >= self.heap[2] => Some(1),
            _ => Some(2),
        }
    }

    fn bubble_up(&mut self, i: usize) {
        if i == 0 {
            return;
        }
        let parent = (i - 1) / 2;
        let ord = level_order(i);
        if self.heap[i].cmp(&self.heap[parent]) == ord.reverse() {
            // Belongs on the parent's level.
            self.heap.swap(i, parent);
            self.bubble_up_grand(parent, ord.reverse());
        } else {
            self.bubble_up_grand(i, ord);
        }
    }

    fn bubble_up_grand(&mut self, mut i: usize, ord: Ordering) {
        while i > 2 {
            let grandparent = ((i - 1) / 2 - 1) / 2;
            if self.heap[i].cmp(&self.heap[grandparent]) != ord {
                break;
            }
            self.heap.swap(i, grandparent);
            i = grandparent;
        }
    }

    fn trickle_down(&mut self, mut i: usize) {
        let ord = level_order(i);
        loop {
            let Some(m) = self.extreme_descendant(i, ord) else {
                break;
            };
            if self.heap[m].cmp(&self.heap[i]) != ord {
                break;
            }
            self.heap.swap(i, m);

            // Children are settled after one swap, grandchildren may need to
            // trade places with their new parent and keep sinking.
            if m <= 2 * i + 2 {
                break;
            }
            let parent = (m - 1) / 2;
            if self.heap[m].cmp(&self.heap[parent]) == ord.reverse() {
                self.heap.swap(m, parent);
            }
            i = m;
        }
    }

    /// Among the children and grandchildren of `i`, the index that sorts
    /// furthest in direction `ord`.
    fn extreme_descendant(&self, i: usize, ord: Ordering) -> Option<usize> {
        let len = self.heap.len();
        let first_child = 2 * i + 1;
        let first_grandchild = 2 * first_child + 1;
        let children = first_child..(first_child + 2).min(len);
        let grandchildren = first_grandchild..(first_grandchild + 4).min(len);
        children.chain(grandchildren).reduce(|best, j| {
            if self.heap[j].cmp(&self.heap[best]) == ord {
                j
            } else {
                best
            }
        })
    }
}

/// `Less` on min levels, `Greater` on max levels.
#[inline]
fn level_order(i: usize) -> Ordering {
    if (i + 1).ilog2() % 2 == 0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<(T, i64)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, i64)>>(&mut self, iter: I) {
        for (element, priority) in iter {
            self.insert(element, priority);
        }
    }
}

impl<T: Ord> FromIterator<(T, i64)> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = (T, i64)>>(iter: I) -> Self {
        let mut q = Self::new();
        q.extend(iter);
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;

    #[test]
    fn empty_queue() {
        let mut q = PriorityQueue::<u8>::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.peek_first(), None);
        assert_eq!(q.peek_last(), None);
        assert_eq!(q.pop_first(), None);
        assert_eq!(q.pop_last(), None);
    }

    #[test]
    fn pop_first_orders_by_priority() {
        let mut q = PriorityQueue::new();
        q.insert("a", 3);
        q.insert("b", 1);
        q.insert("c", 2);

        assert_eq!(q.pop_first(), Some(("b", 1)));
        assert_eq!(q.pop_first(), Some(("c", 2)));
        assert_eq!(q.pop_first(), Some(("a", 3)));
        assert_eq!(q.pop_first(), None);
    }

    #[test]
    fn pop_last_orders_by_priority() {
        let mut q: PriorityQueue<_> = [("a", 3), ("b", -1), ("c", 2)].into_iter().collect();
        assert_eq!(q.pop_last(), Some(("a", 3)));
        assert_eq!(q.pop_last(), Some(("c", 2)));
        assert_eq!(q.pop_last(), Some(("b", -1)));
        assert_eq!(q.pop_last(), None);
    }

    #[test]
    fn ties_break_on_element_order() {
        // x sorts after y, z has the lowest priority.
        let (x, y, z) = (20, 10, 30);
        let mut q = PriorityQueue::new();
        q.insert(x, 5);
        q.insert(y, 5);
        q.insert(z, 1);

        let mut front = q.clone();
        assert_eq!(front.pop_first(), Some((z, 1)));
        assert_eq!(front.pop_first(), Some((y, 5)));
        assert_eq!(front.pop_first(), Some((x, 5)));

        assert_eq!(q.pop_last(), Some((x, 5)));
        assert_eq!(q.pop_last(), Some((y, 5)));
        assert_eq!(q.pop_last(), Some((z, 1)));
    }

    #[test]
    fn element_never_outranks_priority() {
        let mut q = PriorityQueue::new();
        q.insert(0, 9);
        q.insert(100, 2);
        assert_eq!(q.pop_first(), Some((100, 2)));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut q = PriorityQueue::new();
        q.insert('p', 4);
        q.insert('p', 4);
        q.insert('p', 1);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop_first(), Some(('p', 1)));
        assert_eq!(q.pop_first(), Some(('p', 4)));
        assert_eq!(q.pop_first(), Some(('p', 4)));
        assert!(q.is_empty());
    }

    #[test]
    fn peek_matches_pop() {
        let mut q = PriorityQueue::new();
        q.extend([(1u8, 7), (2, -3), (3, 12), (4, 0)]);
        assert_eq!(q.peek_first(), Some((&2, -3)));
        assert_eq!(q.peek_last(), Some((&3, 12)));
        assert_eq!(q.len(), 4);
        assert_eq!(q.pop_last(), Some((3, 12)));
        assert_eq!(q.peek_last(), Some((&1, 7)));
    }

    #[test]
    fn drains_in_order_from_both_ends() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut entries: Vec<(i64, u32)> = (0..500)
            .map(|_| (rng.random_range(-50..50), rng.random_range(0..20)))
            .collect();

        let mut front = PriorityQueue::new();
        let mut back = PriorityQueue::new();
        for &(p, e) in &entries {
            front.insert(e, p);
            back.insert(e, p);
        }
        entries.sort();

        let popped: Vec<_> = std::iter::from_fn(|| front.pop_first())
            .map(|(e, p)| (p, e))
            .collect();
        assert_eq!(popped, entries);

        let popped: Vec<_> = std::iter::from_fn(|| back.pop_last())
            .map(|(e, p)| (p, e))
            .collect();
        entries.reverse();
        assert_eq!(popped, entries);
    }

    #[test]
    fn interleaved_operations_match_sorted_model() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut q = PriorityQueue::new();
        let mut model: VecDeque<(i64, u16)> = VecDeque::new();

        for _ in 0..2_000 {
            match rng.random_range(0..4) {
                0 | 1 => {
                    let (p, e) = (rng.random_range(-100..100), rng.random_range(0..50));
                    q.insert(e, p);
                    let at = model.partition_point(|&x| x < (p, e));
                    model.insert(at, (p, e));
                }
                2 => {
                    let expected = model.pop_front().map(|(p, e)| (e, p));
                    assert_eq!(q.pop_first(), expected);
                }
                _ => {
                    let expected = model.pop_back().map(|(p, e)| (e, p));
                    assert_eq!(q.pop_last(), expected);
                }
            }
            assert_eq!(q.len(), model.len());
        }
    }
}
