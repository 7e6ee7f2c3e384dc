//! A persistent singly-linked list.
//!
//! [`List`] is an immutable cons-list. Every "modification" builds new head
//! nodes on top of an existing tail, and tails are shared between lists
//! through reference counting, so cloning a list is O(1) and never copies
//! elements.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::rc::Rc;

struct Node<T> {
    value: T,
    next: List<T>,
}

/// An immutable cons-list with structurally shared tails.
///
/// A `List` is either empty or a head element followed by another `List`.
/// Nodes are never mutated once created, which makes cycles impossible.
///
/// `List<T>` is itself an [`Iterator`] when `T: Clone`: iterating advances
/// the handle to each successive tail, leaving other handles to the same
/// nodes untouched. Keep a clone of the original handle to iterate again, or
/// use [`iter`](Self::iter) to borrow the elements instead.
pub struct List<T> {
    head: Option<Rc<Node<T>>>,
}

impl<T> List<T> {
    /// The empty list.
    #[inline]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// A list holding exactly one element.
    pub fn singleton(value: T) -> Self {
        Self::cons(value, Self::new())
    }

    fn cons(value: T, tail: List<T>) -> Self {
        Self {
            head: Some(Rc::new(Node { value, next: tail })),
        }
    }

    /// Return a new list with `value` in front of `self`.
    ///
    /// `self` is left unchanged and becomes the tail of the result.
    pub fn prepend(&self, value: T) -> Self {
        Self::cons(value, self.clone())
    }

    /// Split into the head element and the tail list.
    ///
    /// Returns `None` for the empty list.
    pub fn pop(&self) -> Option<(&T, List<T>)> {
        self.head
            .as_deref()
            .map(|node| (&node.value, node.next.clone()))
    }

    /// The first element, if any.
    #[inline]
    pub fn head(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Everything after the first element, or `None` for the empty list.
    #[inline]
    pub fn tail(&self) -> Option<&List<T>> {
        self.head.as_deref().map(|node| &node.next)
    }

    /// Whether the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of elements. Walks the whole list.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Borrowing iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// A new list with the elements in the opposite order.
    pub fn reversed(&self) -> Self
    where
        T: Clone,
    {
        self.iter()
            .fold(Self::new(), |list, value| Self::cons(value.clone(), list))
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        // Unlink uniquely owned nodes one at a time so long lists don't
        // recurse once per node.
        let mut head = self.head.take();
        while let Some(node) = head {
            match Rc::try_unwrap(node) {
                Ok(mut node) => head = node.next.head.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: Clone> Iterator for List<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.head.take()?;
        match Rc::try_unwrap(node) {
            Ok(Node { value, next }) => {
                *self = next;
                Some(value)
            }
            Err(shared) => {
                *self = shared.next.clone();
                Some(shared.value.clone())
            }
        }
    }
}

impl<T: Clone> FusedIterator for List<T> {}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        // Prepending reverses, so buffer first and fold from the back.
        let buffer: Vec<T> = iter.into_iter().collect();
        buffer
            .into_iter()
            .rev()
            .fold(Self::new(), |list, value| Self::cons(value, list))
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        let shared = match (&self.head, &other.head) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        shared || self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator returned by [`List::iter`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.next.head.as_deref();
        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { next: self.next }
    }
}
