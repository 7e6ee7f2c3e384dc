//! Iterator adapters.

/// Extension methods for any [`Iterator`].
pub trait IteratorExt: Iterator {
    /// Group items into `Vec`s of at most `size` elements.
    ///
    /// Every chunk is full except possibly the last one; an exhausted source
    /// never produces an empty chunk.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    fn chunking(self, size: usize) -> Chunking<Self>
    where
        Self: Sized,
    {
        assert!(size > 0, "chunk size must be positive");
        Chunking { iter: self, size }
    }
}

impl<I: Iterator> IteratorExt for I {}

/// Iterator returned by [`IteratorExt::chunking`].
#[derive(Clone, Debug)]
pub struct Chunking<I> {
    iter: I,
    size: usize,
}

impl<I: Iterator> Iterator for Chunking<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<_> = self.iter.by_ref().take(self.size).collect();
        if chunk.is_empty() { None } else { Some(chunk) }
    }
}
