use crate::policy::OverflowPolicy;
use crate::ring::RingBuffer;
use crate::slots::InlineSlots;

/// Ring buffer with `N` in-place slots and no heap allocation.
///
/// Defaults to [`OverflowPolicy::Overwrite`]: pushing into a full buffer evicts the
/// oldest element. `N == 0` fails to compile as soon as a buffer is constructed.
pub type FixedRingBuffer<T, const N: usize> = RingBuffer<T, InlineSlots<T, N>>;

impl<T, const N: usize> RingBuffer<T, InlineSlots<T, N>> {
    const NONZERO_CAPACITY: () = assert!(N > 0, "Empty ring buffer is not allowed");

    #[must_use]
    pub fn new() -> Self {
        let () = Self::NONZERO_CAPACITY;
        Self::from_parts(InlineSlots::new(), OverflowPolicy::Overwrite)
    }

    /// Buffer holding `count` clones of `value`.
    ///
    /// With more than `N` clones only the last `N` remain, as with repeated `push_back`.
    #[must_use]
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut ring = Self::new();
        for _ in 0..count {
            ring.extend_overwriting(value.clone());
        }
        ring
    }

    /// Maximum number of elements the buffer can hold.
    #[must_use]
    pub fn max_size(&self) -> usize {
        N
    }

    /// Construction ignores the instance policy and always keeps the newest `N`.
    fn extend_overwriting(&mut self, value: T) {
        if self.is_full() {
            drop(self.pop_front());
        }
        self.push_vacant(value);
    }
}

impl<T, const N: usize> Default for RingBuffer<T, InlineSlots<T, N>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for RingBuffer<T, InlineSlots<T, N>> {
    fn clone(&self) -> Self {
        let mut ring = Self::new().with_policy(self.policy());
        for value in self {
            ring.push_vacant(value.clone());
        }
        ring
    }
}

impl<T, const N: usize> FromIterator<T> for RingBuffer<T, InlineSlots<T, N>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ring = Self::new();
        for value in iter {
            ring.extend_overwriting(value);
        }
        ring
    }
}

impl<T, const N: usize, const K: usize> From<[T; K]> for RingBuffer<T, InlineSlots<T, N>> {
    fn from(values: [T; K]) -> Self {
        values.into_iter().collect()
    }
}
