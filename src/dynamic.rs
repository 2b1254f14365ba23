use alloc::vec::Vec;
use tracing::trace;

use crate::error::{Result, RingBufferError};
use crate::policy::OverflowPolicy;
use crate::ring::RingBuffer;
use crate::slots::{Global, HeapSlots, SlotAllocator};

/// Ring buffer over a heap block whose capacity is chosen at runtime.
///
/// Defaults to [`OverflowPolicy::Reject`]: pushing into a full buffer fails with
/// `RingBufferError::Overflow`. Capacity only changes through [`reserve`](Self::reserve),
/// a growing [`resize`](Self::resize) or an [`assign`](Self::assign) that needs more room;
/// each of these relinearizes the elements at slot 0 and bumps the generation, which
/// invalidates every previously issued [`Position`](crate::Position).
pub type DynRingBuffer<T, A = Global> = RingBuffer<T, HeapSlots<T, A>>;

impl<T> RingBuffer<T, HeapSlots<T, Global>> {
    /// Empty buffer with zero capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Buffer with capacity and length `count`, every element a clone of `value`.
    #[must_use]
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(count, value, Global)
    }
}

impl<T, A: SlotAllocator<T>> RingBuffer<T, HeapSlots<T, A>> {
    #[must_use]
    pub fn new_in(alloc: A) -> Self {
        Self::with_capacity_in(0, alloc)
    }

    #[must_use]
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self::from_parts(
            HeapSlots::with_capacity_in(capacity, alloc),
            OverflowPolicy::Reject,
        )
    }

    #[must_use]
    pub fn from_elem_in(count: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut ring = Self::with_capacity_in(count, alloc);
        for _ in 0..count {
            ring.push_vacant(value.clone());
        }
        ring
    }

    /// Buffer whose capacity and length equal the number of items in `iter`.
    pub fn from_iter_in<I>(iter: I, alloc: A) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = iter.into_iter().collect();
        let mut ring = Self::with_capacity_in(values.len(), alloc);
        for value in values {
            ring.push_vacant(value);
        }
        ring
    }

    pub fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    /// Largest capacity a heap block of this element type can address.
    #[must_use]
    pub fn max_size(&self) -> usize {
        let slot_size = core::mem::size_of::<Option<T>>().max(1);
        isize::MAX.unsigned_abs() / slot_size
    }

    /// Moves the elements into a fresh block of exactly `capacity` slots.
    ///
    /// Always reallocates, also when `capacity` equals the current one; the elements end
    /// up in logical order from slot 0.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Overflow` if `capacity < len()`; the buffer is left
    /// untouched then.
    pub fn reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.len() {
            return Err(RingBufferError::Overflow {
                requested: self.len(),
                available: capacity,
            });
        }
        self.reallocate(capacity);
        Ok(())
    }

    fn reallocate(&mut self, capacity: usize) {
        let fresh = HeapSlots::with_capacity_in(capacity, self.allocator().clone());
        drop(self.replace_storage(fresh));
    }

    /// Resizes to `len` elements, appending clones of `value` or dropping from the back.
    ///
    /// Growing past the capacity reallocates to exactly `len` slots first.
    pub fn resize(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone());
    }

    /// Like [`resize`](Self::resize), producing new elements with `fill`.
    pub fn resize_with<F>(&mut self, len: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if len > self.capacity() {
            self.reallocate(len);
        }
        while self.len() > len {
            drop(self.pop_back());
        }
        while self.len() < len {
            self.push_vacant(fill());
        }
    }

    /// Replaces the contents with the items of `iter`.
    ///
    /// Reallocates to exactly the new length only if it exceeds the capacity; otherwise
    /// the existing block is reused starting at slot 0.
    pub fn assign<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = iter.into_iter().collect();
        self.clear();
        if values.len() > self.capacity() {
            self.reallocate(values.len());
        }
        for value in values {
            self.push_vacant(value);
        }
    }

    /// Replaces the contents with `count` clones of `value`.
    pub fn assign_fill(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        if count > self.capacity() {
            self.reallocate(count);
        }
        for _ in 0..count {
            self.push_vacant(value.clone());
        }
    }

    /// Moves the contents out, leaving an empty zero-capacity buffer behind.
    ///
    /// The emptied buffer keeps its identity but starts a new generation, so positions
    /// issued before the move are rejected by it as stale. The returned buffer gets a
    /// new identity.
    #[must_use]
    pub fn take(&mut self) -> Self {
        let fresh = Self::new_in(self.allocator().clone()).with_policy(self.policy());
        let mut taken = core::mem::replace(self, fresh);
        core::mem::swap(&mut self.id, &mut taken.id);
        self.bump_generation(taken.generation());
        trace!(capacity = taken.capacity(), "moved ring storage out");
        taken
    }
}

impl<T, A: SlotAllocator<T> + Default> Default for RingBuffer<T, HeapSlots<T, A>> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: SlotAllocator<T>> Clone for RingBuffer<T, HeapSlots<T, A>> {
    fn clone(&self) -> Self {
        let mut ring = Self::with_capacity_in(self.capacity(), self.allocator().clone())
            .with_policy(self.policy());
        for value in self {
            ring.push_vacant(value.clone());
        }
        ring
    }
}

impl<T, A: SlotAllocator<T> + Default> FromIterator<T> for RingBuffer<T, HeapSlots<T, A>> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_in(iter, A::default())
    }
}

impl<T, const K: usize> From<[T; K]> for RingBuffer<T, HeapSlots<T, Global>> {
    fn from(values: [T; K]) -> Self {
        Self::from_iter_in(values, Global)
    }
}

impl<T> From<Vec<T>> for RingBuffer<T, HeapSlots<T, Global>> {
    fn from(values: Vec<T>) -> Self {
        Self::from_iter_in(values, Global)
    }
}
