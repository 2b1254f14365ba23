use core::fmt;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::sync::atomic::{AtomicUsize, Ordering};

use alloc::vec::Vec;
use tracing::{debug, trace};

use crate::cursor::{Cursor, Position, RevCursor};
use crate::error::{Result, RingBufferError};
use crate::index::{dec, inc};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::policy::OverflowPolicy;
use crate::slots::Slots;

static NEXT_BUFFER_ID: AtomicUsize = AtomicUsize::new(0);

/// A circular buffer over a slot arena `S`.
///
/// Elements live in physical slots `[0, capacity)`. The logically-first element sits at
/// `begin`, the next `push_back` writes at `insert`, and `insert == (begin + len) % capacity`
/// holds at every observation point. Since `insert == begin` both when empty and when full,
/// `len` is what tells the two apart.
///
/// Use the [`FixedRingBuffer`](crate::FixedRingBuffer) and
/// [`DynRingBuffer`](crate::DynRingBuffer) aliases to pick a storage strategy.
pub struct RingBuffer<T, S: Slots<T>> {
    pub(crate) slots: S,
    begin: usize,
    insert: usize,
    len: usize,
    policy: OverflowPolicy,
    generation: u64,
    pub(crate) id: usize,
    _marker: PhantomData<T>,
}

impl<T, S: Slots<T>> RingBuffer<T, S> {
    pub(crate) fn from_parts(slots: S, policy: OverflowPolicy) -> Self {
        Self {
            slots,
            begin: 0,
            insert: 0,
            len: 0,
            policy,
            generation: 0,
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Number of physical slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[must_use]
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: OverflowPolicy) {
        self.policy = policy;
    }

    /// Builder form of [`set_policy`](Self::set_policy).
    #[must_use]
    pub fn with_policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of storage reallocations this buffer went through.
    ///
    /// Positions issued under an older generation are rejected.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identity of this buffer instance, distinct from every other buffer's.
    ///
    /// Positions remember it, so a position from one buffer is rejected by another.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Physical slot of the logically-first element.
    #[must_use]
    pub fn begin_slot(&self) -> usize {
        self.begin
    }

    /// Physical slot the next `push_back` writes to.
    #[must_use]
    pub fn insert_slot(&self) -> usize {
        self.insert
    }

    /// Physical slot of logical index `logical`. Requires a non-zero capacity.
    fn physical(&self, logical: usize) -> usize {
        inc(self.begin, logical, self.capacity())
    }

    #[allow(clippy::expect_used)]
    fn take_slot(&mut self, slot: usize) -> T {
        self.slots
            .destroy(slot)
            .expect("Live slots are occupied")
    }

    // ---------------------------------------------------------------
    // Element access

    /// Returns the element at logical `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots.get(self.physical(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let slot = self.physical(index);
        self.slots.get_mut(slot)
    }

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::OutOfRange` if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        let length = self.len;
        self.get(index)
            .ok_or(RingBufferError::OutOfRange { index, length })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::OutOfRange` if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let length = self.len;
        self.get_mut(index)
            .ok_or(RingBufferError::OutOfRange { index, length })
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.get(self.len.checked_sub(1)?)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len.checked_sub(1)?;
        self.get_mut(last)
    }

    // ---------------------------------------------------------------
    // Insertion

    /// Appends an element.
    ///
    /// When every slot is occupied the outcome depends on the [`OverflowPolicy`]:
    /// `Overwrite` evicts the oldest element and returns it, `Reject` fails.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Overflow` if the buffer is full under `Reject`,
    /// or if the buffer has no slots at all.
    pub fn push_back(&mut self, value: T) -> Result<Option<T>> {
        self.check_room()?;
        Ok(self.write_back(value))
    }

    /// Appends the element produced by `make`.
    ///
    /// `make` is only called once room for the element is guaranteed.
    ///
    /// # Errors
    ///
    /// Same as [`push_back`](Self::push_back).
    pub fn emplace_back<F>(&mut self, make: F) -> Result<Option<T>>
    where
        F: FnOnce() -> T,
    {
        self.check_room()?;
        Ok(self.write_back(make()))
    }

    fn check_room(&self) -> Result<()> {
        let capacity = self.capacity();
        if self.len < capacity || (capacity > 0 && self.policy.overwrites()) {
            return Ok(());
        }
        debug!(capacity, policy = ?self.policy, "push rejected on full ring buffer");
        Err(RingBufferError::Overflow {
            requested: 1,
            available: 0,
        })
    }

    /// Writes at `insert`, evicting the oldest element if full. Requires `check_room`.
    fn write_back(&mut self, value: T) -> Option<T> {
        let capacity = self.capacity();
        if self.len == capacity {
            let evicted = self.slots.destroy(self.begin);
            self.slots.construct(self.insert, value);
            self.insert = inc(self.insert, 1, capacity);
            self.begin = self.insert;
            trace!(capacity, slot = self.begin, "overwrote oldest element");
            evicted
        } else {
            self.slots.construct(self.insert, value);
            self.insert = inc(self.insert, 1, capacity);
            self.len += 1;
            None
        }
    }

    /// Appends into a slot known to be free.
    pub(crate) fn push_vacant(&mut self, value: T) {
        debug_assert!(self.len < self.capacity(), "no vacant slot");
        self.write_back(value);
    }

    /// Appends every element of `iter`, stopping at the first rejected one.
    ///
    /// Elements appended before the failure stay in the buffer.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Overflow` when a push is rejected.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_back(value)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Removal

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Overflow` if the buffer is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(RingBufferError::empty());
        }
        self.insert = dec(self.insert, 1, self.capacity());
        self.len -= 1;
        Ok(self.take_slot(self.insert))
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Overflow` if the buffer is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(RingBufferError::empty());
        }
        let slot = self.begin;
        self.begin = inc(self.begin, 1, self.capacity());
        self.len -= 1;
        Ok(self.take_slot(slot))
    }

    /// Drops `count` elements from the front.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::Overflow` if `count > len()`; nothing is removed then.
    pub fn pop_front_n(&mut self, count: usize) -> Result<()> {
        if count > self.len {
            return Err(RingBufferError::Overflow {
                requested: count,
                available: self.len,
            });
        }
        for _ in 0..count {
            self.pop_front()?;
        }
        Ok(())
    }

    /// Drops every element and resets both cursors to slot 0.
    pub fn clear(&mut self) {
        if self.capacity() > 0 {
            for i in 0..self.len {
                let slot = self.physical(i);
                drop(self.slots.destroy(slot));
            }
        }
        self.begin = 0;
        self.insert = 0;
        self.len = 0;
    }

    /// Removes and returns the element at logical `index`.
    ///
    /// Removing the first or last element is `pop_front`/`pop_back`; otherwise every later
    /// element moves one slot toward `index`.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::OutOfRange` if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(RingBufferError::OutOfRange {
                index,
                length: self.len,
            });
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == self.len - 1 {
            return self.pop_back();
        }

        let removed = self.take_slot(self.physical(index));
        for i in index + 1..self.len {
            let from = self.physical(i);
            let to = self.physical(i - 1);
            let value = self.take_slot(from);
            self.slots.construct(to, value);
        }
        self.len -= 1;
        self.insert = dec(self.insert, 1, self.capacity());
        Ok(removed)
    }

    /// Drops the element at `position` and returns the position of the element that
    /// now occupies that logical slot (the end position when the last element was erased).
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::ForeignCursor` if `position` was issued by another
    /// buffer, `RingBufferError::StaleCursor` if the storage was reallocated since
    /// `position` was issued, `RingBufferError::OutOfRange` if it does not point at an
    /// element.
    pub fn erase(&mut self, position: Position) -> Result<Position> {
        self.check_position(position)?;
        let index = usize::try_from(position.offset())
            .ok()
            .filter(|&i| i < self.len)
            .ok_or(RingBufferError::OutOfRange {
                index: position.offset().unsigned_abs(),
                length: self.len,
            })?;
        drop(self.remove(index)?);
        Ok(position)
    }

    // ---------------------------------------------------------------
    // Cursors

    fn check_position(&self, position: Position) -> Result<()> {
        if position.buffer_id() != self.id {
            debug!(buffer = self.id, issued_by = position.buffer_id(), "foreign position");
            return Err(RingBufferError::ForeignCursor {
                issued_by: position.buffer_id(),
                buffer: self.id,
            });
        }
        if position.generation() == self.generation {
            Ok(())
        } else {
            Err(RingBufferError::StaleCursor {
                issued: position.generation(),
                current: self.generation,
            })
        }
    }

    /// Cursor at the first element.
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the last element.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn end(&self) -> Cursor<'_, T, S> {
        Cursor::new(self, self.len as isize)
    }

    /// Reverse cursor at the last element.
    #[must_use]
    pub fn rbegin(&self) -> RevCursor<'_, T, S> {
        RevCursor::new(self.end())
    }

    /// Reverse cursor one before the first element.
    #[must_use]
    pub fn rend(&self) -> RevCursor<'_, T, S> {
        RevCursor::new(self.begin())
    }

    /// Re-attaches a detached position.
    ///
    /// # Errors
    ///
    /// Returns `RingBufferError::ForeignCursor` if `position` was issued by another
    /// buffer, `RingBufferError::StaleCursor` if the storage was reallocated since
    /// `position` was issued.
    pub fn cursor(&self, position: Position) -> Result<Cursor<'_, T, S>> {
        self.check_position(position)?;
        Ok(Cursor::new(self, position.offset()))
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter::new(self.begin(), self.end())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let len = self.len;
        let capacity = self.capacity();
        let (head, tail) = self.slots.slots_mut().split_at_mut(self.begin);
        let first_len = len.min(capacity - self.begin);
        let first = &mut tail[..first_len];
        let second = &mut head[..len - first_len];
        IterMut::new(first, second, len)
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    // ---------------------------------------------------------------
    // Storage replacement

    /// Moves every element, in logical order, into `fresh` starting at slot 0 and
    /// returns the previous arena. Bumps the generation.
    pub(crate) fn replace_storage(&mut self, mut fresh: S) -> S {
        debug_assert!(fresh.capacity() >= self.len, "replacement arena too small");
        for i in 0..self.len {
            let value = self.take_slot(self.physical(i));
            fresh.construct(i, value);
        }
        let old = core::mem::replace(&mut self.slots, fresh);
        let capacity = self.capacity();
        self.begin = 0;
        self.insert = if capacity == 0 { 0 } else { self.len % capacity };
        self.generation += 1;
        trace!(
            old_capacity = old.capacity(),
            new_capacity = capacity,
            generation = self.generation,
            "relinearized ring storage"
        );
        old
    }

    pub(crate) fn bump_generation(&mut self, past: u64) {
        self.generation = self.generation.max(past) + 1;
    }
}

impl<T, S: Slots<T>> Drop for RingBuffer<T, S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, S: Slots<T>> Index<usize> for RingBuffer<T, S> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let length = self.len;
        match self.get(index) {
            Some(value) => value,
            None => panic!("Index {index} out of bounds for ring buffer of length {length}"),
        }
    }
}

impl<T, S: Slots<T>> IndexMut<usize> for RingBuffer<T, S> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let length = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("Index {index} out of bounds for ring buffer of length {length}"),
        }
    }
}

impl<T: fmt::Debug, S: Slots<T>> fmt::Debug for RingBuffer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, S, S2> PartialEq<RingBuffer<T, S2>> for RingBuffer<T, S>
where
    T: PartialEq,
    S: Slots<T>,
    S2: Slots<T>,
{
    fn eq(&self, other: &RingBuffer<T, S2>) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S: Slots<T>> Eq for RingBuffer<T, S> {}

impl<T, S, const K: usize> PartialEq<[T; K]> for RingBuffer<T, S>
where
    T: PartialEq,
    S: Slots<T>,
{
    fn eq(&self, other: &[T; K]) -> bool {
        self.len == K && self.iter().eq(other.iter())
    }
}

impl<T, S: Slots<T>> PartialEq<[T]> for RingBuffer<T, S>
where
    T: PartialEq,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

/// Back insertion.
///
/// # Panics
///
/// Panics if a push is rejected; use [`RingBuffer::try_extend`] to handle that case.
impl<T, S: Slots<T>> Extend<T> for RingBuffer<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                panic!("Cannot extend ring buffer: {err}");
            }
        }
    }
}

impl<'a, T: Copy + 'a, S: Slots<T>> Extend<&'a T> for RingBuffer<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T, S: Slots<T>> IntoIterator for &'a RingBuffer<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: Slots<T>> IntoIterator for &'a mut RingBuffer<T, S> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, S: Slots<T>> IntoIterator for RingBuffer<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T, S>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
