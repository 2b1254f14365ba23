//! Wraparound-aware cursors.
//!
//! A cursor is a shared borrow of a ring buffer plus a signed logical offset from the
//! buffer's first element. Offsets below zero mean the cursor walked backwards past its
//! anchor. The physical slot is derived on demand as `(begin + offset) mod capacity`, so
//! `begin()` and `end()` of a full buffer share a slot yet compare unequal.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::index;
use crate::ring::RingBuffer;
use crate::slots::Slots;

/// A detached cursor: logical offset plus the buffer and storage generation it was
/// issued under.
///
/// Positions outlive borrows, which is what lets them be handed back to mutating
/// operations such as [`RingBuffer::erase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    offset: isize,
    generation: u64,
    buffer_id: usize,
}

impl Position {
    #[must_use]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// [`RingBuffer::id`] of the buffer that issued the position.
    #[must_use]
    pub fn buffer_id(&self) -> usize {
        self.buffer_id
    }
}

/// Random-access cursor into a [`RingBuffer`].
pub struct Cursor<'a, T, S: Slots<T>> {
    ring: &'a RingBuffer<T, S>,
    offset: isize,
}

impl<'a, T, S: Slots<T>> Cursor<'a, T, S> {
    pub(crate) fn new(ring: &'a RingBuffer<T, S>, offset: isize) -> Self {
        Self { ring, offset }
    }

    /// Signed logical distance from the buffer's first element.
    #[must_use]
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// Logical distance walked from the anchor, regardless of direction.
    #[must_use]
    pub fn traversal_count(&self) -> usize {
        self.offset.unsigned_abs()
    }

    /// Whether the cursor sits before its anchor.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.offset < 0
    }

    /// Logical index of the element under the cursor, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.offset)
            .ok()
            .filter(|&i| i < self.ring.len())
    }

    /// The element under the cursor, or `None` outside `[begin, end)`.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.ring.get(self.index()?)
    }

    /// Physical slot the cursor maps to; `None` when the buffer has no slots.
    #[must_use]
    pub fn physical(&self) -> Option<usize> {
        let capacity = self.ring.capacity();
        if capacity == 0 {
            return None;
        }
        Some(index::offset(self.ring.begin_slot(), self.offset, capacity))
    }

    pub fn move_next(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    pub fn move_prev(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    #[must_use]
    pub fn offset_by(self, delta: isize) -> Self {
        Self {
            ring: self.ring,
            offset: self.offset.saturating_add(delta),
        }
    }

    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.offset == 0
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        usize::try_from(self.offset).is_ok_and(|i| i == self.ring.len())
    }

    /// Detaches the cursor from its borrow.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            generation: self.ring.generation(),
            buffer_id: self.ring.id(),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &'a RingBuffer<T, S> {
        self.ring
    }
}

impl<T, S: Slots<T>> Clone for Cursor<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Slots<T>> Copy for Cursor<'_, T, S> {}

impl<T, S: Slots<T>> PartialEq for Cursor<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.ring, other.ring) && self.offset == other.offset
    }
}

impl<T, S: Slots<T>> Eq for Cursor<'_, T, S> {}

impl<T, S: Slots<T>> PartialOrd for Cursor<'_, T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        core::ptr::eq(self.ring, other.ring).then(|| self.offset.cmp(&other.offset))
    }
}

impl<T, S: Slots<T>> fmt::Debug for Cursor<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("physical", &self.physical())
            .finish()
    }
}

impl<T, S: Slots<T>> Add<usize> for Cursor<'_, T, S> {
    type Output = Self;

    fn add(mut self, rhs: usize) -> Self {
        self.offset = self.offset.saturating_add_unsigned(rhs);
        self
    }
}

impl<T, S: Slots<T>> Sub<usize> for Cursor<'_, T, S> {
    type Output = Self;

    fn sub(mut self, rhs: usize) -> Self {
        self.offset = self.offset.saturating_sub_unsigned(rhs);
        self
    }
}

impl<T, S: Slots<T>> AddAssign<usize> for Cursor<'_, T, S> {
    fn add_assign(&mut self, rhs: usize) {
        *self = *self + rhs;
    }
}

impl<T, S: Slots<T>> SubAssign<usize> for Cursor<'_, T, S> {
    fn sub_assign(&mut self, rhs: usize) {
        *self = *self - rhs;
    }
}

/// Signed distance between two cursors over the same buffer.
impl<T, S: Slots<T>> Sub for Cursor<'_, T, S> {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        debug_assert!(core::ptr::eq(self.ring, rhs.ring), "cursors over different buffers");
        self.offset - rhs.offset
    }
}

/// Reverse adapter: reads the element one position before its base cursor.
///
/// `rbegin()` wraps `end()` and `rend()` wraps `begin()`.
pub struct RevCursor<'a, T, S: Slots<T>> {
    base: Cursor<'a, T, S>,
}

impl<'a, T, S: Slots<T>> RevCursor<'a, T, S> {
    #[must_use]
    pub fn new(base: Cursor<'a, T, S>) -> Self {
        Self { base }
    }

    /// The wrapped forward cursor.
    #[must_use]
    pub fn base(&self) -> Cursor<'a, T, S> {
        self.base
    }

    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        (self.base - 1).get()
    }

    pub fn move_next(&mut self) {
        self.base.move_prev();
    }

    pub fn move_prev(&mut self) {
        self.base.move_next();
    }
}

impl<T, S: Slots<T>> Clone for RevCursor<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Slots<T>> Copy for RevCursor<'_, T, S> {}

impl<T, S: Slots<T>> PartialEq for RevCursor<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T, S: Slots<T>> Eq for RevCursor<'_, T, S> {}

impl<T, S: Slots<T>> PartialOrd for RevCursor<'_, T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        other.base.partial_cmp(&self.base)
    }
}

impl<T, S: Slots<T>> fmt::Debug for RevCursor<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RevCursor").field(&self.base).finish()
    }
}

impl<T, S: Slots<T>> Add<usize> for RevCursor<'_, T, S> {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        Self::new(self.base - rhs)
    }
}

impl<T, S: Slots<T>> Sub<usize> for RevCursor<'_, T, S> {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self {
        Self::new(self.base + rhs)
    }
}

impl<T, S: Slots<T>> Sub for RevCursor<'_, T, S> {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        rhs.base - self.base
    }
}
