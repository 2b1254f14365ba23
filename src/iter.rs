use core::iter::{Chain, FusedIterator};
use core::slice;

use crate::cursor::Cursor;
use crate::ring::RingBuffer;
use crate::slots::Slots;

/// Iterator over the elements of a ring buffer, oldest first.
///
/// Walks a `[begin, end)` cursor pair, so `nth` and `size_hint` are O(1).
pub struct Iter<'a, T, S: Slots<T>> {
    head: Cursor<'a, T, S>,
    tail: Cursor<'a, T, S>,
}

impl<'a, T, S: Slots<T>> Iter<'a, T, S> {
    pub(crate) fn new(head: Cursor<'a, T, S>, tail: Cursor<'a, T, S>) -> Self {
        Self { head, tail }
    }

    #[allow(clippy::cast_sign_loss)]
    fn remaining(&self) -> usize {
        (self.tail - self.head).max(0) as usize
    }
}

impl<T, S: Slots<T>> Clone for Iter<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<'a, T, S: Slots<T>> Iterator for Iter<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head >= self.tail {
            return None;
        }
        let item = self.head.get();
        self.head.move_next();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let step = n.min(self.remaining());
        self.head += step;
        self.next()
    }
}

impl<T, S: Slots<T>> DoubleEndedIterator for Iter<'_, T, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head >= self.tail {
            return None;
        }
        self.tail.move_prev();
        self.tail.get()
    }
}

impl<T, S: Slots<T>> ExactSizeIterator for Iter<'_, T, S> {}

impl<T, S: Slots<T>> FusedIterator for Iter<'_, T, S> {}

/// Mutable iterator over the elements of a ring buffer, oldest first.
///
/// Visits the live run starting at `begin` and then the wrapped run starting at slot 0.
/// Both runs hold occupied slots only.
pub struct IterMut<'a, T> {
    runs: Chain<slice::IterMut<'a, Option<T>>, slice::IterMut<'a, Option<T>>>,
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(first: &'a mut [Option<T>], second: &'a mut [Option<T>], len: usize) -> Self {
        Self {
            runs: first.iter_mut().chain(second.iter_mut()),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.runs.find_map(Option::as_mut)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.runs.by_ref().rev().find_map(Option::as_mut)?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator; pops elements from the front (or back) of the buffer.
pub struct IntoIter<T, S: Slots<T>> {
    ring: RingBuffer<T, S>,
}

impl<T, S: Slots<T>> IntoIter<T, S> {
    pub(crate) fn new(ring: RingBuffer<T, S>) -> Self {
        Self { ring }
    }
}

impl<T, S: Slots<T>> Iterator for IntoIter<T, S> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.len(), Some(self.ring.len()))
    }
}

impl<T, S: Slots<T>> DoubleEndedIterator for IntoIter<T, S> {
    fn next_back(&mut self) -> Option<T> {
        self.ring.pop_back().ok()
    }
}

impl<T, S: Slots<T>> ExactSizeIterator for IntoIter<T, S> {}

impl<T, S: Slots<T>> FusedIterator for IntoIter<T, S> {}

#[cfg(test)]
mod tests {
    use crate::DynRingBuffer;

    #[test]
    fn test_iter_mut_runs_cover_live_slots_only() {
        let mut sparse = DynRingBuffer::<u32>::with_capacity(1024);
        sparse.extend([1, 2, 3]);
        assert_eq!(sparse.iter_mut().runs.count(), 3);

        let mut wrapped = DynRingBuffer::<u32>::with_capacity(8);
        wrapped.extend(0..8);
        wrapped.pop_front_n(6).unwrap();
        wrapped.extend([8, 9, 10]);
        assert_eq!(wrapped.begin_slot(), 6);
        assert_eq!(wrapped.iter_mut().runs.count(), 5);
        assert_eq!(wrapped.iter_mut().rev().map(|v| *v).next(), Some(10));
    }

    #[test]
    fn test_iter_mut_on_zero_capacity() {
        let mut empty = DynRingBuffer::<u32>::new();
        assert_eq!(empty.iter_mut().next(), None);
    }
}
