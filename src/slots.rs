//! Slot arenas backing the ring buffers.
//!
//! A slot is either vacant (`None`) or holds one live element. Ring buffers keep the
//! invariant that exactly the logically-live slots are occupied, so dropping a value is
//! always a matter of taking it out of its slot.

use alloc::boxed::Box;
use alloc::vec::Vec;

/// Index-addressed storage exclusively owned by one ring buffer.
pub trait Slots<T> {
    /// All physical slots, vacant or not.
    fn slots(&self) -> &[Option<T>];

    fn slots_mut(&mut self) -> &mut [Option<T>];

    /// Number of physical slots.
    fn capacity(&self) -> usize {
        self.slots().len()
    }

    /// Stores `value` in `slot`, returning whatever occupied it before.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not below `capacity()`.
    fn construct(&mut self, slot: usize, value: T) -> Option<T> {
        self.slots_mut()[slot].replace(value)
    }

    /// Takes the value out of `slot`, leaving it vacant.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not below `capacity()`.
    fn destroy(&mut self, slot: usize) -> Option<T> {
        self.slots_mut()[slot].take()
    }

    fn get(&self, slot: usize) -> Option<&T> {
        self.slots().get(slot)?.as_ref()
    }

    fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots_mut().get_mut(slot)?.as_mut()
    }
}

/// Source of heap blocks for [`HeapSlots`].
///
/// Allocators are cloned together with the buffers that use them.
pub trait SlotAllocator<T>: Clone {
    /// Returns a block of `slots` vacant slots.
    fn allocate(&self, slots: usize) -> Box<[Option<T>]>;

    /// Releases a block previously returned by `allocate`.
    ///
    /// Every slot of the block is vacant by the time it is handed back.
    fn deallocate(&self, block: Box<[Option<T>]>) {
        drop(block);
    }
}

/// The default allocator: plain global heap blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl<T> SlotAllocator<T> for Global {
    fn allocate(&self, slots: usize) -> Box<[Option<T>]> {
        vacant_block(slots)
    }
}

/// Builds a boxed block of `slots` vacant slots.
#[must_use]
pub fn vacant_block<T>(slots: usize) -> Box<[Option<T>]> {
    let mut block = Vec::with_capacity(slots);
    block.resize_with(slots, || None);
    block.into_boxed_slice()
}

/// In-place array of `N` slots.
#[derive(Debug)]
pub struct InlineSlots<T, const N: usize> {
    slots: [Option<T>; N],
}

impl<T, const N: usize> InlineSlots<T, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }
}

impl<T, const N: usize> Default for InlineSlots<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Slots<T> for InlineSlots<T, N> {
    fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    fn slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.slots
    }

    fn capacity(&self) -> usize {
        N
    }
}

/// Heap block of runtime-sized capacity obtained from a [`SlotAllocator`].
///
/// The block goes back to its allocator when the arena is dropped.
#[derive(Debug)]
pub struct HeapSlots<T, A: SlotAllocator<T> = Global> {
    block: Box<[Option<T>]>,
    alloc: A,
}

impl<T, A: SlotAllocator<T>> HeapSlots<T, A> {
    /// Allocates `capacity` vacant slots from `alloc`.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let block = alloc.allocate(capacity);
        debug_assert_eq!(block.len(), capacity, "allocator returned a short block");
        Self { block, alloc }
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }
}

impl<T, A: SlotAllocator<T>> Slots<T> for HeapSlots<T, A> {
    fn slots(&self) -> &[Option<T>] {
        &self.block
    }

    fn slots_mut(&mut self) -> &mut [Option<T>] {
        &mut self.block
    }
}

impl<T, A: SlotAllocator<T>> Drop for HeapSlots<T, A> {
    fn drop(&mut self) {
        let block = core::mem::take(&mut self.block);
        self.alloc.deallocate(block);
    }
}
