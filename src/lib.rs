#![no_std]

//! `ringslot`: circular buffers with wraparound-aware cursors.
//!
//! Two storage strategies share one indexing and cursor engine, [`RingBuffer`]:
//!
//! - [`FixedRingBuffer<T, N>`]: `N` in-place slots, no heap allocation. Pushing into a full
//!   buffer evicts the oldest element (bounded-overwrite).
//! - [`DynRingBuffer<T, A>`]: a heap block from a [`SlotAllocator`], sized at runtime and grown
//!   explicitly with `reserve`, `resize` or `assign`. Pushing into a full buffer fails
//!   (bounded-reject).
//!
//! The overflow behaviour is a per-instance [`OverflowPolicy`], so either storage strategy
//! can run under either policy.
//!
//! ```
//! # use ringslot::FixedRingBuffer;
//! let mut buf = FixedRingBuffer::<u32, 5>::new();
//! for i in 0..=5 {
//!     buf.push_back(i).unwrap();
//! }
//!
//! assert_eq!(buf.len(), 5);
//! assert_eq!(buf.front(), Some(&1));
//! assert_eq!(buf.back(), Some(&5));
//! ```
//!
//! ```
//! # use ringslot::{DynRingBuffer, RingBufferError};
//! let mut buf = DynRingBuffer::<u32>::new();
//! buf.reserve(5).unwrap();
//! buf.extend(0..5);
//!
//! assert_eq!(
//!     buf.push_back(5),
//!     Err(RingBufferError::Overflow { requested: 1, available: 0 })
//! );
//! buf.pop_front().unwrap();
//! buf.push_back(5).unwrap();
//! assert_eq!(buf, [1, 2, 3, 4, 5]);
//! ```
//!
//! # Cursors
//!
//! A buffer stores `begin` and `insert` slot indices, and both coincide when the buffer is
//! empty *and* when it is full. Cursors therefore do not compare physical slots: each one
//! records its signed logical offset from the first element, and derives the physical
//! slot only when asked. `begin() == end()` holds exactly when the buffer is empty.
//!
//! ```
//! # use ringslot::FixedRingBuffer;
//! let buf: FixedRingBuffer<char, 3> = ['a', 'b', 'c'].into();
//!
//! let (begin, end) = (buf.begin(), buf.end());
//! assert_eq!(begin.physical(), end.physical());
//! assert_ne!(begin, end);
//! assert_eq!(end - begin, 3);
//!
//! assert_eq!((begin + 2).get(), Some(&'c'));
//! assert_eq!(buf.rbegin().get(), Some(&'c'));
//! ```
//!
//! Cursors borrow the buffer, so they cannot survive a mutation. To erase through a
//! cursor, detach it into a [`Position`]; positions carry the storage generation and are
//! rejected once the buffer has reallocated.
//!
//! ```
//! # use ringslot::DynRingBuffer;
//! let mut buf: DynRingBuffer<u32> = (1..=7).collect();
//! let third = (buf.begin() + 2).position();
//!
//! let next = buf.erase(third).unwrap();
//! assert_eq!(buf.cursor(next).unwrap().get(), Some(&4));
//! assert_eq!(buf, [1, 2, 4, 5, 6, 7]);
//!
//! buf.reserve(10).unwrap();
//! assert!(buf.erase(next).is_err());
//! ```
//!
//! # Performance Characteristics
//!
//! - `push_back`, `pop_front`, `pop_back`, indexing, cursor arithmetic: O(1)
//! - `pop_front_n(k)`: O(k); `remove`/`erase` in the middle: O(distance to the end)
//! - `reserve`, growing `resize`, `assign` past the capacity: O(len), always relinearizing
//!
//! ## `no_std` Compatibility
//!
//! The crate only needs `core` and `alloc`. The `std` feature forwards to the `std`
//! features of `thiserror` and `tracing`:
//! ```toml
//! [dependencies]
//! ringslot = { version = "0.1", features = ["std"] }
//! ```

extern crate alloc;

mod cursor;
mod dynamic;
mod error;
mod fixed;
pub mod index;
mod iter;
mod policy;
mod ring;
mod slots;

// Re-export public types and traits
pub use cursor::{Cursor, Position, RevCursor};
pub use dynamic::DynRingBuffer;
pub use error::{Result, RingBufferError};
pub use fixed::FixedRingBuffer;
pub use iter::{IntoIter, Iter, IterMut};
pub use policy::OverflowPolicy;
pub use ring::RingBuffer;
pub use slots::{vacant_block, Global, HeapSlots, InlineSlots, SlotAllocator, Slots};
