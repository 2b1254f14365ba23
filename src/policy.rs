/// What `push_back` does when every slot is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Bounded-overwrite: evict the oldest element and store the new one.
    Overwrite,
    /// Bounded-reject: fail with `RingBufferError::Overflow`, leaving the buffer unchanged.
    Reject,
}

impl OverflowPolicy {
    #[must_use]
    pub fn overwrites(self) -> bool {
        matches!(self, OverflowPolicy::Overwrite)
    }
}
