use thiserror::Error;

/// Error types for ring buffer operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RingBufferError {
    /// Logical index is beyond the current length
    #[error("Index out of range: index {index} is beyond buffer length {length}")]
    OutOfRange {
        /// Index that was accessed
        index: usize,
        /// Current length of the buffer
        length: usize,
    },
    /// Not enough elements, or not enough free slots, for the requested operation
    #[error("Overflow: requested {requested} elements, but only {available} available")]
    Overflow {
        /// Number of elements (or slots) requested
        requested: usize,
        /// Number of elements (or slots) available
        available: usize,
    },
    /// A detached position was used after the buffer reallocated its storage
    #[error("Stale cursor: issued at generation {issued}, buffer is at generation {current}")]
    StaleCursor {
        /// Generation the position was issued under
        issued: u64,
        /// Current generation of the buffer
        current: u64,
    },
    /// A detached position was handed to a buffer other than the one that issued it
    #[error("Foreign cursor: position issued by buffer {issued_by}, used on buffer {buffer}")]
    ForeignCursor {
        /// Id of the buffer the position came from
        issued_by: usize,
        /// Id of the buffer it was used on
        buffer: usize,
    },
}

impl RingBufferError {
    pub(crate) fn empty() -> Self {
        RingBufferError::Overflow {
            requested: 1,
            available: 0,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = core::result::Result<T, RingBufferError>;
