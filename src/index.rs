//! Modular slot arithmetic.
//!
//! Every function here requires `capacity > 0`; callers guard the zero-capacity case.

/// Advances `index` by `n` slots, wrapping at `capacity`. Requires `index < capacity`.
#[inline]
#[must_use]
pub fn inc(index: usize, n: usize, capacity: usize) -> usize {
    debug_assert!(index < capacity, "index outside capacity");
    let n = n % capacity;
    if index >= capacity - n {
        index - (capacity - n)
    } else {
        index + n
    }
}

/// Retreats `index` by `n` slots, wrapping at `capacity`.
#[inline]
#[must_use]
pub fn dec(index: usize, n: usize, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "index arithmetic on zero capacity");
    let n = n % capacity;
    if n > index {
        capacity - (n - index)
    } else {
        index - n
    }
}

/// Physical slot reached from `base` by a signed logical `offset`.
#[inline]
#[must_use]
pub fn offset(base: usize, offset: isize, capacity: usize) -> usize {
    if offset >= 0 {
        inc(base, offset.unsigned_abs(), capacity)
    } else {
        dec(base, offset.unsigned_abs(), capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_wraps() {
        assert_eq!(inc(0, 1, 5), 1);
        assert_eq!(inc(4, 1, 5), 0);
        assert_eq!(inc(3, 4, 5), 2);
        assert_eq!(inc(2, 12, 5), 4);
    }

    #[test]
    fn test_dec_wraps() {
        assert_eq!(dec(1, 1, 5), 0);
        assert_eq!(dec(0, 1, 5), 4);
        assert_eq!(dec(2, 4, 5), 3);
        assert_eq!(dec(2, 5, 5), 2);
        assert_eq!(dec(0, 11, 5), 4);
    }

    #[test]
    fn test_single_slot() {
        assert_eq!(inc(0, 7, 1), 0);
        assert_eq!(dec(0, 7, 1), 0);
    }

    #[test]
    fn test_signed_offset() {
        assert_eq!(offset(3, 0, 5), 3);
        assert_eq!(offset(3, 2, 5), 0);
        assert_eq!(offset(3, -4, 5), 4);
        assert_eq!(offset(0, -1, 5), 4);
        assert_eq!(offset(usize::MAX - 1, 1, usize::MAX), 0);
    }

    #[test]
    fn test_inc_near_usize_max() {
        assert_eq!(inc(usize::MAX - 1, usize::MAX - 2, usize::MAX), usize::MAX - 3);
        assert_eq!(inc(usize::MAX - 1, usize::MAX, usize::MAX), usize::MAX - 1);
        assert_eq!(
            offset(usize::MAX - 2, isize::MAX, usize::MAX),
            isize::MAX.unsigned_abs() - 2
        );
    }
}
