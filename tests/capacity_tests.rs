use ringslot::{DynRingBuffer, FixedRingBuffer, OverflowPolicy, RingBufferError};

const DATA: [u32; 14] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14];

#[test]
fn test_size_and_empty() {
    let zero: DynRingBuffer<u32> = DynRingBuffer::new();
    let buf: DynRingBuffer<u32> = DATA.into_iter().collect();

    assert_eq!(zero.len(), 0);
    assert!(zero.is_empty());
    assert_eq!(buf.len(), DATA.len());
    assert!(!buf.is_empty());
}

#[test]
fn test_capacity_matches_range_length() {
    let buf: DynRingBuffer<u32> = DATA.into_iter().collect();
    assert_eq!(buf.capacity(), DATA.len());
    assert!(buf.is_full());
}

#[test]
fn test_fixed_max_size_and_capacity() {
    let buf = FixedRingBuffer::<u32, 14>::new();
    assert_eq!(buf.max_size(), 14);
    assert_eq!(buf.capacity(), 14);
    assert!(buf.is_empty());
}

#[test]
fn test_dynamic_max_size_bounds_capacity() {
    let buf = DynRingBuffer::<u64>::with_capacity(4);
    assert!(buf.max_size() >= buf.capacity());
    assert!(buf.max_size() <= isize::MAX as usize);
}

#[test]
fn test_reserve_grows_and_preserves_order() {
    let mut buf: DynRingBuffer<u32> = DATA.into_iter().collect();

    buf.reserve(buf.capacity() + 5).unwrap();

    assert_eq!(buf.capacity(), DATA.len() + 5);
    assert_eq!(buf.len(), DATA.len());
    for (i, expected) in DATA.iter().enumerate() {
        assert_eq!(buf[i], *expected);
    }
}

#[test]
fn test_reserve_preserves_order_after_wraparound() {
    let mut buf: DynRingBuffer<u32> = DynRingBuffer::with_capacity(5);
    buf.extend(0..5);
    buf.pop_front_n(3).unwrap();
    buf.extend(5..8);
    assert_eq!(buf.begin_slot(), 3);
    let before = buf.to_vec();

    buf.reserve(12).unwrap();

    assert_eq!(buf.to_vec(), before);
    assert_eq!(buf.begin_slot(), 0);
    assert_eq!(buf.insert_slot(), 5);
}

#[test]
fn test_reserve_below_length_is_rejected() {
    let mut buf: DynRingBuffer<u32> = DATA.into_iter().collect();
    let result = buf.reserve(3);
    assert_eq!(
        result,
        Err(RingBufferError::Overflow {
            requested: 14,
            available: 3
        })
    );
    assert_eq!(buf.capacity(), 14);
    assert_eq!(buf.generation(), 0);
}

#[test]
fn test_resize_bigger() {
    let mut buf: DynRingBuffer<u32> = DATA.into_iter().collect();

    buf.resize(buf.len() + 5, 0xDEAD_BEEF);

    assert_eq!(buf.len(), DATA.len() + 5);
    assert_eq!(buf.capacity(), DATA.len() + 5);
    for i in 0..DATA.len() {
        assert_eq!(buf[i], DATA[i]);
    }
    for i in DATA.len()..buf.len() {
        assert_eq!(buf[i], 0xDEAD_BEEF);
    }
}

#[test]
fn test_resize_within_capacity_keeps_block() {
    let mut buf: DynRingBuffer<u32> = DynRingBuffer::with_capacity(10);
    buf.extend([1, 2, 3]);

    buf.resize(6, 9);

    assert_eq!(buf.capacity(), 10);
    assert_eq!(buf.generation(), 0);
    assert_eq!(buf, [1, 2, 3, 9, 9, 9]);
}

#[test]
fn test_resize_smaller_truncates_back() {
    let mut buf: DynRingBuffer<u32> = DATA.into_iter().collect();

    buf.resize(4, 0);

    assert_eq!(buf, [1, 2, 3, 4]);
    assert_eq!(buf.capacity(), DATA.len());
}

#[test]
fn test_resize_with_counter() {
    let mut buf = DynRingBuffer::<u32>::new();
    let mut next = 0;
    buf.resize_with(4, || {
        next += 10;
        next
    });
    assert_eq!(buf, [10, 20, 30, 40]);
}

#[test]
fn test_size_never_exceeds_capacity() {
    let mut fixed = FixedRingBuffer::<u8, 7>::new();
    let mut dynamic = DynRingBuffer::<u8>::with_capacity(7);

    for step in 0u8..200 {
        if step % 3 == 2 {
            let _ = fixed.pop_front();
            let _ = dynamic.pop_back();
        } else {
            fixed.push_back(step).unwrap();
            let _ = dynamic.push_back(step);
        }
        assert!(fixed.len() <= fixed.capacity());
        assert!(dynamic.len() <= dynamic.capacity());
    }
}

#[test]
fn test_policy_is_configurable_per_instance() {
    let fixed = FixedRingBuffer::<u8, 2>::new();
    let dynamic = DynRingBuffer::<u8>::with_capacity(2);
    assert_eq!(fixed.policy(), OverflowPolicy::Overwrite);
    assert_eq!(dynamic.policy(), OverflowPolicy::Reject);

    let mut dynamic = dynamic.with_policy(OverflowPolicy::Overwrite);
    dynamic.extend([1, 2, 3]);
    assert_eq!(dynamic, [2, 3]);

    dynamic.set_policy(OverflowPolicy::Reject);
    assert!(dynamic.push_back(4).is_err());
}
