use ringslot::{DynRingBuffer, FixedRingBuffer, OverflowPolicy};

const CACHE_CAPACITY: usize = 64 * 1024;
const PRELOAD: usize = 60 * 1024;

#[test]
fn test_cache_buffer_producer_consumer() {
    let mut cache = DynRingBuffer::<u8>::new();
    cache.reserve(CACHE_CAPACITY).unwrap();
    cache.extend(std::iter::repeat(0xAA).take(PRELOAD));

    assert_eq!(cache.len(), PRELOAD);
    assert_eq!(cache.capacity(), CACHE_CAPACITY);

    let mut produced: u64 = PRELOAD as u64;
    let mut consumed: u64 = 0;
    for round in 0..64u8 {
        // consumer drains a chunk, producer refills whatever room is left
        let chunk = 3 * 1024 + usize::from(round) * 7;
        cache.pop_front_n(chunk).unwrap();
        consumed += chunk as u64;

        let room = cache.capacity() - cache.len();
        cache.extend(std::iter::repeat(round).take(room));
        produced += room as u64;

        assert!(cache.is_full());
        assert!(cache.push_back(0).is_err());
        assert_eq!(cache.begin_slot(), cache.insert_slot());
    }

    assert_eq!(produced - consumed, cache.len() as u64);
    assert_eq!(cache.back(), Some(&63));
}

#[test]
fn test_cache_buffer_reads_in_order() {
    let mut cache = DynRingBuffer::<u8>::with_capacity(16);
    let mut next_write: u8 = 0;
    let mut next_read: u8 = 0;

    for _ in 0..50 {
        while !cache.is_full() {
            cache.push_back(next_write).unwrap();
            next_write = next_write.wrapping_add(1);
        }
        for _ in 0..5 {
            assert_eq!(cache.pop_front(), Ok(next_read));
            next_read = next_read.wrapping_add(1);
        }
    }
    assert_eq!(cache.len(), 11);
}

#[test]
fn test_inserter_moved_before_bulk_append() {
    let mut buf = DynRingBuffer::<u8>::with_capacity(2048);
    for byte in [0x10, 0x20, 0x30] {
        buf.push_back(byte).unwrap();
    }
    for _ in 0..3 {
        buf.pop_front().unwrap();
    }
    assert!(buf.is_empty());
    assert_eq!(buf.insert_slot(), 3);

    for byte in [0x10, 0x20, 0x30] {
        buf.push_back(byte).unwrap();
    }
    buf.extend(std::iter::repeat(0xAA).take(1024));

    assert_eq!(buf.len(), 1027);
    assert_eq!(buf[0], 0x10);
    assert_eq!(buf[1], 0x20);
    assert_eq!(buf[2], 0x30);
    assert!((3..buf.len()).all(|i| buf[i] == 0xAA));
}

#[test]
fn test_recent_history_window() {
    let mut history = FixedRingBuffer::<String, 3>::new();
    for command in ["ls", "cd src", "cargo doc", "git status", "vim lib.rs"] {
        history.push_back(command.to_string()).unwrap();
    }

    let newest_first: Vec<&str> = history.iter().rev().map(String::as_str).collect();
    assert_eq!(newest_first, vec!["vim lib.rs", "git status", "cargo doc"]);
}

#[test]
fn test_moving_average() {
    let mut window = FixedRingBuffer::<f64, 4>::new();
    let mut averages = Vec::new();
    for sample in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0] {
        window.push_back(sample).unwrap();
        averages.push(window.iter().sum::<f64>() / window.len() as f64);
    }
    assert_eq!(averages, vec![1.0, 1.5, 2.0, 2.5, 3.5, 4.5]);
}

#[test]
fn test_bounded_queue_switches_to_overwrite() {
    let mut queue = DynRingBuffer::<u32>::with_capacity(3);
    queue.extend([1, 2, 3]);
    assert!(queue.push_back(4).is_err());

    queue.set_policy(OverflowPolicy::Overwrite);
    assert_eq!(queue.push_back(4), Ok(Some(1)));
    assert_eq!(queue, [2, 3, 4]);
}

#[test]
fn test_erase_matching_while_walking() {
    let mut buf = FixedRingBuffer::<u32, 8>::new();
    buf.extend(0..12);
    assert_eq!(buf, [4, 5, 6, 7, 8, 9, 10, 11]);

    let mut position = buf.begin().position();
    loop {
        let cursor = buf.cursor(position).unwrap();
        let Some(&value) = cursor.get() else { break };
        if value % 2 == 0 {
            position = buf.erase(position).unwrap();
        } else {
            position = (cursor + 1).position();
        }
    }

    assert_eq!(buf, [5, 7, 9, 11]);
}
