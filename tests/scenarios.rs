use small_array::tracking::SMALL_ARRAY;
use small_array::{sort, Error, SmallArray, TrackingAllocator};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn add_insert_swap_remove_sort() {
    init_logging();

    let mut a = SmallArray::new();
    a.push(1);
    a.push(2);
    a.push(3);
    assert_eq!(a, [1, 2, 3]);
    assert_eq!(a.len(), 3);

    a.insert(1, 9);
    assert_eq!(a, [1, 9, 2, 3]);

    a.swap_remove(0);
    assert_eq!(a, [3, 9, 2]);

    a.sort_by(sort::natural);
    assert_eq!(a, [2, 3, 9]);
}

#[test]
fn reserve_is_not_observable() {
    init_logging();

    let tracker = TrackingAllocator::new(SMALL_ARRAY);
    let mut reserved: SmallArray<i32, _> = SmallArray::new_in(&tracker);
    reserved.reserve(10);
    reserved.resize(3);

    let direct: SmallArray<i32> = SmallArray::with_len(3);
    assert_eq!(reserved, direct);
    assert_eq!(reserved.len(), 3);
    assert_eq!(reserved.capacity(), direct.capacity());

    // The only difference is the extra allocator round trip.
    let stats = tracker.stats();
    assert_eq!(stats.allocations, 1);
    assert_eq!(stats.reallocations, 1);
    assert_eq!(stats.live_bytes, 12);
}

#[test]
fn forced_allocation_failure() {
    init_logging();

    let tracker = TrackingAllocator::new(SMALL_ARRAY);
    let mut a: SmallArray<String, _> = SmallArray::new_in(&tracker);
    a.push("a".to_string());
    a.push("b".to_string());

    tracker.fail_after(0);
    let err = a.try_push("c".to_string()).unwrap_err();
    assert!(matches!(err, Error::AllocFailed { .. }));
    assert_eq!(a, ["a", "b"]);
    assert_eq!(a.len(), 2);
    assert_eq!(a.capacity(), 2);
    assert_eq!(tracker.stats().failures, 1);

    tracker.stop_failing();
    a.push("c".to_string());
    assert_eq!(a, ["a", "b", "c"]);
}

#[test]
fn copies_are_independent() {
    let original: SmallArray<Vec<u8>> = [vec![1], vec![2, 3]].into();
    let mut copy = original.clone();
    copy[1].push(4);
    copy.remove(0);

    assert_eq!(original, [vec![1u8], vec![2, 3]]);
    assert_eq!(copy, [vec![2u8, 3, 4]]);
}

#[test]
fn move_leaves_source_empty() {
    let tracker = TrackingAllocator::new(SMALL_ARRAY);
    let mut source: SmallArray<u32, _> = SmallArray::new_in(&tracker);
    source.extend_from_slice(&[5, 6, 7]);
    let ptr = source.as_ptr();

    let mut dest = SmallArray::new_in(&tracker);
    dest.push(1);
    dest.move_from(&mut source);

    assert!(source.is_empty());
    assert!(!source.is_allocated());
    assert_eq!(dest, [5, 6, 7]);
    // The storage changed hands without being copied.
    assert_eq!(dest.as_ptr(), ptr);

    let taken = dest.take();
    assert!(dest.is_empty());
    assert_eq!(taken, [5, 6, 7]);

    drop(taken);
    assert_eq!(tracker.stats().live_bytes, 0);
}

#[test]
fn pointer_arrays_sort_by_pointee() {
    let values = [30, 10, 20];
    let mut refs: SmallArray<&i32> = values.iter().collect();
    refs.sort_by(sort::by_deref);
    assert_eq!(refs, [&10, &20, &30]);
    // The pointees were not touched.
    assert_eq!(values, [30, 10, 20]);
}

#[test]
fn many_small_arrays() {
    let tracker = TrackingAllocator::new(SMALL_ARRAY);
    let arrays: Vec<SmallArray<u16, _>> = (0..1000u16)
        .map(|i| {
            let mut a = SmallArray::new_in(&tracker);
            a.extend_from_slice(&[i, i + 1, i + 2]);
            a
        })
        .collect();

    // Exactly three slots per array, nothing more.
    assert_eq!(tracker.stats().live_bytes, 1000 * 3 * 2);
    assert!(arrays.iter().all(|a| a.memory_usage(false) == 6));

    drop(arrays);
    assert_eq!(tracker.stats().live_bytes, 0);
}
