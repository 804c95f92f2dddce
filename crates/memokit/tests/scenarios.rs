use memokit::{Error, LruCache, RangeSumCache, SplayTree};

#[test]
fn test_capacity_two_evicts_oldest() {
    let mut cache = LruCache::new(2).unwrap();

    cache.put(1, "a");
    cache.put(2, "b");
    cache.put(3, "c");

    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(&"b"));
    assert_eq!(cache.get(&3), Some(&"c"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_reput_then_get_returns_new_value() {
    let mut cache = LruCache::new(3).unwrap();

    cache.put("k", 1);
    cache.put("other", 2);
    let before = cache.len();

    cache.put("k", 7);
    assert_eq!(cache.get(&"k"), Some(&7));
    assert_eq!(cache.len(), before);
}

#[test]
fn test_range_keys_invalidated_by_point() {
    let mut cache = LruCache::new(16).unwrap();

    cache.put((0, 5), 15);
    cache.put((6, 10), 40);
    cache.put((3, 8), 28);

    cache.invalidate_range(7);

    assert_eq!(cache.get(&(0, 5)), Some(&15));
    assert_eq!(cache.get(&(6, 10)), None);
    assert_eq!(cache.get(&(3, 8)), None);
}

#[test]
fn test_capacity_zero_is_config_error() {
    let err = LruCache::<(usize, usize), i64>::new(0).err().unwrap();
    assert_eq!(err, Error::InvalidCapacity(0));
    assert_eq!(err.to_string(), "Invalid capacity: 0 (must be at least 1)");
}

#[test]
fn test_range_sum_workload_consistent() {
    let values: Vec<i64> = (1..=200).map(|v| v % 17).collect();
    let mut plain = values.clone();
    let mut cache = RangeSumCache::new(values, 8).unwrap();

    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut next = |bound: u64| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((state >> 33) % bound) as usize
    };

    for _ in 0..2000 {
        if next(10) < 7 {
            let left = next(200);
            let right = left + next((200 - left) as u64);
            let expected: i64 = plain[left..=right].iter().sum();
            assert_eq!(cache.range_sum(left, right).unwrap(), expected);
        } else {
            let index = next(200);
            let value = next(100) as i64 + 1;
            plain[index] = value;
            cache.update(index, value).unwrap();
        }
        assert!(cache.cached_len() <= cache.capacity());
    }
}

#[test]
fn test_splay_find_moves_value_to_root() {
    let mut tree = SplayTree::new();
    for v in [50, 30, 70, 20, 40, 60, 80, 10] {
        tree.insert(v);
    }

    for v in [10, 80, 40, 10, 60] {
        assert_eq!(tree.find(&v), Some(&v));
        assert_eq!(tree.root(), Some(&v));
    }

    assert_eq!(tree.find(&55), None);
    assert_eq!(tree.root(), Some(&60));
    assert_eq!(
        tree.iter().copied().collect::<Vec<_>>(),
        vec![10, 20, 30, 40, 50, 60, 70, 80]
    );
}

#[test]
fn test_splay_repeated_access_flattens_chain() {
    let mut tree = SplayTree::new();
    for v in 0..64 {
        tree.insert(v);
    }
    assert_eq!(tree.height(), 64);

    // Splaying the deepest node roughly halves the depth along the access path
    tree.find(&63);
    assert!(tree.height() < 64);
    tree.find(&0);
    assert!(tree.height() <= 40);
}
