//! The map has no internal locking; callers that share it serialize access
//! with a lock around the whole map.

use std::sync::Arc;
use std::thread;

use btree_map::BTreeMap;
use parking_lot::{Mutex, RwLock};

/// Concurrent writers on disjoint key ranges behind one mutex.
#[test]
fn test_concurrent_writers_behind_mutex() {
    let map: Arc<Mutex<BTreeMap<u32, u32, 4>>> = Arc::new(Mutex::new(BTreeMap::new()));

    let mut handles = vec![];
    for t in 0..4u32 {
        let map_clone = Arc::clone(&map);
        handles.push(thread::spawn(move || {
            for i in 0..250 {
                let k = t * 1000 + i;
                assert!(map_clone.lock().insert(k, k * 2));
            }
            // Erase every other key this thread inserted
            for i in (0..250).step_by(2) {
                let k = t * 1000 + i;
                assert_eq!(map_clone.lock().erase(&k), Some(k * 2));
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    let map = map.lock();
    assert_eq!(map.len(), 4 * 125);
    map.validate().unwrap();
    for t in 0..4u32 {
        assert_eq!(map.find(&(t * 1000 + 1)), Some((t * 1000 + 1) * 2));
        assert_eq!(map.find(&(t * 1000)), None);
    }
}

/// Readers share a read lock while a writer waits its turn.
#[test]
fn test_readers_behind_rwlock() {
    let mut map: BTreeMap<u32, String, 3> = BTreeMap::new();
    for k in 0..100 {
        map.insert(k, k.to_string());
    }
    let map = Arc::new(RwLock::new(map));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                for k in 0..100 {
                    assert_eq!(map.read().find(&k), Some(k.to_string()));
                }
            })
        })
        .collect();

    for r in readers {
        r.join().unwrap();
    }

    map.write().erase(&50);
    assert_eq!(map.read().find(&50), None);
    assert_eq!(map.read().len(), 99);
}
