use btree_map::BTreeMap;
use proptest::prelude::*;
use std::collections::BTreeMap as StdBTreeMap;

#[derive(Debug, Clone)]
enum Operation {
    Insert(u8, u16),
    Erase(u8),
    Find(u8),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Operation::Insert(k, v)),
            2 => any::<u8>().prop_map(Operation::Erase),
            1 => any::<u8>().prop_map(Operation::Find),
        ],
        1..400,
    )
}

fn run_against_model<const B: usize>(ops: Vec<Operation>) {
    let mut std_map = StdBTreeMap::new();
    let mut tree: BTreeMap<u8, u16, B> = BTreeMap::new();

    for op in ops {
        match op {
            Operation::Insert(k, v) => {
                let absent = !std_map.contains_key(&k);
                std_map.entry(k).or_insert(v);
                assert_eq!(tree.insert(k, v), absent, "Insert result mismatch for key {}", k);
            }
            Operation::Erase(k) => {
                assert_eq!(tree.erase(&k), std_map.remove(&k), "Erase result mismatch for key {}", k);
                assert_eq!(tree.find(&k), None);
            }
            Operation::Find(k) => {
                assert_eq!(tree.find(&k), std_map.get(&k).copied(), "Find result mismatch for key {}", k);
            }
        }
        tree.validate().unwrap();
    }

    // Final consistency check
    assert_eq!(tree.len(), std_map.len(), "Length mismatch");
    let expected: Vec<(u8, u16)> = std_map.into_iter().collect();
    assert_eq!(tree.preorder(), expected);
}

proptest! {
    #[test]
    fn test_b2_matches_std_map(ops in operations()) {
        run_against_model::<2>(ops);
    }

    #[test]
    fn test_b3_matches_std_map(ops in operations()) {
        run_against_model::<3>(ops);
    }

    #[test]
    fn test_b4_matches_std_map(ops in operations()) {
        run_against_model::<4>(ops);
    }

    #[test]
    fn test_insert_twice_keeps_first(k in any::<u32>(), first in any::<u32>(), second in any::<u32>()) {
        let mut tree: BTreeMap<u32, u32, 3> = BTreeMap::new();
        prop_assert!(tree.insert(k, first));
        prop_assert!(!tree.insert(k, second));
        prop_assert_eq!(tree.find(&k), Some(first));
    }

    #[test]
    fn test_leaves_share_depth(keys in proptest::collection::btree_set(any::<i32>(), 0..500)) {
        let mut tree: BTreeMap<i32, (), 2> = BTreeMap::new();
        for &k in &keys {
            tree.insert(k, ());
        }
        let layers = tree.bfs();
        prop_assert_eq!(layers.len(), if keys.is_empty() { 0 } else { tree.height() });
        // Bottom layer holds every leaf, and together the layers hold every key
        let total: usize = layers.iter().flatten().map(Vec::len).sum();
        prop_assert_eq!(total, keys.len());
        prop_assert!(tree.validate().is_ok());
    }
}
