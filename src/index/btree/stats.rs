//! Structural statistics tracking.

use std::fmt;

/// Counters for the structural events a map performs while rebalancing.
///
/// Every mutation already holds `&mut BTreeMap`, so the counters are plain
/// integers; a copy of this struct is a consistent snapshot.
///
/// # Example
/// ```
/// use btree_map::BTreeMap;
///
/// let mut map: BTreeMap<u32, u32, 2> = BTreeMap::new();
/// for k in 0..4 {
///     map.insert(k, k);
/// }
/// let stats = map.stats();
/// assert_eq!(stats.splits, 1);
/// assert_eq!(stats.root_splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of node splits (root splits included).
    pub splits: u64,

    /// Number of splits that grew the tree by one level.
    pub root_splits: u64,

    /// Number of sibling merges.
    pub merges: u64,

    /// Number of elements borrowed from a left sibling.
    pub borrows_from_left: u64,

    /// Number of elements borrowed from a right sibling.
    pub borrows_from_right: u64,

    /// Number of times an empty root was replaced by its only child.
    pub root_collapses: u64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total borrows in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_from_left + self.borrows_from_right
    }

    /// Net change in tree height since the counters were last reset.
    pub fn height_delta(&self) -> i64 {
        self.root_splits as i64 - self.root_collapses as i64
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, borrows: {}, height: {:+} }}",
            self.splits,
            self.merges,
            self.borrows(),
            self.height_delta()
        )
    }
}
