//! Configuration constants for the B-tree map.

/// Branching factor used when a map is declared without an explicit `B`.
///
/// With `B = 6` a node holds between 5 and 11 keys, the same fan-out the
/// standard library's `BTreeMap` uses.
///
/// # Memory Layout
/// Each node reserves room for `2B` keys, `2B` values and `2B + 1` child ids:
/// one slot past the steady-state maximum, used transiently before a split.
pub const DEFAULT_BRANCHING_FACTOR: usize = 6;

/// Smallest branching factor the split/merge algorithm supports.
///
/// With `B = 1` a split of a two-key node promotes the only key of the lower
/// half and leaves an empty non-root node behind.
pub const MIN_BRANCHING_FACTOR: usize = 2;

/// Maximum number of keys a node may hold between operations (`2B - 1`).
#[inline]
pub const fn max_keys(b: usize) -> usize {
    2 * b - 1
}

/// Minimum number of keys every non-root node must hold (`B - 1`).
#[inline]
pub const fn min_keys(b: usize) -> usize {
    b - 1
}

/// Maximum number of children an internal node may have (`2B`).
#[inline]
pub const fn max_children(b: usize) -> usize {
    2 * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branching_factor_is_supported() {
        assert!(DEFAULT_BRANCHING_FACTOR >= MIN_BRANCHING_FACTOR);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(max_keys(3), 5);
        assert_eq!(min_keys(3), 2);
        assert_eq!(max_children(3), 6);

        // Smallest supported tree is a 2-3-4 tree
        assert_eq!(max_keys(MIN_BRANCHING_FACTOR), 3);
        assert_eq!(min_keys(MIN_BRANCHING_FACTOR), 1);
    }

    #[test]
    fn test_full_node_fits_after_merge() {
        // A merge joins a sibling holding at most B keys, one separator and an
        // underflowing child holding at most B - 2 keys.
        for b in MIN_BRANCHING_FACTOR..64 {
            assert_eq!(b + 1 + (min_keys(b) - 1), max_keys(b));
        }
    }
}
