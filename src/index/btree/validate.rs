//! Structural invariant verification.
//!
//! The mutation algorithms establish every invariant at the site that could
//! break it, so production paths never re-check. Tests call
//! [`BTreeMap::validate`] after each step to catch a broken rebalance early.

use crate::common::config::{max_keys, min_keys};
use crate::common::{Error, NodeId, Result};

use super::map::BTreeMap;

/// Key range a subtree must fall in, exclusive on both ends.
struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

impl<K: Ord> Bounds<'_, K> {
    fn contains(&self, key: &K) -> bool {
        self.lower.map_or(true, |lower| key > lower) && self.upper.map_or(true, |upper| key < upper)
    }
}

impl<K: Ord, V, const B: usize> BTreeMap<K, V, B> {
    /// Walk the whole tree and check every structural invariant.
    ///
    /// Checks, per node: strictly ascending keys, keys within the parent's
    /// separators, `size <= 2B - 1`, `size >= B - 1` below the root, and
    /// `children == size + 1` for internal nodes. Tree-wide: all leaves at
    /// one depth, no keyless root with children, and `len()` matching the
    /// number of stored elements.
    ///
    /// # Errors
    /// Returns the first violation found, in depth-first order.
    pub fn validate(&self) -> Result<()> {
        let mut leaf_depth = None;
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        let actual = self.validate_node(self.root, 0, bounds, &mut leaf_depth)?;

        if actual != self.len {
            return Err(Error::LengthMismatch {
                reported: self.len,
                actual,
            });
        }
        Ok(())
    }

    /// Returns the number of elements in the subtree.
    fn validate_node(
        &self,
        id: NodeId,
        depth: usize,
        bounds: Bounds<'_, K>,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        let node = self
            .nodes
            .try_get(id)
            .ok_or(Error::DanglingNode { node: id })?;
        let keys = node.keys();
        let size = node.size();

        if size > max_keys(B) {
            return Err(Error::Overflow {
                node: id,
                size,
                max: max_keys(B),
            });
        }
        if id != self.root && size < min_keys(B) {
            return Err(Error::Underflow {
                node: id,
                size,
                min: min_keys(B),
            });
        }
        if let Some(slot) = keys.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(Error::Unsorted {
                node: id,
                slot: slot + 1,
            });
        }
        if let Some(slot) = keys.iter().position(|key| !bounds.contains(key)) {
            return Err(Error::SeparatorOrder { node: id, slot });
        }

        if node.is_leaf() {
            match *leaf_depth {
                Some(expected) if expected != depth => {
                    return Err(Error::UnevenLeafDepth {
                        node: id,
                        depth,
                        expected,
                    })
                }
                Some(_) => {}
                None => *leaf_depth = Some(depth),
            }
            return Ok(size);
        }

        if id == self.root && size == 0 {
            return Err(Error::EmptyInternalRoot { node: id });
        }
        if node.child_count() != size + 1 {
            return Err(Error::ChildCount {
                node: id,
                keys: size,
                children: node.child_count(),
            });
        }

        let mut count = size;
        for (index, &child) in node.children().iter().enumerate() {
            let child_bounds = Bounds {
                lower: index.checked_sub(1).map(|i| &keys[i]).or(bounds.lower),
                upper: keys.get(index).or(bounds.upper),
            };
            count += self.validate_node(child, depth + 1, child_bounds, leaf_depth)?;
        }
        Ok(count)
    }
}
