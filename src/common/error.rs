//! Error types for the B-tree map.
//!
//! Map operations never fail: a duplicate insert returns `false` and a missing
//! key returns `None`. The errors below are structural invariant violations
//! reported by [`BTreeMap::validate`](crate::BTreeMap::validate). Seeing one
//! means the tree is corrupt, which is a bug, not a recoverable condition.

use thiserror::Error;

use super::NodeId;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All structural invariant violations the validator can detect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Keys inside a single node are not strictly ascending.
    #[error("{node} keys are not strictly ascending at slot {slot}")]
    Unsorted { node: NodeId, slot: usize },

    /// A key lies outside the range its parent's separators allow.
    #[error("{node} key at slot {slot} falls outside its parent separators")]
    SeparatorOrder { node: NodeId, slot: usize },

    /// A node holds more than `2B - 1` keys.
    #[error("{node} holds {size} keys, maximum is {max}")]
    Overflow { node: NodeId, size: usize, max: usize },

    /// A non-root node holds fewer than `B - 1` keys.
    #[error("{node} holds {size} keys, minimum is {min}")]
    Underflow { node: NodeId, size: usize, min: usize },

    /// An internal node's child count is not its key count plus one.
    #[error("{node} has {keys} keys but {children} children")]
    ChildCount {
        node: NodeId,
        keys: usize,
        children: usize,
    },

    /// Two leaves sit at different depths.
    #[error("leaf {node} at depth {depth}, expected depth {expected}")]
    UnevenLeafDepth {
        node: NodeId,
        depth: usize,
        expected: usize,
    },

    /// The root has children but no keys (a collapse was missed).
    #[error("root {node} has children but no keys")]
    EmptyInternalRoot { node: NodeId },

    /// The cached element count disagrees with the tree contents.
    #[error("map reports {reported} elements, tree holds {actual}")]
    LengthMismatch { reported: usize, actual: usize },

    /// A child id points at a released arena slot.
    #[error("{node} refers to a released arena slot")]
    DanglingNode { node: NodeId },
}
