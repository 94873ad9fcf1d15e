//! Node - local storage and structural primitives of the B-tree.
//!
//! A [`Node`] knows its own slot bounds and nothing about the rest of the
//! tree. Rebalancing decisions are made by the map, one level up, while it
//! unwinds the recursion; nodes never point back at their parent.

use std::borrow::Borrow;
use std::mem;

use crate::common::config::{max_children, max_keys};
use crate::common::NodeId;

/// A B-tree node with branching factor `B`.
///
/// # Layout
/// ```text
///            keys:   [ k0 ][ k1 ][ k2 ]
///            values: [ v0 ][ v1 ][ v2 ]
///   children:     [c0]  [c1]  [c2]  [c3]
///
///   every key in c0 <  k0 < every key in c1 <  k1 < ...
/// ```
///
/// A leaf has no children; an internal node has exactly `size() + 1` once an
/// operation completes. Between operations `size()` stays within
/// `B - 1 ..= 2B - 1` (the root may go down to zero). A node may transiently
/// hold `2B` keys, right before a split halves it.
#[derive(Debug, Clone)]
pub struct Node<K, V, const B: usize> {
    keys: Vec<K>,
    values: Vec<V>,
    children: Vec<NodeId>,
}

impl<K, V, const B: usize> Node<K, V, B> {
    /// Create an empty leaf.
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::with_capacity(2 * B),
            values: Vec::with_capacity(2 * B),
            children: Vec::new(),
        }
    }

    /// Create a root holding a single separator between two subtrees.
    pub(crate) fn with_root(key: K, value: V, left: NodeId, right: NodeId) -> Self {
        let mut node = Self::new();
        node.keys.push(key);
        node.values.push(value);
        node.children.reserve(max_children(B) + 1);
        node.children.push(left);
        node.children.push(right);
        node
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of keys held by this node.
    #[inline]
    pub fn size(&self) -> usize {
        self.keys.len()
    }

    /// True iff this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of child subtrees (zero for a leaf).
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Keys of this node, ascending.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values of this node, aligned with [`keys`](Self::keys).
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub(crate) fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Child subtree at `index`, or `None` past the end (always `None` for a leaf).
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    /// Binary search for `key`.
    ///
    /// `Ok(i)` if `keys[i] == key`; otherwise `Err(i)` where `i` is the
    /// smallest slot with `keys[i] > key`, which is also the child to descend.
    pub(crate) fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.keys.binary_search_by(|probe| probe.borrow().cmp(key))
    }

    /// Entry at `index`.
    #[inline]
    pub(crate) fn entry(&self, index: usize) -> (&K, &V) {
        (&self.keys[index], &self.values[index])
    }

    // ========================================================================
    // Element primitives
    // ========================================================================

    /// Insert an element at its ordinal position, shifting later elements right.
    ///
    /// Only local: a node that reaches `2B` keys must be split by the caller.
    /// Returns the slot the element landed in.
    pub(crate) fn insert(&mut self, key: K, value: V) -> usize
    where
        K: Ord,
    {
        debug_assert!(self.keys.len() <= max_keys(B), "insert into a node that needs a split");
        let index = self.keys.partition_point(|probe| *probe < key);
        self.keys.insert(index, key);
        self.values.insert(index, value);
        index
    }

    /// Remove the element at `index`, shifting later elements left.
    ///
    /// Children are left untouched; re-linking them is the caller's job.
    pub(crate) fn remove(&mut self, index: usize) -> (K, V) {
        (self.keys.remove(index), self.values.remove(index))
    }

    /// Swap the element at `index` for another, returning the old one.
    pub(crate) fn replace(&mut self, index: usize, key: K, value: V) -> (K, V) {
        (
            mem::replace(&mut self.keys[index], key),
            mem::replace(&mut self.values[index], value),
        )
    }

    // ========================================================================
    // Child primitives
    // ========================================================================

    /// Insert a child reference at `index`, shifting later children right.
    pub(crate) fn add_child(&mut self, child: NodeId, index: usize) {
        self.children.insert(index, child);
    }

    /// Remove the child reference at `index`, shifting later children left.
    pub(crate) fn remove_child(&mut self, index: usize) -> NodeId {
        self.children.remove(index)
    }

    // ========================================================================
    // Structural primitives
    // ========================================================================

    /// Split a node that reached `2B` keys.
    ///
    /// Returns `None` while the node still fits. Otherwise the returned node
    /// takes the first `B` keys and the first `B` children; `self` keeps the
    /// last `B` keys and the last `B + 1` children. The median is NOT removed:
    /// the caller promotes the new node's last key (slot `B - 1`) to the
    /// parent, which leaves the new node with `B - 1` keys and `B` children.
    pub(crate) fn split(&mut self) -> Option<Self> {
        if self.keys.len() < 2 * B {
            return None;
        }

        let upper_keys = self.keys.split_off(B);
        let upper_values = self.values.split_off(B);
        let lower_children = if self.is_leaf() {
            Vec::new()
        } else {
            let upper_children = self.children.split_off(B);
            mem::replace(&mut self.children, upper_children)
        };

        let lower = Self {
            keys: mem::replace(&mut self.keys, upper_keys),
            values: mem::replace(&mut self.values, upper_values),
            children: lower_children,
        };
        // split_off sized the upper half exactly; leave room for the next split
        self.keys.reserve(B);
        self.values.reserve(B);
        Some(lower)
    }

    /// Append a separator and then everything `right` holds.
    ///
    /// `right` must sit immediately to the right of `self` under the same
    /// parent, with `separator` being the parent key between them.
    pub(crate) fn absorb(&mut self, separator: (K, V), right: Self) {
        let (key, value) = separator;
        self.keys.push(key);
        self.values.push(value);
        self.keys.extend(right.keys);
        self.values.extend(right.values);
        self.children.extend(right.children);
    }

    /// Remove the smallest element together with the leftmost child, if any.
    pub(crate) fn pop_first(&mut self) -> (K, V, Option<NodeId>) {
        let (key, value) = self.remove(0);
        let edge = (!self.is_leaf()).then(|| self.children.remove(0));
        (key, value, edge)
    }

    /// Remove the largest element together with the rightmost child, if any.
    pub(crate) fn pop_last(&mut self) -> (K, V, Option<NodeId>) {
        let (key, value) = self.remove(self.keys.len() - 1);
        let edge = self.children.pop();
        (key, value, edge)
    }

    /// Prepend an element that is smaller than every key here.
    pub(crate) fn push_first(&mut self, key: K, value: V, edge: Option<NodeId>) {
        self.keys.insert(0, key);
        self.values.insert(0, value);
        if let Some(child) = edge {
            self.children.insert(0, child);
        }
    }

    /// Append an element that is larger than every key here.
    pub(crate) fn push_last(&mut self, key: K, value: V, edge: Option<NodeId>) {
        self.keys.push(key);
        self.values.push(value);
        if let Some(child) = edge {
            self.children.push(child);
        }
    }

    /// Detach and return the only child of a keyless node.
    pub(crate) fn take_only_child(&mut self) -> Option<NodeId> {
        if self.keys.is_empty() && self.children.len() == 1 {
            self.children.pop()
        } else {
            None
        }
    }
}
