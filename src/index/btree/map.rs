//! BTreeMap - the ordered map and its recursive rebalancing algorithms.
//!
//! Every mutation descends from the root by binary search and does its
//! repair work while the recursion unwinds:
//! - insert bubbles a split-off node up through [`Inserted`] until a parent
//!   has room for the promoted key (or a new root is created)
//! - erase checks each child it returned from for underflow and merges or
//!   borrows, which may in turn underflow the parent one level up

use std::borrow::Borrow;
use std::fmt;

use tracing::{debug, trace};

use crate::common::config::{min_keys, DEFAULT_BRANCHING_FACTOR, MIN_BRANCHING_FACTOR};
use crate::common::NodeId;

use super::arena::NodeArena;
use super::node::Node;
use super::stats::TreeStats;

/// Layers of a tree, top down: each layer lists the key group of every node
/// at that depth, left to right.
pub type Levels<K> = Vec<Vec<Vec<K>>>;

/// Outcome of inserting into a subtree, reported to the parent.
enum Inserted<K, V, const B: usize> {
    /// The key was already present; nothing changed.
    Duplicate,
    /// The subtree took the element without splitting its top node.
    Absorbed,
    /// The subtree's top node split; this is its detached lower half.
    Split(Node<K, V, B>),
}

/// An in-memory ordered map backed by a B-tree.
///
/// `B` is the branching factor: every node except the root holds between
/// `B - 1` and `2B - 1` keys, and every leaf sits at the same depth.
/// Values of `B` below [`MIN_BRANCHING_FACTOR`] fail to compile.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────────┐
/// │                         BTreeMap                             │
/// │  ┌──────────┐   ┌─────────────────────────────────────────┐  │
/// │  │  root    │──▶│  nodes: NodeArena<Node>                 │  │
/// │  │  NodeId  │   │  [Node0] [Node1] [free] [Node3] ...     │  │
/// │  └──────────┘   └─────────────────────────────────────────┘  │
/// │  ┌──────────┐   ┌──────────┐                                 │
/// │  │   len    │   │  stats   │                                 │
/// │  └──────────┘   └──────────┘                                 │
/// └──────────────────────────────────────────────────────────────┘
/// ```
///
/// Nodes reference children by [`NodeId`] and never their parent; all
/// rebalancing is done by a parent looking at its own children.
///
/// # Thread Safety
/// None internally. The map is `Send`/`Sync` when `K` and `V` are, so callers
/// that share it wrap the whole map in a lock.
///
/// # Example
/// ```
/// use btree_map::BTreeMap;
///
/// let mut map: BTreeMap<&str, u32, 3> = BTreeMap::new();
/// assert!(map.insert("b", 2));
/// assert!(map.insert("a", 1));
/// assert!(!map.insert("a", 100)); // insert-if-absent
///
/// assert_eq!(map.find("a"), Some(1));
/// assert_eq!(map.erase("b"), Some(2));
/// assert_eq!(map.find("b"), None);
/// assert_eq!(map.preorder(), vec![("a", 1)]);
/// ```
#[derive(Clone)]
pub struct BTreeMap<K, V, const B: usize = DEFAULT_BRANCHING_FACTOR> {
    /// Owns every node of the tree.
    pub(super) nodes: NodeArena<Node<K, V, B>>,

    /// Always a live node; an empty leaf when the map is empty.
    pub(super) root: NodeId,

    /// Number of elements.
    pub(super) len: usize,

    stats: TreeStats,
}

impl<K, V, const B: usize> BTreeMap<K, V, B> {
    const SUPPORTED_BRANCHING_FACTOR: () = assert!(
        B >= MIN_BRANCHING_FACTOR,
        "B-tree branching factor must be at least 2"
    );

    /// Create an empty map: a single empty root leaf.
    pub fn new() -> Self {
        let () = Self::SUPPORTED_BRANCHING_FACTOR;

        let mut nodes = NodeArena::new();
        let root = nodes.allocate(Node::new());
        Self {
            nodes,
            root,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: size and shape
    // ========================================================================

    /// Number of elements in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if the map holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The branching factor this map was instantiated with.
    #[inline]
    pub const fn branching_factor(&self) -> usize {
        B
    }

    /// Number of levels, counting the root (1 for an empty map).
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut id = self.root;
        while let Some(child) = self.nodes.get(id).child(0) {
            height += 1;
            id = child;
        }
        height
    }

    /// Number of nodes currently allocated.
    pub fn node_count(&self) -> usize {
        self.nodes.live_count()
    }

    /// The root node, for inspecting the tree's top-level shape.
    pub fn root(&self) -> &Node<K, V, B> {
        self.nodes.get(self.root)
    }

    /// Structural event counters since construction or the last reset.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Reset the structural event counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Remove every element, leaving a single empty root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.allocate(Node::new());
        self.len = 0;
    }

    // ========================================================================
    // Public API: lookup
    // ========================================================================

    /// Borrow the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut id = self.root;
        loop {
            let node = self.nodes.get(id);
            match node.search(key) {
                Ok(index) => return Some(node.entry(index).1),
                // Past the leaves there is no child: the key is absent
                Err(index) => id = node.child(index)?,
            }
        }
    }

    /// Look up `key`, returning a copy of its value.
    ///
    /// The copy is a snapshot: changing it does not change the map.
    pub fn find<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        self.get(key).cloned()
    }

    /// True if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    // ========================================================================
    // Public API: traversal
    // ========================================================================

    /// Level-by-level dump of every node's keys.
    ///
    /// Layer 0 is the root. An empty map yields no layers.
    pub fn bfs(&self) -> Levels<K>
    where
        K: Clone,
    {
        let mut layers = Vec::new();
        self.collect_layers(self.root, 0, &mut layers);
        layers
    }

    /// All elements in ascending key order.
    ///
    /// Each child's elements are emitted before the key that follows it, so
    /// the output is sorted.
    pub fn preorder(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut elements = Vec::with_capacity(self.len);
        self.walk_in_order(self.root, &mut |k, v| elements.push((k.clone(), v.clone())));
        elements
    }

    fn collect_layers(&self, id: NodeId, depth: usize, layers: &mut Levels<K>)
    where
        K: Clone,
    {
        let node = self.nodes.get(id);
        if node.size() == 0 {
            return;
        }

        if layers.len() <= depth {
            layers.push(Vec::new());
        }
        layers[depth].push(node.keys().to_vec());

        for &child in node.children() {
            self.collect_layers(child, depth + 1, layers);
        }
    }

    fn walk_in_order<'a>(&'a self, id: NodeId, visit: &mut impl FnMut(&'a K, &'a V)) {
        let node = self.nodes.get(id);
        for index in 0..node.size() {
            if let Some(child) = node.child(index) {
                self.walk_in_order(child, visit);
            }
            let (key, value) = node.entry(index);
            visit(key, value);
        }
        if let Some(last) = node.child(node.size()) {
            self.walk_in_order(last, visit);
        }
    }
}

impl<K: Ord, V, const B: usize> BTreeMap<K, V, B> {
    // ========================================================================
    // Public API: insert
    // ========================================================================

    /// Insert `key` if it is absent.
    ///
    /// Returns `true` if the element was inserted, `false` if the key was
    /// already present. An existing value is never overwritten.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.insert_recursive(self.root, key, value) {
            Inserted::Duplicate => return false,
            Inserted::Absorbed => {}
            Inserted::Split(lower) => self.grow_root(lower),
        }
        self.len += 1;
        true
    }

    fn insert_recursive(&mut self, id: NodeId, key: K, value: V) -> Inserted<K, V, B> {
        let node = self.nodes.get(id);
        let index = match node.search(&key) {
            Ok(_) => return Inserted::Duplicate,
            Err(index) => index,
        };

        match node.child(index) {
            // No child at the insert position: this is a leaf
            None => {
                self.nodes.get_mut(id).insert(key, value);
            }
            Some(child) => match self.insert_recursive(child, key, value) {
                Inserted::Split(lower) => self.adopt(id, index, lower),
                settled => return settled,
            },
        }

        match self.nodes.get_mut(id).split() {
            Some(lower) => {
                self.stats.splits += 1;
                trace!(node = %id, "split full node");
                Inserted::Split(lower)
            }
            None => Inserted::Absorbed,
        }
    }

    /// Link the lower half of a split child in at `index`, promoting its
    /// largest element into `parent` as the new separator.
    fn adopt(&mut self, parent: NodeId, index: usize, mut lower: Node<K, V, B>) {
        let (key, value) = lower.remove(B - 1);
        let lower = self.nodes.allocate(lower);

        let node = self.nodes.get_mut(parent);
        let slot = node.insert(key, value);
        debug_assert_eq!(slot, index, "promoted key must land at the split child's slot");
        node.add_child(lower, index);
    }

    /// The root split: put a new root above the two halves.
    fn grow_root(&mut self, mut lower: Node<K, V, B>) {
        let (key, value) = lower.remove(B - 1);
        let left = self.nodes.allocate(lower);
        let right = self.root;

        self.root = self
            .nodes
            .allocate(Node::with_root(key, value, left, right));
        self.stats.root_splits += 1;
        debug!(root = %self.root, height = self.height(), "root split, tree grew one level");
    }

    // ========================================================================
    // Public API: erase
    // ========================================================================

    /// Remove `key`, returning its value if it was present.
    pub fn erase<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let value = self.erase_recursive(self.root, key)?;
        self.len -= 1;
        self.collapse_root();
        Some(value)
    }

    fn erase_recursive<Q>(&mut self, id: NodeId, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.nodes.get(id);
        match node.search(key) {
            Ok(index) => {
                let right = node.child(index + 1);
                let (_, value) = self.nodes.get_mut(id).remove(index);

                // Internal node: refill the slot with the smallest element of
                // the right subtree
                if let Some(right) = right {
                    let (successor_key, successor_value) = self.remove_smallest(right);
                    self.nodes
                        .get_mut(id)
                        .insert(successor_key, successor_value);
                    self.rebalance_child(id, index + 1);
                }
                Some(value)
            }
            Err(index) => {
                let child = node.child(index)?;
                let value = self.erase_recursive(child, key)?;
                self.rebalance_child(id, index);
                Some(value)
            }
        }
    }

    /// Remove the smallest element of the subtree rooted at `id`.
    fn remove_smallest(&mut self, id: NodeId) -> (K, V) {
        match self.nodes.get(id).child(0) {
            None => self.nodes.get_mut(id).remove(0),
            Some(first) => {
                let smallest = self.remove_smallest(first);
                self.rebalance_child(id, 0);
                smallest
            }
        }
    }

    /// Repair `parent`'s child at `index` if it dropped below `B - 1` keys.
    ///
    /// Merging is preferred over borrowing, and the left sibling over the
    /// right. A merge takes a key from `parent`, so the caller one level up
    /// checks `parent` in turn; a borrow leaves `parent`'s size unchanged.
    fn rebalance_child(&mut self, parent: NodeId, index: usize) {
        let node = self.nodes.get(parent);
        let children = node.children();
        if self.nodes.get(children[index]).size() >= min_keys(B) {
            return;
        }

        let left_size = index
            .checked_sub(1)
            .map(|left| self.nodes.get(children[left]).size());
        let right_size = node
            .child(index + 1)
            .map(|right| self.nodes.get(right).size());

        match (left_size, right_size) {
            (Some(size), _) if size <= B => self.merge(parent, index - 1),
            (_, Some(size)) if size <= B => self.merge(parent, index),
            (Some(_), _) => self.borrow_from_left(parent, index),
            (None, Some(_)) => self.borrow_from_right(parent, index),
            // Only child of a keyless root; collapse_root takes care of it
            (None, None) => {}
        }
    }

    /// Merge the children on either side of `parent`'s key at `separator`,
    /// demoting that key between them. The right child is freed.
    fn merge(&mut self, parent: NodeId, separator: usize) {
        let node = self.nodes.get_mut(parent);
        let demoted = node.remove(separator);
        let right = node.remove_child(separator + 1);
        let left = node.children()[separator];

        let absorbed = self.nodes.release(right);
        self.nodes.get_mut(left).absorb(demoted, absorbed);
        self.stats.merges += 1;
        trace!(%parent, %left, %right, "merged siblings");
    }

    /// Rotate right: the left sibling's largest element moves up to the
    /// separator slot and the old separator moves down to the front of the
    /// child, along with the sibling's last subtree.
    fn borrow_from_left(&mut self, parent: NodeId, index: usize) {
        let children = self.nodes.get(parent).children();
        let (left, child) = (children[index - 1], children[index]);

        let (key, value, edge) = self.nodes.get_mut(left).pop_last();
        let (key, value) = self.nodes.get_mut(parent).replace(index - 1, key, value);
        self.nodes.get_mut(child).push_first(key, value, edge);
        self.stats.borrows_from_left += 1;
        trace!(%parent, %child, donor = %left, "borrowed from left sibling");
    }

    /// Rotate left: mirror image of [`borrow_from_left`](Self::borrow_from_left).
    fn borrow_from_right(&mut self, parent: NodeId, index: usize) {
        let children = self.nodes.get(parent).children();
        let (child, right) = (children[index], children[index + 1]);

        let (key, value, edge) = self.nodes.get_mut(right).pop_first();
        let (key, value) = self.nodes.get_mut(parent).replace(index, key, value);
        self.nodes.get_mut(child).push_last(key, value, edge);
        self.stats.borrows_from_right += 1;
        trace!(%parent, %child, donor = %right, "borrowed from right sibling");
    }

    /// Replace a keyless root by its only child, shrinking the tree one level.
    fn collapse_root(&mut self) {
        let Some(child) = self.nodes.get_mut(self.root).take_only_child() else {
            return;
        };

        let old_root = self.root;
        self.nodes.release(old_root);
        self.root = child;
        self.stats.root_collapses += 1;
        debug!(%old_root, root = %self.root, "root collapsed, tree shrank one level");
    }
}

impl<K, V, const B: usize> Default for BTreeMap<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, const B: usize> fmt::Debug for BTreeMap<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = Vec::with_capacity(self.len);
        self.walk_in_order(self.root, &mut |k, v| entries.push((k, v)));
        f.debug_map().entries(entries).finish()
    }
}
