//! Node arena - owns every node of a tree.
//!
//! Nodes are stored in a `Vec` of slots and referenced by [`NodeId`].
//! Released slots go on a free list and are handed out again before the
//! vector grows, so a tree that shrinks and regrows reuses its memory.

use crate::common::NodeId;

/// Slot storage for tree nodes.
///
/// # Layout
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ slots: Vec<Option<T>>                        │
/// │  [Some(n0)] [None] [Some(n2)] [Some(n3)] ... │
/// └──────────────────────────────────────────────┘
/// ┌──────────────────┐
/// │ free_list        │  ids of the `None` slots
/// │ Vec<NodeId>      │  (LIFO for cache locality)
/// └──────────────────┘
/// ```
///
/// Looking up a released slot is a bug in the caller; `get`/`get_mut`
/// panic in that case because the tree algorithms only hold ids of live
/// nodes.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<NodeId>,
}

impl<T> NodeArena<T> {
    /// Create an empty arena.
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store a node and return its id.
    pub(crate) fn allocate(&mut self, node: T) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Take a node out of the arena, freeing its slot.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        let node = self.slots[id.0]
            .take()
            .unwrap_or_else(|| panic!("{} released twice", id));
        self.free_list.push(id);
        node
    }

    /// Borrow a live node.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        self.slots[id.0]
            .as_ref()
            .unwrap_or_else(|| panic!("{} is not a live node", id))
    }

    /// Mutably borrow a live node.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.0]
            .as_mut()
            .unwrap_or_else(|| panic!("{} is not a live node", id))
    }

    /// Borrow a node if its slot is live.
    #[inline]
    pub(crate) fn try_get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Number of live nodes.
    pub(crate) fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Drop every node and forget all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}
