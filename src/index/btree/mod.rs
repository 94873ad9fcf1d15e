//! B-tree map implementation.
//!
//! # Components
//! - [`BTreeMap`] - The ordered map: insert, erase, find, traversals
//! - [`Node`] - Per-node storage and the split/insert/remove primitives
//! - [`TreeStats`] - Counters for splits, merges, borrows and root changes
//!
//! Nodes live in an arena owned by the map and are addressed by
//! [`NodeId`](crate::NodeId); a node owns no other node directly.

mod arena;
mod map;
mod node;
mod stats;
mod validate;

pub use map::{BTreeMap, Levels};
pub use node::Node;
pub use stats::TreeStats;
