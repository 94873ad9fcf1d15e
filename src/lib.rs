//! btree-map - An in-memory ordered key-value map backed by a B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       BTreeMap<K, V, B>                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Map Layer (index/btree/map.rs)                │   │
//! │  │   insert → split/promote    erase → merge/borrow         │   │
//! │  │   find (binary-search descent)   bfs / preorder dumps    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Node Layer (index/btree/node.rs)              │   │
//! │  │   sorted keys/values, child ids, split, insert, remove   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Arena (index/btree/arena.rs)                  │   │
//! │  │        Vec<Option<Node>> + LIFO free list of slots       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The B-tree map itself
//!
//! # Quick Start
//! ```
//! use btree_map::BTreeMap;
//!
//! // Branching factor 3: nodes hold 2..=5 keys
//! let mut map: BTreeMap<u32, String, 3> = BTreeMap::new();
//! for k in 0..20 {
//!     map.insert(k, format!("value {k}"));
//! }
//!
//! assert_eq!(map.find(&7).as_deref(), Some("value 7"));
//! assert_eq!(map.erase(&7), Some("value 7".to_string()));
//! assert_eq!(map.len(), 19);
//! map.validate().unwrap();
//! ```
//!
//! # Logging
//! Structural events are emitted through `tracing`: splits, merges and
//! borrows at `TRACE`, root growth and collapse at `DEBUG`. The crate never
//! installs a subscriber.

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_BRANCHING_FACTOR, MIN_BRANCHING_FACTOR};
pub use common::{Error, NodeId, Result};

pub use index::btree::{BTreeMap, Levels, Node, TreeStats};
