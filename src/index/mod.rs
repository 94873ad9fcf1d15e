//! Index structures.
//!
//! - [`btree`] - In-memory B-tree map

pub mod btree;
