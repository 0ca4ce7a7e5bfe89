//! An ordered map backed by an unbalanced binary search tree.
//!
//! [`Map`] keeps its entries in a plain binary search tree: every key in a
//! node's left subtree orders strictly before the node's key and every key in
//! its right subtree strictly after, under a total order supplied by the
//! [`compare`] crate (the natural order of the keys by default). Inserting an
//! already-present key replaces its value in place, so no two nodes ever hold
//! equal keys.
//!
//! The tree is deliberately *not* self-balancing: there are no rotations, and
//! a sorted insertion sequence degrades the tree into a list with `O(n)`
//! operations. In exchange the structure is small and predictable — every
//! operation is a single ordered descent from the root, and removal handles
//! the classic deletion cases (leaf, one child, two children via in-order
//! successor promotion) by splicing nodes out of their exclusively-owned
//! child slots.
//!
//! Lookups and removals of absent keys fail with [`NotFound`], which carries
//! the offending key.
//!
//! # Examples
//!
//! ```
//! use bstmap::{Map, NotFound};
//!
//! let mut map = Map::new();
//!
//! map.insert(20, "j");
//! map.insert(10, "g");
//! map.insert(40, "h");
//!
//! assert_eq!(map.get(&10), Ok(&"g"));
//! assert_eq!(map.get(&15), Err(NotFound { key: 15 }));
//!
//! assert_eq!(map.remove(&20), Ok((20, "j")));
//! assert!(!map.contains_key(&20));
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod map;

mod node;

#[cfg(feature = "quickcheck")]
mod quickcheck;

pub use self::error::NotFound;
pub use self::map::Map;
