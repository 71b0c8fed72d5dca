// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: host-owned menu item trees and the index built over them.
//!
//! A disclosure-menu engine reads a tree of items the host owns and never
//! mutates it. This crate provides the two halves of that contract:
//!
//! - [`MenuItem`]: the recursive item description supplied by the host.
//!   Items carry an id, a label, a disabled flag, and an ordered list of
//!   children. An item with children is a **branch** (it opens a submenu);
//!   an item without children is a **leaf** (it can be selected).
//! - [`ItemIndex`]: a flattened, read-only index over a slice of root items,
//!   answering the queries the engine needs per event: id lookup,
//!   parent/children, root→item paths, depth, and enabled state.
//!
//! The index borrows the host's items, so it is rebuilt whenever the host
//! tree changes identity. Engine state machines take `&ItemIndex` as an
//! argument per transition instead of owning it, which keeps the runtime
//! state free of borrow lifetimes.
//!
//! Item ids are generic over any small, copyable handle `K` (an integer, an
//! interned symbol, a slotmap key). Ids must be unique within one tree;
//! duplicates are tolerated (the first occurrence wins) and reported via
//! [`ItemIndex::duplicates`] so hosts can assert on them.
//!
//! ## Example
//!
//! ```rust
//! use trellis_tree::{ItemIndex, MenuItem};
//!
//! let items = vec![
//!     MenuItem::branch(1_u32, "File", vec![
//!         MenuItem::leaf(10, "Open"),
//!         MenuItem::leaf(11, "Save").with_disabled(true),
//!     ]),
//!     MenuItem::leaf(2, "About"),
//! ];
//!
//! let index = ItemIndex::new(&items);
//! assert!(index.is_branch(&1));
//! assert!(index.is_leaf(&2));
//! assert_eq!(index.parent_of(&10), Some(1));
//! assert_eq!(index.children_of(&1), &[10, 11]);
//! assert!(index.is_disabled(&11));
//! assert_eq!(index.path_to(&10).as_slice(), &[1, 10]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod item;

pub use index::{ItemIndex, ItemPath};
pub use item::MenuItem;
