// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing item description.

use alloc::string::String;
use alloc::vec::Vec;

/// One item in a menu tree.
///
/// The host owns these and hands the engine a `&[MenuItem<K>]` of roots.
/// Presentation (icons, typography, layout) stays on the host side; the
/// engine only consults structure, labels (for typeahead), and the
/// disabled flag.
///
/// There is no hard depth limit, but the engine is tuned for the practical
/// case of trees at most four levels deep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<K> {
    /// Identifier, unique within its tree.
    pub id: K,
    /// Display label; also the typeahead match target.
    pub label: String,
    /// Disabled items are skipped by focus traversal and rejected by
    /// selection.
    pub disabled: bool,
    /// Ordered children. Non-empty children make this item a branch.
    pub children: Vec<MenuItem<K>>,
}

impl<K> MenuItem<K> {
    /// Create a leaf item.
    pub fn leaf(id: K, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            disabled: false,
            children: Vec::new(),
        }
    }

    /// Create a branch item with the given children.
    pub fn branch(id: K, label: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            id,
            label: label.into(),
            disabled: false,
            children,
        }
    }

    /// Set the disabled flag, builder style.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether this item has children.
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }
}
