// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattened read-only index over a host item tree.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::item::MenuItem;

/// Root→item id path. Inline up to the practical nesting depth.
pub type ItemPath<K> = SmallVec<[K; 4]>;

/// Per-item slot in the flattened index.
#[derive(Debug)]
struct Slot<'a, K> {
    item: &'a MenuItem<K>,
    parent: Option<usize>,
    children: Vec<K>,
    depth: u8,
}

/// A read-only index over one menu tree.
///
/// Built once per host tree identity via [`ItemIndex::new`] and passed by
/// reference into every engine transition. All queries are by id and return
/// `Option`/`bool` answers; unknown ids are never an error here, they simply
/// answer negatively so callers can absorb them as diagnostics.
#[derive(Debug)]
pub struct ItemIndex<'a, K> {
    slots: Vec<Slot<'a, K>>,
    by_id: HashMap<K, usize>,
    roots: Vec<K>,
    duplicates: Vec<K>,
}

impl<'a, K> ItemIndex<'a, K>
where
    K: Copy + Eq + Hash,
{
    /// Build an index over the given root items.
    ///
    /// Duplicate ids keep their first occurrence; later occurrences are
    /// recorded in [`ItemIndex::duplicates`] and are unreachable through
    /// the index.
    pub fn new(items: &'a [MenuItem<K>]) -> Self {
        let mut index = Self {
            slots: Vec::new(),
            by_id: HashMap::new(),
            roots: Vec::new(),
            duplicates: Vec::new(),
        };
        for item in items {
            index.insert(item, None, 0);
        }
        index.roots = items.iter().map(|i| i.id).collect();
        index
    }

    fn insert(&mut self, item: &'a MenuItem<K>, parent: Option<usize>, depth: u8) {
        if self.by_id.contains_key(&item.id) {
            self.duplicates.push(item.id);
            return;
        }
        let slot = self.slots.len();
        self.slots.push(Slot {
            item,
            parent,
            children: item.children.iter().map(|c| c.id).collect(),
            depth,
        });
        self.by_id.insert(item.id, slot);
        for child in &item.children {
            self.insert(child, Some(slot), depth.saturating_add(1));
        }
    }

    fn slot(&self, id: &K) -> Option<&Slot<'a, K>> {
        self.by_id.get(id).map(|&i| &self.slots[i])
    }

    /// Number of reachable items in the tree.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the tree has no items at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` names an item in this tree.
    pub fn contains(&self, id: &K) -> bool {
        self.by_id.contains_key(id)
    }

    /// Ids that occurred more than once while building. Empty for
    /// well-formed trees.
    pub fn duplicates(&self) -> &[K] {
        &self.duplicates
    }

    /// Root item ids in host order.
    pub fn roots(&self) -> &[K] {
        &self.roots
    }

    /// The item for `id`, if present.
    pub fn item(&self, id: &K) -> Option<&'a MenuItem<K>> {
        self.slot(id).map(|s| s.item)
    }

    /// The label for `id`, if present.
    pub fn label(&self, id: &K) -> Option<&'a str> {
        self.slot(id).map(|s| s.item.label.as_str())
    }

    /// Whether `id` is present and disabled. Unknown ids answer `false`.
    pub fn is_disabled(&self, id: &K) -> bool {
        self.slot(id).is_some_and(|s| s.item.disabled)
    }

    /// Whether `id` is present and has children.
    pub fn is_branch(&self, id: &K) -> bool {
        self.slot(id).is_some_and(|s| !s.children.is_empty())
    }

    /// Whether `id` is present and has no children.
    pub fn is_leaf(&self, id: &K) -> bool {
        self.slot(id).is_some_and(|s| s.children.is_empty())
    }

    /// Child ids of `id` in host order. Unknown and leaf ids answer an
    /// empty slice.
    pub fn children_of(&self, id: &K) -> &[K] {
        self.slot(id).map_or(&[], |s| s.children.as_slice())
    }

    /// Parent id of `id`, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &K) -> Option<K> {
        let slot = self.slot(id)?;
        slot.parent.map(|p| self.slots[p].item.id)
    }

    /// Nesting depth of `id` (roots are depth 0).
    pub fn depth_of(&self, id: &K) -> Option<u8> {
        self.slot(id).map(|s| s.depth)
    }

    /// Root→`id` path, inclusive of `id`. Empty for unknown ids.
    pub fn path_to(&self, id: &K) -> ItemPath<K> {
        let mut path = ItemPath::new();
        let Some(&slot) = self.by_id.get(id) else {
            return path;
        };
        let mut cur = Some(slot);
        while let Some(i) = cur {
            path.push(self.slots[i].item.id);
            cur = self.slots[i].parent;
        }
        path.reverse();
        path
    }

    /// The sibling list containing `id`: its parent's children, or the
    /// roots for a root item. Empty for unknown ids.
    pub fn siblings_of(&self, id: &K) -> &[K] {
        let Some(slot) = self.slot(id) else {
            return &[];
        };
        match slot.parent {
            Some(p) => self.slots[p].children.as_slice(),
            None => &self.roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn tree() -> Vec<MenuItem<u32>> {
        vec![
            MenuItem::branch(
                1,
                "Products",
                vec![
                    MenuItem::branch(
                        10,
                        "Hardware",
                        vec![MenuItem::leaf(100, "Keyboards"), MenuItem::leaf(101, "Mice")],
                    ),
                    MenuItem::leaf(11, "Software").with_disabled(true),
                ],
            ),
            MenuItem::leaf(2, "Pricing"),
        ]
    }

    #[test]
    fn lookup_and_classification() {
        let items = tree();
        let index = ItemIndex::new(&items);

        assert_eq!(index.len(), 6);
        assert_eq!(index.roots(), &[1, 2]);
        assert!(index.is_branch(&1));
        assert!(index.is_branch(&10));
        assert!(index.is_leaf(&2));
        assert!(index.is_leaf(&100));
        assert!(index.is_disabled(&11));
        assert!(!index.is_disabled(&1));
        assert_eq!(index.label(&101), Some("Mice"));
        assert!(!index.contains(&999));
        assert!(!index.is_branch(&999));
        assert!(!index.is_leaf(&999));
    }

    #[test]
    fn parents_children_and_paths() {
        let items = tree();
        let index = ItemIndex::new(&items);

        assert_eq!(index.children_of(&1), &[10, 11]);
        assert_eq!(index.children_of(&2), &[] as &[u32]);
        assert_eq!(index.parent_of(&100), Some(10));
        assert_eq!(index.parent_of(&1), None);
        assert_eq!(index.depth_of(&100), Some(2));
        assert_eq!(index.path_to(&100).as_slice(), &[1, 10, 100]);
        assert_eq!(index.path_to(&1).as_slice(), &[1]);
        assert!(index.path_to(&999).is_empty());
        assert_eq!(index.siblings_of(&10), &[10, 11]);
        assert_eq!(index.siblings_of(&2), &[1, 2]);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let items = vec![
            MenuItem::leaf(1_u32, "first"),
            MenuItem::branch(2, "branch", vec![MenuItem::leaf(1, "shadowed")]),
        ];
        let index = ItemIndex::new(&items);

        assert_eq!(index.duplicates(), &[1]);
        assert_eq!(index.label(&1), Some("first"));
        // The shadowed child still appears in its parent's child list; it
        // resolves to the first occurrence on lookup.
        assert_eq!(index.children_of(&2), &[1]);
    }

    #[test]
    fn empty_tree() {
        let items: Vec<MenuItem<u32>> = Vec::new();
        let index = ItemIndex::new(&items);
        assert!(index.is_empty());
        assert!(index.roots().is_empty());
    }
}
