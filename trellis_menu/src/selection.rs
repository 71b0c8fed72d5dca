// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection state: persisted `selected` vs transient `active`.
//!
//! The two are independent: `selected` is the committed choice of a
//! selector-style menu and survives the menu closing; `active` is the
//! roving pointer/keyboard focus target and lives only while the menu is
//! open. Disabled and unknown ids are rejected by both.
//!
//! [`SelectionState::select`] does not decide *how* a selection plays out;
//! it classifies the request into a [`SelectOutcome`] the owning
//! controller or coordinator acts on: branches open their children, leaves
//! commit and close the chain.

use core::hash::Hash;

use trellis_tree::ItemIndex;

use crate::events::IgnoreReason;

/// Outcome of a selection request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome<K> {
    /// A leaf was committed; `selected` now holds it. The caller must
    /// emit `Selected` exactly once and close the chain.
    Commit(K),
    /// The item is a branch; the caller should open its children instead.
    /// `selected` is untouched and no `Selected` event is due.
    OpenBranch(K),
    /// The request was absorbed; nothing changed.
    Rejected(IgnoreReason),
}

/// Persisted selection plus transient active item for one menu tree.
#[derive(Clone, Debug, Default)]
pub struct SelectionState<K> {
    selected: Option<K>,
    active: Option<K>,
}

impl<K> SelectionState<K>
where
    K: Copy + Eq + Hash,
{
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            selected: None,
            active: None,
        }
    }

    /// Create a selection with an initial committed item.
    pub fn with_selected(selected: K) -> Self {
        Self {
            selected: Some(selected),
            active: None,
        }
    }

    /// The committed selection, if any.
    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// The transient active item, if any.
    pub fn active(&self) -> Option<K> {
        self.active
    }

    /// Overwrite the committed selection (host-controlled `selected`).
    pub fn set_selected(&mut self, selected: Option<K>) {
        self.selected = selected;
    }

    /// Classify and apply a selection request.
    pub fn select(&mut self, index: &ItemIndex<'_, K>, id: K) -> SelectOutcome<K> {
        if !index.contains(&id) {
            return SelectOutcome::Rejected(IgnoreReason::UnknownId);
        }
        if index.is_disabled(&id) {
            return SelectOutcome::Rejected(IgnoreReason::DisabledItem);
        }
        if index.is_branch(&id) {
            return SelectOutcome::OpenBranch(id);
        }
        self.selected = Some(id);
        SelectOutcome::Commit(id)
    }

    /// Update the active item from pointer hover or keyboard movement.
    ///
    /// Returns `Ok(true)` when the active item changed, `Ok(false)` when
    /// the request was a no-op (already active), and `Err` when the id was
    /// rejected (unknown or disabled), leaving the state unchanged.
    pub fn set_active(
        &mut self,
        index: &ItemIndex<'_, K>,
        id: Option<K>,
    ) -> Result<bool, IgnoreReason> {
        if let Some(id) = id {
            if !index.contains(&id) {
                return Err(IgnoreReason::UnknownId);
            }
            if index.is_disabled(&id) {
                return Err(IgnoreReason::DisabledItem);
            }
        }
        let changed = self.active != id;
        self.active = id;
        Ok(changed)
    }

    /// Clear the active item, reporting whether anything changed.
    ///
    /// Unlike [`SelectionState::set_active`] this needs no index: clearing
    /// is always valid.
    pub fn clear_active(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Drop references to items that no longer exist in the tree.
    ///
    /// Call after the host replaces its item tree: a `selected` id that
    /// left the tree becomes undefined (cleared), and an `active` id that
    /// left the tree or became disabled is cleared.
    pub fn sync(&mut self, index: &ItemIndex<'_, K>) {
        if self.selected.is_some_and(|id| !index.contains(&id)) {
            self.selected = None;
        }
        if self
            .active
            .is_some_and(|id| !index.contains(&id) || index.is_disabled(&id))
        {
            self.active = None;
        }
    }
}
