// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-activated open/closed state machine for single-level selector
//! menus (language pickers, currency pickers, user menus).
//!
//! The controller is deliberately flat: items with children are out of its
//! scope and rejected with a diagnostic. Nested, hover-activated trees are
//! handled by [`crate::coordinator::HoverCoordinator`], which generalizes
//! this machine across depth.
//!
//! ## Contract
//!
//! - [`MenuController::activate`] toggles open/closed;
//!   [`MenuController::close`] forces closed.
//! - The menu closes on outside pointer interaction, `Dismiss` (Escape),
//!   successful selection, or re-activation of an already-open trigger.
//! - Exactly one [`MenuEvent::OpenChanged`] per actual boundary change:
//!   repeated identical requests emit nothing.
//! - Every close emits [`MenuEvent::FocusTrigger`] so the host returns
//!   keyboard focus to the trigger.
//! - A host-controlled `open` flag can be installed with
//!   [`MenuController::set_controlled_open`]; the engine falls back to its
//!   internal state when uncontrolled.

use core::hash::Hash;

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};

use trellis_keynav::{Dir, NavIntent, RowEntry, first_enabled, last_enabled, step, typeahead};
use trellis_placement::{Anchor, Placement, resolve};
use trellis_tree::ItemIndex;

use crate::events::{IgnoreReason, MenuEvent};
use crate::selection::{SelectOutcome, SelectionState};

/// Click-activated single-level menu state machine.
#[derive(Clone, Debug)]
pub struct MenuController<K> {
    open: bool,
    controlled_open: Option<bool>,
    selection: SelectionState<K>,
    anchor: Anchor,
    trigger_region: Option<Rect>,
    content_region: Option<Rect>,
}

impl<K> Default for MenuController<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> MenuController<K>
where
    K: Copy + Eq + Hash,
{
    /// Create a closed controller with nothing selected.
    pub fn new() -> Self {
        Self {
            open: false,
            controlled_open: None,
            selection: SelectionState::new(),
            anchor: Anchor::default(),
            trigger_region: None,
            content_region: None,
        }
    }

    /// Create a closed controller with an initial committed selection.
    pub fn with_selected(selected: K) -> Self {
        Self {
            selection: SelectionState::with_selected(selected),
            ..Self::new()
        }
    }

    /// Whether the menu is effectively open (controlled flag wins).
    pub fn is_open(&self) -> bool {
        self.controlled_open.unwrap_or(self.open)
    }

    /// The committed selection, if any.
    pub fn selected(&self) -> Option<K> {
        self.selection.selected()
    }

    /// The transient active item, if any.
    pub fn active(&self) -> Option<K> {
        self.selection.active()
    }

    /// Overwrite the committed selection (host-controlled `selected`).
    pub fn set_selected(&mut self, selected: Option<K>) {
        self.selection.set_selected(selected);
    }

    /// Set the placement preference for the content surface.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
    }

    /// Record the trigger's measured rect.
    pub fn set_trigger_region(&mut self, rect: Rect) {
        self.trigger_region = Some(rect);
    }

    /// Record the content surface's measured rect while open.
    pub fn set_content_region(&mut self, rect: Rect) {
        self.content_region = Some(rect);
    }

    /// Install or remove a host-controlled `open` flag.
    ///
    /// Installing a value that changes the effective state emits the
    /// corresponding `OpenChanged`. Removing control adopts the last
    /// effective state as the internal one, so nothing jumps.
    pub fn set_controlled_open(&mut self, controlled: Option<bool>) -> Vec<MenuEvent<K>> {
        let before = self.is_open();
        if controlled.is_none() {
            self.open = before;
        }
        self.controlled_open = controlled;
        let mut events = Vec::new();
        self.note_boundary(before, &mut events);
        events
    }

    /// Resolve where the content surface goes, given its measured size.
    ///
    /// An unmeasured trigger falls back to the default below-start
    /// placement inside `viewport`.
    pub fn placement(&self, content: Size, viewport: Rect, margin: f64) -> Placement {
        resolve(
            self.trigger_region.unwrap_or(Rect::ZERO),
            content,
            self.anchor,
            viewport,
            margin,
        )
    }

    /// Toggle the menu: open it if closed, close it if open.
    pub fn activate(&mut self, index: &ItemIndex<'_, K>) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        if self.is_open() {
            self.close_into(&mut events);
            return events;
        }
        if index.is_empty() {
            events.push(MenuEvent::Ignored {
                id: None,
                reason: IgnoreReason::EmptyMenu,
            });
            return events;
        }
        let before = self.is_open();
        self.open = true;
        self.note_boundary(before, &mut events);
        // Roving focus starts on the committed selection when it is still
        // selectable.
        if self.is_open()
            && let Some(sel) = self.selection.selected()
            && self.selection.set_active(index, Some(sel)) == Ok(true)
        {
            events.push(MenuEvent::ActiveChanged { id: Some(sel) });
        }
        events
    }

    /// Force the menu closed.
    pub fn close(&mut self) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        self.close_into(&mut events);
        events
    }

    /// Select an item by id.
    ///
    /// A leaf commits: `Selected` fires exactly once and the menu closes.
    /// Branch items are out of scope for this controller and rejected.
    pub fn select(&mut self, index: &ItemIndex<'_, K>, id: K) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        match self.selection.select(index, id) {
            SelectOutcome::Commit(id) => {
                events.push(MenuEvent::Selected { id });
                self.close_into(&mut events);
            }
            SelectOutcome::OpenBranch(id) => {
                events.push(MenuEvent::Ignored {
                    id: Some(id),
                    reason: IgnoreReason::BranchItem,
                });
            }
            SelectOutcome::Rejected(reason) => {
                events.push(MenuEvent::Ignored {
                    id: Some(id),
                    reason,
                });
            }
        }
        events
    }

    /// Move the active item from pointer hover.
    pub fn hover(&mut self, index: &ItemIndex<'_, K>, id: K) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        match self.selection.set_active(index, Some(id)) {
            Ok(true) => events.push(MenuEvent::ActiveChanged { id: Some(id) }),
            Ok(false) => {}
            Err(reason) => events.push(MenuEvent::Ignored {
                id: Some(id),
                reason,
            }),
        }
        events
    }

    /// Apply a keyboard intent.
    ///
    /// While closed, `Activate`/`Next`/`Prev` open the menu; everything
    /// else is a no-op. While open, movement intents rove the active item
    /// over the list, `Activate` selects it, and `Dismiss` closes.
    pub fn key(&mut self, index: &ItemIndex<'_, K>, intent: NavIntent) -> Vec<MenuEvent<K>> {
        if !self.is_open() {
            return match intent {
                NavIntent::Activate | NavIntent::Next | NavIntent::Prev => self.activate(index),
                _ => Vec::new(),
            };
        }

        let rows: Vec<RowEntry<'_, K>> = index
            .roots()
            .iter()
            .map(|&id| {
                RowEntry::new(id, index.label(&id).unwrap_or(""), !index.is_disabled(&id))
            })
            .collect();

        let active = self.selection.active();
        let target = match intent {
            NavIntent::Next => step(&rows, active, Dir::Next),
            NavIntent::Prev => step(&rows, active, Dir::Prev),
            NavIntent::First => first_enabled(&rows),
            NavIntent::Last => last_enabled(&rows),
            NavIntent::Typeahead(ch) => typeahead(&rows, active, ch),
            NavIntent::Activate => {
                return match active {
                    Some(id) => self.select(index, id),
                    None => Vec::new(),
                };
            }
            NavIntent::Dismiss => return self.close(),
            // Single level: there is no depth to traverse.
            NavIntent::EnterChild | NavIntent::ExitToParent => return Vec::new(),
        };

        let mut events = Vec::new();
        if let Some(id) = target
            && self.selection.set_active(index, Some(id)) == Ok(true)
        {
            events.push(MenuEvent::ActiveChanged { id: Some(id) });
        }
        events
    }

    /// Route a pointer-down by position: a press outside the trigger and
    /// content regions closes the menu.
    pub fn pointer_down(&mut self, point: Point) -> Vec<MenuEvent<K>> {
        let inside = self.trigger_region.is_some_and(|r| r.contains(point))
            || (self.is_open() && self.content_region.is_some_and(|r| r.contains(point)));
        if inside {
            return Vec::new();
        }
        self.close()
    }

    fn close_into(&mut self, events: &mut Vec<MenuEvent<K>>) {
        let before = self.is_open();
        self.open = false;
        self.content_region = None;
        if self.selection.clear_active() {
            events.push(MenuEvent::ActiveChanged { id: None });
        }
        self.note_boundary(before, events);
        if before && !self.is_open() {
            events.push(MenuEvent::FocusTrigger);
        }
    }

    fn note_boundary(&self, before: bool, events: &mut Vec<MenuEvent<K>>) {
        let after = self.is_open();
        if before != after {
            events.push(MenuEvent::OpenChanged {
                id: None,
                open: after,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use trellis_tree::MenuItem;

    fn languages() -> Vec<MenuItem<&'static str>> {
        vec![
            MenuItem::leaf("eng", "English"),
            MenuItem::leaf("fr", "French"),
            MenuItem::leaf("de", "German").with_disabled(true),
        ]
    }

    fn open_changes<K: Copy>(events: &[MenuEvent<K>]) -> Vec<bool> {
        events
            .iter()
            .filter_map(|e| match e {
                MenuEvent::OpenChanged { open, .. } => Some(*open),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn selector_round_trip() {
        // Scenario: a language selector starting on `eng`.
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu = MenuController::with_selected("eng");

        let events = menu.activate(&index);
        assert_eq!(open_changes(&events), vec![true]);
        assert!(menu.is_open());
        // Roving focus starts on the committed selection.
        assert_eq!(menu.active(), Some("eng"));

        let events = menu.select(&index, "fr");
        assert_eq!(
            events.first(),
            Some(&MenuEvent::Selected { id: "fr" })
        );
        assert_eq!(
            events.iter().filter(|e| matches!(e, MenuEvent::Selected { .. })).count(),
            1
        );
        assert_eq!(open_changes(&events), vec![false]);
        assert!(events.contains(&MenuEvent::FocusTrigger));
        assert_eq!(menu.selected(), Some("fr"));
        assert!(!menu.is_open());
    }

    #[test]
    fn reactivation_toggles_closed() {
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();

        menu.activate(&index);
        let events = menu.activate(&index);
        assert_eq!(open_changes(&events), vec![false]);
        assert!(events.contains(&MenuEvent::FocusTrigger));
    }

    #[test]
    fn open_changed_fires_exactly_once_per_boundary() {
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();

        menu.activate(&index);
        // Redundant close requests after the first emit nothing.
        let first = menu.close();
        assert_eq!(open_changes(&first), vec![false]);
        assert!(menu.close().is_empty());
        assert!(menu.pointer_down(Point::new(999.0, 999.0)).is_empty());
    }

    #[test]
    fn outside_press_closes_inside_press_does_not() {
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();
        menu.set_trigger_region(Rect::new(0.0, 0.0, 80.0, 24.0));
        menu.activate(&index);
        menu.set_content_region(Rect::new(0.0, 24.0, 120.0, 120.0));

        assert!(menu.pointer_down(Point::new(40.0, 60.0)).is_empty());
        assert!(menu.is_open());

        let events = menu.pointer_down(Point::new(500.0, 500.0));
        assert_eq!(open_changes(&events), vec![false]);
        assert!(!menu.is_open());
    }

    #[test]
    fn keyboard_roves_and_commits() {
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();

        // ArrowDown on a closed trigger opens the menu.
        menu.key(&index, NavIntent::Next);
        assert!(menu.is_open());

        menu.key(&index, NavIntent::Next);
        assert_eq!(menu.active(), Some("eng"));
        menu.key(&index, NavIntent::Next);
        assert_eq!(menu.active(), Some("fr"));
        // "German" is disabled; movement clamps on "fr".
        menu.key(&index, NavIntent::Next);
        assert_eq!(menu.active(), Some("fr"));

        let events = menu.key(&index, NavIntent::Activate);
        assert!(events.contains(&MenuEvent::Selected { id: "fr" }));
        assert!(!menu.is_open());
        assert_eq!(menu.selected(), Some("fr"));
    }

    #[test]
    fn dismiss_closes_and_returns_focus() {
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();
        menu.activate(&index);

        let events = menu.key(&index, NavIntent::Dismiss);
        assert_eq!(open_changes(&events), vec![false]);
        assert!(events.contains(&MenuEvent::FocusTrigger));
    }

    #[test]
    fn branch_disabled_and_unknown_selections_are_ignored() {
        let items = vec![
            MenuItem::branch("b", "Branch", vec![MenuItem::leaf("b1", "Child")]),
            MenuItem::leaf("d", "Disabled").with_disabled(true),
        ];
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();
        menu.activate(&index);

        assert_eq!(
            menu.select(&index, "b"),
            vec![MenuEvent::Ignored {
                id: Some("b"),
                reason: IgnoreReason::BranchItem
            }]
        );
        assert_eq!(
            menu.select(&index, "d"),
            vec![MenuEvent::Ignored {
                id: Some("d"),
                reason: IgnoreReason::DisabledItem
            }]
        );
        assert_eq!(
            menu.select(&index, "nope"),
            vec![MenuEvent::Ignored {
                id: Some("nope"),
                reason: IgnoreReason::UnknownId
            }]
        );
        assert!(menu.is_open());
        assert_eq!(menu.selected(), None);
    }

    #[test]
    fn empty_menu_cannot_open() {
        let items: Vec<MenuItem<&str>> = Vec::new();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();

        let events = menu.activate(&index);
        assert_eq!(
            events,
            vec![MenuEvent::Ignored {
                id: None,
                reason: IgnoreReason::EmptyMenu
            }]
        );
        assert!(!menu.is_open());
    }

    #[test]
    fn controlled_open_wins_over_internal_state() {
        let items = languages();
        let index = ItemIndex::new(&items);
        let mut menu: MenuController<&str> = MenuController::new();

        let events = menu.set_controlled_open(Some(true));
        assert_eq!(open_changes(&events), vec![true]);
        assert!(menu.is_open());

        // Internal transitions cannot cross the controlled boundary.
        let events = menu.activate(&index);
        assert!(open_changes(&events).is_empty());
        assert!(menu.is_open());

        // Releasing control adopts the effective state.
        let events = menu.set_controlled_open(None);
        assert!(open_changes(&events).is_empty());
        assert!(menu.is_open());
    }

    #[test]
    fn placement_uses_trigger_and_falls_back_when_unmeasured() {
        let mut menu: MenuController<&str> = MenuController::new();
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        let fallback = menu.placement(Size::new(100.0, 50.0), viewport, 8.0);
        assert_eq!(fallback.rect.origin(), Point::new(8.0, 8.0));

        menu.set_trigger_region(Rect::new(100.0, 10.0, 180.0, 34.0));
        let placed = menu.placement(Size::new(100.0, 50.0), viewport, 8.0);
        assert_eq!(placed.rect.origin(), Point::new(100.0, 34.0));
    }
}
