// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Menu: headless state machines for disclosure menus.
//!
//! ## Overview
//!
//! This crate coordinates everything a "click/hover-to-reveal-a-list"
//! control needs besides rendering: open/closed state across a tree of
//! menus, hover-intent timing so nested submenus don't flicker, selection
//! semantics, keyboard traversal, placement, and outside-interaction
//! detection. It is render-agnostic: hosts feed it pointer/keyboard
//! transitions plus measured rectangles and receive a typed
//! [`MenuEvent`](events::MenuEvent) stream back.
//!
//! Two entry points cover the two menu families:
//!
//! - [`MenuController`](controller::MenuController): the click-activated,
//!   single-level machine behind selector menus (language, currency, user
//!   menu).
//! - [`HoverCoordinator`](coordinator::HoverCoordinator): the
//!   hover-activated generalization across nested depth (top navigation,
//!   items nesting four levels and beyond), with open-intent and
//!   close-intent delays, sibling-exclusive swaps, and stale-timer
//!   guards.
//!
//! Both compose [`SelectionState`](selection::SelectionState) (persisted
//! `selected` vs transient `active`), the row policies from
//! [`trellis_keynav`], placement from [`trellis_placement`], and the item
//! index from [`trellis_tree`].
//!
//! ## Time and concurrency
//!
//! Everything is single-threaded and event-driven. The only suspension
//! points are the hover-intent deadlines, which are plain data: hosts pass
//! monotonic millisecond timestamps into each transition, wake at
//! [`HoverCoordinator::next_deadline`](coordinator::HoverCoordinator::next_deadline),
//! and drive due intents with
//! [`HoverCoordinator::advance`](coordinator::HoverCoordinator::advance).
//! Explicit actions cancel conflicting deadlines synchronously, so a
//! timer firing "after the fact" can never undo or duplicate an action's
//! effect.
//!
//! ## Minimal example
//!
//! A language selector: open, pick `fr`, observe exactly one selection.
//!
//! ```rust
//! use trellis_menu::controller::MenuController;
//! use trellis_menu::events::MenuEvent;
//! use trellis_tree::{ItemIndex, MenuItem};
//!
//! let items = vec![
//!     MenuItem::leaf("eng", "English"),
//!     MenuItem::leaf("fr", "French"),
//! ];
//! let index = ItemIndex::new(&items);
//! let mut menu = MenuController::with_selected("eng");
//!
//! menu.activate(&index);
//! assert!(menu.is_open());
//!
//! let events = menu.select(&index, "fr");
//! assert_eq!(events.first(), Some(&MenuEvent::Selected { id: "fr" }));
//! assert_eq!(menu.selected(), Some("fr"));
//! assert!(!menu.is_open());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controller;
pub mod coordinator;
pub mod events;
pub mod region;
pub mod selection;

pub use controller::MenuController;
pub use coordinator::{HoverCoordinator, IntentDelays, OpenState};
pub use events::{IgnoreReason, MenuEvent};
pub use region::{RegionFlags, RegionMap};
pub use selection::{SelectOutcome, SelectionState};
