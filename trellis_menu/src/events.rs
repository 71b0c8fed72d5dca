// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typed event stream the engine emits toward the host.
//!
//! Trellis does not hold host callbacks. Every transition returns the
//! events it produced as plain data; the host dispatches them to whatever
//! rendering or focus machinery it owns. This keeps the exactly-once
//! guarantees directly observable: a test can assert on the literal event
//! sequence a transition produced.

use trellis_placement::Placement;

/// Why an input was absorbed as a no-op.
///
/// None of these are fatal; the engine stays in its last valid state and
/// reports the reason so hosts can log or assert on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The id does not exist in the current item tree.
    UnknownId,
    /// The item exists but is disabled.
    DisabledItem,
    /// The menu has no items to show.
    EmptyMenu,
    /// A branch item was handed to a single-level controller.
    BranchItem,
}

/// One engine→host event.
///
/// `OpenChanged` and `Selected` carry the exactly-once guarantees: one
/// `OpenChanged` per actual open/closed boundary transition, one `Selected`
/// per leaf commit. `Opening`/`Closing` intent phases are internal and
/// never surface here.
#[derive(Clone, Debug, PartialEq)]
pub enum MenuEvent<K> {
    /// A menu surface crossed the open/closed boundary.
    ///
    /// `id` is the branch item whose submenu changed, or `None` for the
    /// root level (the whole chain for a navigation tree, the single
    /// surface for a selector).
    OpenChanged {
        /// Branch item id, or `None` for the root level.
        id: Option<K>,
        /// The new state.
        open: bool,
    },
    /// A leaf item was committed. Emitted exactly once per commit.
    Selected {
        /// The committed leaf's id.
        id: K,
    },
    /// The transient active (roving focus) item changed.
    ActiveChanged {
        /// The new active item, or `None` when focus left the list.
        id: Option<K>,
    },
    /// The host should move keyboard focus back to the root trigger.
    FocusTrigger,
    /// Positioning output for an open surface; emitted on open and
    /// whenever the viewport or the measured content size changes.
    Placed {
        /// The branch item whose content was placed.
        id: K,
        /// The resolved placement.
        placement: Placement,
    },
    /// An input was absorbed as a no-op; diagnostic only.
    Ignored {
        /// The offending id, when there is one.
        id: Option<K>,
        /// Why the input was ignored.
        reason: IgnoreReason,
    },
}
