// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-activated coordination of a nested menu tree.
//!
//! The coordinator generalizes the single-level controller across depth:
//! one state machine per branch node, composed so that the set of open
//! nodes always forms a single root-to-node path. It owns the two intent
//! delays that make hover-driven navigation usable:
//!
//! - **Open intent**: entering a closed branch trigger arms a short timer
//!   (default 150 ms). Brushing across the trigger and leaving before it
//!   fires cancels silently; nothing observable happens.
//! - **Close intent**: leaving an open node's region arms a longer timer
//!   (default 300 ms, tolerating diagonal pointer travel toward the
//!   submenu). Re-entering the trigger, the submenu content, or any
//!   descendant region before it fires cancels the close with no
//!   observable change.
//!
//! Swapping between sibling branches therefore never passes through a
//! frame where the whole chain is closed: the new sibling's open intent
//! fires while the old sibling is still in its close grace, and the swap
//! is applied atomically (one close, one open, no root-level close).
//!
//! ## Time
//!
//! The coordinator never reads a clock. Pointer and keyboard transitions
//! take a monotonic millisecond timestamp, intents become pending
//! deadlines, and the host drives them with [`HoverCoordinator::advance`],
//! waking at [`HoverCoordinator::next_deadline`]. Every scheduled intent
//! captures a token for its node; a timer that was cancelled or superseded
//! fails the token check when it comes due and is dropped without effect,
//! so a stale callback can never close a menu the user has since reopened.
//!
//! Explicit actions (selection, Escape/`Dismiss`, outside interaction)
//! pre-empt timers: they cancel every pending intent in the affected
//! subtree synchronously, then apply their own transition.

use core::hash::Hash;

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};

use trellis_keynav::{Dir, NavIntent, RowEntry, first_enabled, last_enabled, step, typeahead};
use trellis_placement::{Align, Anchor, Side, resolve};
use trellis_tree::{ItemIndex, ItemPath};

use crate::events::{IgnoreReason, MenuEvent};
use crate::region::{RegionFlags, RegionMap};
use crate::selection::{SelectOutcome, SelectionState};

/// Hover-intent delays in milliseconds.
///
/// The close delay is intentionally longer than the open delay so a
/// pointer can travel diagonally from a trigger into its submenu without
/// the submenu collapsing underneath it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntentDelays {
    /// Hover time before a branch opens.
    pub open_ms: u64,
    /// Grace period after leaving before a branch closes.
    pub close_ms: u64,
}

impl Default for IntentDelays {
    fn default() -> Self {
        Self {
            open_ms: 150,
            close_ms: 300,
        }
    }
}

/// Observable disclosure state of one branch node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenState {
    /// Not materialized.
    Closed,
    /// Open intent armed; nothing visible yet.
    Opening,
    /// Submenu visible.
    Open,
    /// Still visible, close intent armed.
    Closing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Opening,
    Open,
    Closing,
}

#[derive(Copy, Clone, Debug)]
struct NodeState {
    phase: Phase,
    /// Token of the pending intent, if one is armed.
    pending: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum IntentKind {
    Open,
    Close,
}

#[derive(Copy, Clone, Debug)]
struct ScheduledIntent<K> {
    id: K,
    token: u64,
    at: u64,
    kind: IntentKind,
}

/// Coordinates open/closed state, hover intent, placement, selection, and
/// keyboard traversal for one nested menu tree.
///
/// One coordinator exists per menu instance and owns its state in
/// isolation; outside-interaction detection is local to the instance's
/// own [`RegionMap`].
#[derive(Clone, Debug)]
pub struct HoverCoordinator<K> {
    delays: IntentDelays,
    root_anchor: Anchor,
    nested_anchor: Anchor,
    margin: f64,
    viewport: Rect,
    regions: RegionMap<K>,
    content_sizes: HashMap<K, Size>,
    nodes: HashMap<K, NodeState>,
    /// Open branch ids, root→deepest. The single-path invariant lives
    /// here: siblings are never both present.
    open_path: ItemPath<K>,
    timers: Vec<ScheduledIntent<K>>,
    next_token: u64,
    selection: SelectionState<K>,
}

impl<K> Default for HoverCoordinator<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> HoverCoordinator<K>
where
    K: Copy + Eq + Hash,
{
    /// Create a coordinator with default delays and anchors (root level
    /// below-start, nested levels right-start).
    pub fn new() -> Self {
        Self::with_delays(IntentDelays::default())
    }

    /// Create a coordinator with custom intent delays.
    pub fn with_delays(delays: IntentDelays) -> Self {
        Self {
            delays,
            root_anchor: Anchor::new(Side::Bottom, Align::Start),
            nested_anchor: Anchor::new(Side::Right, Align::Start),
            margin: 0.0,
            viewport: Rect::ZERO,
            regions: RegionMap::new(),
            content_sizes: HashMap::new(),
            nodes: HashMap::new(),
            open_path: ItemPath::new(),
            timers: Vec::new(),
            next_token: 0,
            selection: SelectionState::new(),
        }
    }

    /// The configured intent delays.
    pub fn delays(&self) -> IntentDelays {
        self.delays
    }

    /// Set the placement preferences: `root` for depth-0 submenus,
    /// `nested` for every deeper level (kept uniform per depth so sibling
    /// submenus stay visually consistent; the flip rule still applies per
    /// node near a viewport edge).
    pub fn set_anchors(&mut self, root: Anchor, nested: Anchor) {
        self.root_anchor = root;
        self.nested_anchor = nested;
    }

    /// Set the clamping margin applied inside the viewport.
    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
    }

    /// Update the viewport and re-place every open submenu.
    ///
    /// Call on host resize/scroll. Nothing is computed for closed nodes.
    pub fn set_viewport(&mut self, index: &ItemIndex<'_, K>, viewport: Rect) -> Vec<MenuEvent<K>> {
        self.viewport = viewport;
        let mut events = Vec::new();
        let open: ItemPath<K> = self.open_path.clone();
        for id in open {
            self.place_node(index, id, &mut events);
        }
        events
    }

    /// Record the measured trigger rect for an item.
    pub fn set_trigger_region(&mut self, id: K, rect: Rect) {
        self.regions.set_trigger(id, rect);
    }

    /// Record the measured content rect for an open branch.
    pub fn set_content_region(&mut self, id: K, rect: Rect) {
        self.regions.set_content(id, rect);
    }

    /// Record the measured content size for a branch and, if it is open,
    /// re-place it.
    pub fn set_content_size(
        &mut self,
        index: &ItemIndex<'_, K>,
        id: K,
        size: Size,
    ) -> Vec<MenuEvent<K>> {
        self.content_sizes.insert(id, size);
        let mut events = Vec::new();
        if matches!(self.open_state(&id), OpenState::Open | OpenState::Closing) {
            self.place_node(index, id, &mut events);
        }
        events
    }

    /// The selection state (committed and active items).
    pub fn selection(&self) -> &SelectionState<K> {
        &self.selection
    }

    /// Overwrite the committed selection (host-controlled `selected`).
    pub fn set_selected(&mut self, selected: Option<K>) {
        self.selection.set_selected(selected);
    }

    /// Whether any part of the chain is open.
    pub fn is_open(&self) -> bool {
        !self.open_path.is_empty()
    }

    /// Open branch ids, root→deepest.
    pub fn open_path(&self) -> &[K] {
        &self.open_path
    }

    /// Observable state of one branch node.
    pub fn open_state(&self, id: &K) -> OpenState {
        match self.nodes.get(id).map(|n| n.phase) {
            None => OpenState::Closed,
            Some(Phase::Opening) => OpenState::Opening,
            Some(Phase::Open) => OpenState::Open,
            Some(Phase::Closing) => OpenState::Closing,
        }
    }

    /// Earliest pending intent deadline, if any.
    ///
    /// Hosts schedule one wake-up at this time and call
    /// [`HoverCoordinator::advance`]. Cancelled intents are skipped.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers
            .iter()
            .filter(|t| self.timer_is_live(t))
            .map(|t| t.at)
            .min()
    }

    fn timer_is_live(&self, timer: &ScheduledIntent<K>) -> bool {
        self.nodes
            .get(&timer.id)
            .is_some_and(|n| n.pending == Some(timer.token))
    }

    /// Fire every due, still-valid intent at time `now`.
    ///
    /// Due intents are applied in deadline order. An intent whose token no
    /// longer matches its node (cancelled, superseded, or torn down) is a
    /// guarded no-op.
    pub fn advance(&mut self, index: &ItemIndex<'_, K>, now: u64) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        loop {
            let due = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.at <= now)
                .min_by_key(|(_, t)| (t.at, t.token))
                .map(|(i, _)| i);
            let Some(i) = due else { break };
            let timer = self.timers.swap_remove(i);
            if !self.timer_is_live(&timer) {
                // Stale: the intent was cancelled after this timer was
                // scheduled.
                continue;
            }
            if let Some(node) = self.nodes.get_mut(&timer.id) {
                node.pending = None;
            }
            match timer.kind {
                IntentKind::Open => self.open_to(index, timer.id, &mut events),
                IntentKind::Close => {
                    let was_open = self.is_open();
                    self.close_subtree(index, timer.id, &mut events);
                    self.note_chain_closed(index, was_open, &mut events);
                }
            }
        }
        // Drop cancelled future timers so the queue stays bounded by the
        // number of armed intents.
        let nodes = &self.nodes;
        self.timers
            .retain(|t| nodes.get(&t.id).is_some_and(|n| n.pending == Some(t.token)));
        events
    }

    /// Pointer entered an item's trigger row.
    pub fn pointer_enter_trigger(
        &mut self,
        index: &ItemIndex<'_, K>,
        id: K,
        now: u64,
    ) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        if !index.contains(&id) {
            events.push(MenuEvent::Ignored {
                id: Some(id),
                reason: IgnoreReason::UnknownId,
            });
            return events;
        }

        let mut targets = index.path_to(&id);
        if index.is_leaf(&id) {
            // A leaf has no region of its own to keep open; only its
            // ancestors stay alive.
            targets.pop();
        }
        self.apply_hover(&targets, now);

        if !index.is_disabled(&id) {
            if self.selection.set_active(index, Some(id)) == Ok(true) {
                events.push(MenuEvent::ActiveChanged { id: Some(id) });
            }
            if index.is_branch(&id) && !self.nodes.contains_key(&id) {
                self.schedule(id, IntentKind::Open, now);
            }
        }
        events
    }

    /// Pointer entered the content surface of a branch.
    pub fn pointer_enter_content(
        &mut self,
        index: &ItemIndex<'_, K>,
        id: K,
        now: u64,
    ) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        if !index.contains(&id) {
            events.push(MenuEvent::Ignored {
                id: Some(id),
                reason: IgnoreReason::UnknownId,
            });
            return events;
        }
        let targets = index.path_to(&id);
        self.apply_hover(&targets, now);
        events
    }

    /// Pointer left every region of this menu instance.
    pub fn pointer_exit(&mut self, now: u64) -> Vec<MenuEvent<K>> {
        self.apply_hover(&[], now);
        Vec::new()
    }

    /// Route a pointer-down by position: a press outside every trigger
    /// and content region closes the chain immediately.
    pub fn pointer_down(
        &mut self,
        index: &ItemIndex<'_, K>,
        point: Point,
        now: u64,
    ) -> Vec<MenuEvent<K>> {
        let _ = now;
        let mut events = Vec::new();
        if self.is_open() && !self.regions.contains(point, RegionFlags::default()) {
            self.close_all(index, &mut events);
        }
        events
    }

    /// Select an item by id (pointer click or `Activate`).
    ///
    /// Leaves commit: `Selected` fires exactly once, the whole chain
    /// closes, and focus returns to the root trigger. Branches open their
    /// children immediately, pre-empting any hover intent.
    pub fn select(&mut self, index: &ItemIndex<'_, K>, id: K, now: u64) -> Vec<MenuEvent<K>> {
        let _ = now;
        let mut events = Vec::new();
        match self.selection.select(index, id) {
            SelectOutcome::Commit(id) => {
                events.push(MenuEvent::Selected { id });
                self.close_all(index, &mut events);
                events.push(MenuEvent::FocusTrigger);
            }
            SelectOutcome::OpenBranch(id) => {
                self.open_to(index, id, &mut events);
                if self.selection.set_active(index, Some(id)) == Ok(true) {
                    events.push(MenuEvent::ActiveChanged { id: Some(id) });
                }
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

    /// Close the entire chain and return focus to the root trigger.
    /// Unconditional at any depth.
    pub fn escape(&mut self, index: &ItemIndex<'_, K>, now: u64) -> Vec<MenuEvent<K>> {
        let _ = now;
        let mut events = Vec::new();
        let was_open = self.is_open();
        self.close_all(index, &mut events);
        if was_open {
            events.push(MenuEvent::FocusTrigger);
        }
        events
    }

    /// Apply a keyboard intent against the currently open depth's rows
    /// (the deepest open submenu, or the root items when nothing is open).
    pub fn key(&mut self, index: &ItemIndex<'_, K>, intent: NavIntent, now: u64) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        let row_ids: &[K] = match self.open_path.last() {
            Some(p) => index.children_of(p),
            None => index.roots(),
        };
        let rows: Vec<RowEntry<'_, K>> = row_ids
            .iter()
            .map(|&id| RowEntry::new(id, index.label(&id).unwrap_or(""), !index.is_disabled(&id)))
            .collect();
        let active = self.selection.active();

        let target = match intent {
            NavIntent::Next => step(&rows, active, Dir::Next),
            NavIntent::Prev => step(&rows, active, Dir::Prev),
            NavIntent::First => first_enabled(&rows),
            NavIntent::Last => last_enabled(&rows),
            NavIntent::Typeahead(ch) => typeahead(&rows, active, ch),
            NavIntent::EnterChild => {
                if let Some(a) = active
                    && index.is_branch(&a)
                    && !index.is_disabled(&a)
                {
                    self.open_to(index, a, &mut events);
                    let children: Vec<RowEntry<'_, K>> = index
                        .children_of(&a)
                        .iter()
                        .map(|&id| {
                            RowEntry::new(id, index.label(&id).unwrap_or(""), !index.is_disabled(&id))
                        })
                        .collect();
                    if let Some(first) = first_enabled(&children)
                        && self.selection.set_active(index, Some(first)) == Ok(true)
                    {
                        events.push(MenuEvent::ActiveChanged { id: Some(first) });
                    }
                }
                return events;
            }
            NavIntent::ExitToParent => {
                if let Some(&deepest) = self.open_path.last() {
                    self.close_subtree(index, deepest, &mut events);
                    if self.selection.set_active(index, Some(deepest)) == Ok(true) {
                        events.push(MenuEvent::ActiveChanged { id: Some(deepest) });
                    }
                    if self.open_path.is_empty() {
                        events.push(MenuEvent::OpenChanged {
                            id: None,
                            open: false,
                        });
                    }
                }
                return events;
            }
            NavIntent::Activate => {
                return match active {
                    Some(a) => self.select(index, a, now),
                    None => events,
                };
            }
            NavIntent::Dismiss => return self.escape(index, now),
        };

        if let Some(id) = target
            && self.selection.set_active(index, Some(id)) == Ok(true)
        {
            events.push(MenuEvent::ActiveChanged { id: Some(id) });
        }
        events
    }

    /// Tear down runtime state after the host replaced its item tree.
    ///
    /// Cancels every pending intent, drops open state and stale
    /// measurements, and clears selection ids that left the tree. Emits a
    /// root-level close when the chain was open; per-node ids from the old
    /// tree are not replayed.
    pub fn sync_tree(&mut self, index: &ItemIndex<'_, K>) -> Vec<MenuEvent<K>> {
        let mut events = Vec::new();
        if self.is_open() {
            events.push(MenuEvent::OpenChanged {
                id: None,
                open: false,
            });
        }
        self.clear_runtime();
        self.selection.sync(index);
        events
    }

    /// Silent teardown on unmount: cancels all pending intents and drops
    /// every piece of runtime state.
    pub fn reset(&mut self) {
        self.clear_runtime();
        self.selection = SelectionState::new();
    }

    fn clear_runtime(&mut self) {
        self.timers.clear();
        self.nodes.clear();
        self.open_path.clear();
        self.regions.clear();
        self.content_sizes.clear();
    }

    fn schedule(&mut self, id: K, kind: IntentKind, now: u64) {
        let token = self.next_token;
        self.next_token += 1;
        let at = now
            + match kind {
                IntentKind::Open => self.delays.open_ms,
                IntentKind::Close => self.delays.close_ms,
            };
        let phase = match kind {
            IntentKind::Open => Phase::Opening,
            IntentKind::Close => Phase::Closing,
        };
        let node = self.nodes.entry(id).or_insert(NodeState {
            phase,
            pending: None,
        });
        node.phase = phase;
        node.pending = Some(token);
        self.timers.push(ScheduledIntent {
            id,
            token,
            at,
            kind,
        });
    }

    /// Reconcile hover state against the set of nodes the pointer is
    /// currently within (the hovered item's root→node path).
    fn apply_hover(&mut self, targets: &[K], now: u64) {
        // Re-entry cancels pending closes along the hovered path with no
        // observable change.
        for id in targets {
            if let Some(node) = self.nodes.get_mut(id)
                && node.phase == Phase::Closing
            {
                node.phase = Phase::Open;
                node.pending = None;
            }
        }
        // Nodes the pointer left: open ones arm a close intent, opening
        // ones cancel silently.
        let mut arm_close: Vec<K> = Vec::new();
        let mut drop_intent: Vec<K> = Vec::new();
        for (&id, node) in &self.nodes {
            if targets.contains(&id) {
                continue;
            }
            match node.phase {
                Phase::Open => arm_close.push(id),
                Phase::Opening => drop_intent.push(id),
                Phase::Closing => {}
            }
        }
        for id in drop_intent {
            self.nodes.remove(&id);
        }
        for id in arm_close {
            self.schedule(id, IntentKind::Close, now);
        }
    }

    /// Make `id`'s submenu (and its ancestors') the open chain,
    /// atomically closing whatever diverges from it.
    fn open_to(&mut self, index: &ItemIndex<'_, K>, id: K, events: &mut Vec<MenuEvent<K>>) {
        if !index.is_branch(&id) || index.is_disabled(&id) {
            return;
        }
        let target = index.path_to(&id);
        let was_open = self.is_open();
        let start = events.len();

        let mut common = 0;
        while common < self.open_path.len()
            && common < target.len()
            && self.open_path[common] == target[common]
        {
            common += 1;
        }
        if common < self.open_path.len() {
            let divergent = self.open_path[common];
            self.close_subtree(index, divergent, events);
        }
        for &node in &target[common..] {
            self.nodes.insert(
                node,
                NodeState {
                    phase: Phase::Open,
                    pending: None,
                },
            );
            self.open_path.push(node);
            events.push(MenuEvent::OpenChanged {
                id: Some(node),
                open: true,
            });
            self.place_node(index, node, events);
        }
        if !was_open && self.is_open() {
            events.insert(
                start,
                MenuEvent::OpenChanged {
                    id: None,
                    open: true,
                },
            );
        }
    }

    /// Close `id` and every materialized descendant, deepest first,
    /// cancelling their pending intents.
    fn close_subtree(&mut self, index: &ItemIndex<'_, K>, id: K, events: &mut Vec<MenuEvent<K>>) {
        let mut affected: Vec<(u8, K)> = self
            .nodes
            .keys()
            .copied()
            .filter(|k| index.path_to(k).contains(&id))
            .map(|k| (index.depth_of(&k).unwrap_or(0), k))
            .collect();
        affected.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, node) in affected {
            if let Some(state) = self.nodes.remove(&node)
                && matches!(state.phase, Phase::Open | Phase::Closing)
            {
                events.push(MenuEvent::OpenChanged {
                    id: Some(node),
                    open: false,
                });
            }
        }
        if let Some(pos) = self.open_path.iter().position(|&k| k == id) {
            self.open_path.truncate(pos);
        }
    }

    /// Close everything, cancelling all pending intents first.
    fn close_all(&mut self, index: &ItemIndex<'_, K>, events: &mut Vec<MenuEvent<K>>) {
        let was_open = self.is_open();
        self.timers.clear();
        if let Some(&root) = self.open_path.first() {
            self.close_subtree(index, root, events);
        }
        // Stray intents outside the open chain (e.g. a sibling mid-open)
        // cancel silently.
        self.nodes.clear();
        self.note_chain_closed(index, was_open, events);
    }

    /// Emit the root-level close and fix up the active item once the
    /// chain has fully emptied.
    fn note_chain_closed(
        &mut self,
        index: &ItemIndex<'_, K>,
        was_open: bool,
        events: &mut Vec<MenuEvent<K>>,
    ) {
        if !was_open || self.is_open() {
            return;
        }
        self.ensure_active_visible(index, events);
        events.push(MenuEvent::OpenChanged {
            id: None,
            open: false,
        });
    }

    /// Clear the active item if the row it lives in is no longer shown
    /// (its parent's submenu closed). Root rows are always shown.
    fn ensure_active_visible(&mut self, index: &ItemIndex<'_, K>, events: &mut Vec<MenuEvent<K>>) {
        let Some(active) = self.selection.active() else {
            return;
        };
        let visible = match index.parent_of(&active) {
            None => index.contains(&active),
            Some(parent) => self.open_path.contains(&parent),
        };
        if !visible && self.selection.clear_active() {
            events.push(MenuEvent::ActiveChanged { id: None });
        }
    }

    fn place_node(&mut self, index: &ItemIndex<'_, K>, id: K, events: &mut Vec<MenuEvent<K>>) {
        let anchor = if index.depth_of(&id) == Some(0) {
            self.root_anchor
        } else {
            self.nested_anchor
        };
        let trigger = self.regions.trigger(&id).unwrap_or(Rect::ZERO);
        let content = self.content_sizes.get(&id).copied().unwrap_or(Size::ZERO);
        let placement = resolve(trigger, content, anchor, self.viewport, self.margin);
        events.push(MenuEvent::Placed { id, placement });
    }
}
