// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Keynav: roving-focus policies for one open menu depth.
//!
//! Keyboard interaction in a disclosure menu never uses native tab order;
//! instead an *active* row is moved programmatically across the currently
//! open depth's item list. This crate provides those movement policies as
//! pure functions over [`RowEntry`] slices, plus [`NavIntent`], the
//! device-independent vocabulary a host maps its key events onto:
//!
//! | key                | intent                     |
//! |--------------------|----------------------------|
//! | Arrow Down / Up    | [`NavIntent::Next`] / [`NavIntent::Prev`] |
//! | Home / End         | [`NavIntent::First`] / [`NavIntent::Last`] |
//! | Arrow Right        | [`NavIntent::EnterChild`]  |
//! | Arrow Left         | [`NavIntent::ExitToParent`]|
//! | Enter / Space      | [`NavIntent::Activate`]    |
//! | Escape             | [`NavIntent::Dismiss`]     |
//! | printable character| [`NavIntent::Typeahead`]   |
//!
//! Movement clamps at the list ends (no wraparound); typeahead wraps once.
//! Disabled rows are skipped by every policy, and a list with no enabled
//! rows yields `None` everywhere. Depth traversal (`EnterChild`,
//! `ExitToParent`, `Dismiss`) is interpreted by the coordinator that owns
//! the open chain; this crate only moves within one depth.
//!
//! ## Example
//!
//! ```rust
//! use trellis_keynav::{step, typeahead, Dir, RowEntry};
//!
//! let rows = [
//!     RowEntry::new(1_u32, "Alpha", true),
//!     RowEntry::new(2, "Beta", false),
//!     RowEntry::new(3, "Gamma", true),
//! ];
//!
//! // Down from Alpha skips disabled Beta.
//! assert_eq!(step(&rows, Some(1), Dir::Next), Some(3));
//! // Clamped at the end.
//! assert_eq!(step(&rows, Some(3), Dir::Next), Some(3));
//! // Typeahead jumps by label prefix, wrapping once.
//! assert_eq!(typeahead(&rows, Some(3), 'a'), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

/// One row of the currently open depth, as seen by the policies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowEntry<'a, K> {
    /// Item id of this row.
    pub id: K,
    /// Display label; the typeahead match target.
    pub label: &'a str,
    /// Disabled rows are skipped by all policies.
    pub enabled: bool,
}

impl<'a, K> RowEntry<'a, K> {
    /// Create a row entry.
    pub fn new(id: K, label: &'a str, enabled: bool) -> Self {
        Self { id, label, enabled }
    }
}

/// Direction of a single-row movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    /// Toward the end of the list (Arrow Down).
    Next,
    /// Toward the start of the list (Arrow Up).
    Prev,
}

/// Device-independent navigation intent.
///
/// Hosts translate their key events into these; anything that can produce
/// a `NavIntent` stream qualifies as a keyboard source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavIntent {
    /// Move the active row toward the end of the list.
    Next,
    /// Move the active row toward the start of the list.
    Prev,
    /// Jump to the first enabled row.
    First,
    /// Jump to the last enabled row.
    Last,
    /// Open the active branch and enter its first enabled child.
    EnterChild,
    /// Close the current depth and return to the parent item.
    ExitToParent,
    /// Select the active row.
    Activate,
    /// Close the entire chain and return focus to the root trigger.
    /// Unconditional at any depth.
    Dismiss,
    /// Jump to the next row whose label starts with this character.
    Typeahead(char),
}

fn position_of<K: Copy + Eq>(rows: &[RowEntry<'_, K>], id: K) -> Option<usize> {
    rows.iter().position(|r| r.id == id)
}

/// First enabled row, if any.
pub fn first_enabled<K: Copy + Eq>(rows: &[RowEntry<'_, K>]) -> Option<K> {
    rows.iter().find(|r| r.enabled).map(|r| r.id)
}

/// Last enabled row, if any.
pub fn last_enabled<K: Copy + Eq>(rows: &[RowEntry<'_, K>]) -> Option<K> {
    rows.iter().rev().find(|r| r.enabled).map(|r| r.id)
}

/// Move the active row one step, skipping disabled rows and clamping at
/// the list ends.
///
/// With no current active row (or one not present in `rows`), `Next` lands
/// on the first enabled row and `Prev` on the last. At a list end the
/// current row is returned unchanged. Returns `None` only when no row is
/// enabled.
pub fn step<K: Copy + Eq>(rows: &[RowEntry<'_, K>], active: Option<K>, dir: Dir) -> Option<K> {
    let origin = active
        .and_then(|a| position_of(rows, a))
        .filter(|&p| rows[p].enabled);
    let Some(origin) = origin else {
        return match dir {
            Dir::Next => first_enabled(rows),
            Dir::Prev => last_enabled(rows),
        };
    };

    let found = match dir {
        Dir::Next => rows[origin + 1..].iter().find(|r| r.enabled).map(|r| r.id),
        Dir::Prev => rows[..origin].iter().rev().find(|r| r.enabled).map(|r| r.id),
    };
    // Clamp: no enabled row beyond the origin keeps the origin active.
    found.or(active).filter(|_| rows.iter().any(|r| r.enabled))
}

/// Advance the active row to the next enabled row whose label starts with
/// `ch`, ASCII-case-insensitively, wrapping once through the list.
///
/// The scan starts strictly after the active row (or at the top with no
/// active row) so repeated presses of the same character cycle through all
/// matching rows. Returns `None` when nothing matches.
pub fn typeahead<K: Copy + Eq>(rows: &[RowEntry<'_, K>], active: Option<K>, ch: char) -> Option<K> {
    if rows.is_empty() {
        return None;
    }
    let start = active
        .and_then(|a| position_of(rows, a))
        .map_or(0, |p| p + 1);

    let matches = |r: &RowEntry<'_, K>| {
        r.enabled
            && r.label
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&ch))
    };

    rows[start..]
        .iter()
        .find(|r| matches(r))
        .or_else(|| rows[..start.min(rows.len())].iter().find(|r| matches(r)))
        .map(|r| r.id)
}
