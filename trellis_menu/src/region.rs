// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region bookkeeping for outside-interaction detection and placement
//! anchoring.
//!
//! The engine is DOM-agnostic: anything that can report a bounding
//! rectangle qualifies as a trigger or a content surface. Hosts feed
//! measured rects into a [`RegionMap`] keyed by item id; the engine
//! consults it to decide whether a pointer event landed inside this
//! instance's trigger+content region and to anchor submenu placement.
//! The check is local to one menu instance; there is no global registry
//! of open menus.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

bitflags::bitflags! {
    /// Which of an item's regions participate in a query.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RegionFlags: u8 {
        /// The item's own trigger row.
        const TRIGGER = 0b0000_0001;
        /// The submenu content surface a branch item discloses.
        const CONTENT = 0b0000_0010;
    }
}

impl Default for RegionFlags {
    fn default() -> Self {
        Self::TRIGGER | Self::CONTENT
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Entry {
    trigger: Option<Rect>,
    content: Option<Rect>,
}

/// Measured regions for one menu instance, keyed by item id.
#[derive(Clone, Debug, Default)]
pub struct RegionMap<K> {
    entries: HashMap<K, Entry>,
}

impl<K> RegionMap<K>
where
    K: Copy + Eq + Hash,
{
    /// Create an empty region map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Record the trigger rect for `id`.
    pub fn set_trigger(&mut self, id: K, rect: Rect) {
        self.entries.entry(id).or_default().trigger = Some(rect);
    }

    /// Record the content rect for branch `id`.
    pub fn set_content(&mut self, id: K, rect: Rect) {
        self.entries.entry(id).or_default().content = Some(rect);
    }

    /// Forget both regions for `id`.
    pub fn remove(&mut self, id: &K) {
        self.entries.remove(id);
    }

    /// Forget all regions.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The trigger rect for `id`, if measured.
    pub fn trigger(&self, id: &K) -> Option<Rect> {
        self.entries.get(id).and_then(|e| e.trigger)
    }

    /// The content rect for `id`, if measured.
    pub fn content(&self, id: &K) -> Option<Rect> {
        self.entries.get(id).and_then(|e| e.content)
    }

    /// Whether `point` lands inside any region selected by `flags`.
    ///
    /// This is the outside-interaction test: a pointer event for which
    /// this answers `false` happened outside the menu instance.
    pub fn contains(&self, point: Point, flags: RegionFlags) -> bool {
        self.entries.values().any(|e| {
            (flags.contains(RegionFlags::TRIGGER)
                && e.trigger.is_some_and(|r| r.contains(point)))
                || (flags.contains(RegionFlags::CONTENT)
                    && e.content.is_some_and(|r| r.contains(point)))
        })
    }

    /// The id whose region contains `point`, preferring the smallest
    /// matching rect (the most specific surface when regions nest).
    pub fn find(&self, point: Point, flags: RegionFlags) -> Option<K> {
        let mut best: Option<(K, f64)> = None;
        for (&id, e) in &self.entries {
            for rect in [
                flags.contains(RegionFlags::TRIGGER)
                    .then_some(e.trigger)
                    .flatten(),
                flags.contains(RegionFlags::CONTENT)
                    .then_some(e.content)
                    .flatten(),
            ]
            .into_iter()
            .flatten()
            {
                if rect.contains(point) {
                    let area = rect.area();
                    if best.is_none_or(|(_, a)| area < a) {
                        best = Some((id, area));
                    }
                }
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_distinguishes_region_kinds() {
        let mut map: RegionMap<u32> = RegionMap::new();
        map.set_trigger(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        map.set_content(1, Rect::new(0.0, 10.0, 100.0, 100.0));

        let in_trigger = Point::new(5.0, 5.0);
        let in_content = Point::new(50.0, 50.0);
        let outside = Point::new(500.0, 500.0);

        assert!(map.contains(in_trigger, RegionFlags::TRIGGER));
        assert!(!map.contains(in_trigger, RegionFlags::CONTENT));
        assert!(map.contains(in_content, RegionFlags::CONTENT));
        assert!(map.contains(in_content, RegionFlags::default()));
        assert!(!map.contains(outside, RegionFlags::default()));
    }

    #[test]
    fn find_prefers_the_smallest_match() {
        let mut map: RegionMap<u32> = RegionMap::new();
        // A wide content surface with a trigger row nested inside it.
        map.set_content(1, Rect::new(0.0, 0.0, 200.0, 200.0));
        map.set_trigger(2, Rect::new(10.0, 10.0, 60.0, 30.0));

        assert_eq!(map.find(Point::new(20.0, 20.0), RegionFlags::default()), Some(2));
        assert_eq!(map.find(Point::new(150.0, 150.0), RegionFlags::default()), Some(1));
        assert_eq!(map.find(Point::new(500.0, 0.0), RegionFlags::default()), None);
    }

    #[test]
    fn remove_and_clear_forget_regions() {
        let mut map: RegionMap<u32> = RegionMap::new();
        map.set_trigger(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        map.remove(&1);
        assert!(!map.contains(Point::new(5.0, 5.0), RegionFlags::default()));

        map.set_trigger(2, Rect::new(0.0, 0.0, 10.0, 10.0));
        map.clear();
        assert_eq!(map.trigger(&2), None);
    }
}
