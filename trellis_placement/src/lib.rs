// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Placement: anchored-placement resolution for floating content.
//!
//! This crate answers one question: given a trigger's rectangle, the size of
//! the content it discloses, a preferred side and alignment, and the visible
//! viewport, where does the content go? [`resolve`] is a pure function over
//! [`kurbo`] geometry; it performs no measurement and holds no state, so the
//! policy of *when* to recompute (on open, on viewport change) belongs to
//! the caller.
//!
//! ## Rules
//!
//! 1. Place the content on the preferred [`Side`] of the trigger, aligned
//!    per [`Align`], separated by the anchor's offset.
//! 2. If the content does not fit on that side and the opposite side has
//!    more room, **flip** to the opposite side ([`Placement::flipped`]
//!    reports this so sibling menus can keep a consistent preferred side
//!    while an edge case flips individually).
//! 3. **Clamp** the result on both axes so the content stays inside the
//!    viewport inset by `margin`. Content larger than the available space
//!    pins to the near edge rather than overflowing.
//!
//! Nested submenu levels anchor on their parent item's rectangle, not the
//! root trigger; the caller passes whichever rect is the anchor.
//!
//! An unmeasurable trigger (empty or non-finite rectangle) falls back to a
//! below-start placement at the inset viewport origin instead of failing.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use trellis_placement::{resolve, Align, Anchor, Side};
//!
//! let trigger = Rect::new(10.0, 10.0, 90.0, 30.0);
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let anchor = Anchor::new(Side::Bottom, Align::Start).with_offset(4.0);
//!
//! let placement = resolve(trigger, Size::new(120.0, 200.0), anchor, viewport, 8.0);
//! assert_eq!(placement.side, Side::Bottom);
//! assert!(!placement.flipped);
//! assert_eq!(placement.rect.origin(), (10.0, 34.0).into());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Rect, Size};

/// Side of the trigger the content prefers to appear on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the trigger.
    Top,
    /// To the right of the trigger.
    Right,
    /// Below the trigger.
    Bottom,
    /// To the left of the trigger.
    Left,
}

impl Side {
    /// The opposite side, used by the collision flip.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Whether this side places content along the vertical axis.
    fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Cross-axis alignment of the content against the trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Align the content's leading edge with the trigger's leading edge.
    #[default]
    Start,
    /// Center the content on the trigger.
    Center,
    /// Align the content's trailing edge with the trigger's trailing edge.
    End,
}

/// Placement preference: side, alignment, and trigger→content gap.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Preferred side.
    pub side: Side,
    /// Cross-axis alignment.
    pub align: Align,
    /// Gap between the trigger edge and the content, in viewport units.
    pub offset: f64,
}

impl Anchor {
    /// Create an anchor with zero offset.
    pub fn new(side: Side, align: Align) -> Self {
        Self {
            side,
            align,
            offset: 0.0,
        }
    }

    /// Set the trigger→content gap, builder style.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

impl Default for Anchor {
    /// Below-start, the fallback anchor for unmeasurable triggers.
    fn default() -> Self {
        Self::new(Side::Bottom, Align::Start)
    }
}

/// A concrete placement produced by [`resolve`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Where the content goes, in viewport coordinates.
    pub rect: Rect,
    /// The side actually used after collision handling.
    pub side: Side,
    /// Whether the preferred side was flipped to its opposite.
    pub flipped: bool,
}

fn is_measurable(rect: Rect) -> bool {
    rect.x0.is_finite()
        && rect.y0.is_finite()
        && rect.x1.is_finite()
        && rect.y1.is_finite()
        && rect.width() > 0.0
        && rect.height() > 0.0
}

fn inset_rect(viewport: Rect, margin: f64) -> Rect {
    let margin = margin.max(0.0);
    let r = viewport.inset(-margin);
    // A margin larger than the viewport collapses to its center.
    if r.width() < 0.0 || r.height() < 0.0 {
        Rect::from_center_size(viewport.center(), Size::ZERO)
    } else {
        r
    }
}

/// Free space between the trigger's `side` edge and the inset viewport edge.
fn available(trigger: Rect, side: Side, inset: Rect) -> f64 {
    match side {
        Side::Top => trigger.y0 - inset.y0,
        Side::Right => inset.x1 - trigger.x1,
        Side::Bottom => inset.y1 - trigger.y1,
        Side::Left => trigger.x0 - inset.x0,
    }
}

fn fits(trigger: Rect, content: Size, side: Side, offset: f64, inset: Rect) -> bool {
    let needed = if side.is_vertical() {
        content.height
    } else {
        content.width
    };
    available(trigger, side, inset) >= needed + offset
}

fn origin_for(trigger: Rect, content: Size, side: Side, align: Align, offset: f64) -> Point {
    let main = match side {
        Side::Top => trigger.y0 - offset - content.height,
        Side::Bottom => trigger.y1 + offset,
        Side::Left => trigger.x0 - offset - content.width,
        Side::Right => trigger.x1 + offset,
    };
    let cross = if side.is_vertical() {
        match align {
            Align::Start => trigger.x0,
            Align::Center => trigger.center().x - content.width / 2.0,
            Align::End => trigger.x1 - content.width,
        }
    } else {
        match align {
            Align::Start => trigger.y0,
            Align::Center => trigger.center().y - content.height / 2.0,
            Align::End => trigger.y1 - content.height,
        }
    };
    if side.is_vertical() {
        Point::new(cross, main)
    } else {
        Point::new(main, cross)
    }
}

fn clamp_into(rect: Rect, inset: Rect) -> Rect {
    // Pin to the near edge when the content is larger than the inset space.
    let x = rect.x0.clamp(inset.x0, (inset.x1 - rect.width()).max(inset.x0));
    let y = rect.y0.clamp(inset.y0, (inset.y1 - rect.height()).max(inset.y0));
    Rect::from_origin_size(Point::new(x, y), rect.size())
}

/// Resolve a concrete placement for disclosed content.
///
/// - `trigger`: the anchor rectangle (the root trigger, or for nested
///   levels, the parent item's own rect), in viewport coordinates.
/// - `content`: measured size of the content to place.
/// - `anchor`: preferred side, alignment, and offset.
/// - `viewport`: visible bounds the content must stay within.
/// - `margin`: inset applied to `viewport` before flipping and clamping.
///
/// Never fails: an unmeasurable `trigger` yields the default below-start
/// placement at the inset viewport origin.
pub fn resolve(
    trigger: Rect,
    content: Size,
    anchor: Anchor,
    viewport: Rect,
    margin: f64,
) -> Placement {
    let inset = inset_rect(viewport, margin);

    if !is_measurable(trigger) {
        let rect = Rect::from_origin_size(Point::new(inset.x0, inset.y0), content);
        return Placement {
            rect: clamp_into(rect, inset),
            side: Side::Bottom,
            flipped: false,
        };
    }

    let mut side = anchor.side;
    let mut flipped = false;
    if !fits(trigger, content, side, anchor.offset, inset)
        && available(trigger, side.opposite(), inset) > available(trigger, side, inset)
    {
        side = side.opposite();
        flipped = true;
    }

    let origin = origin_for(trigger, content, side, anchor.align, anchor.offset);
    Placement {
        rect: clamp_into(Rect::from_origin_size(origin, content), inset),
        side,
        flipped,
    }
}
