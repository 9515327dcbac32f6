// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window placement, choice hit testing, and highlight rectangles.
//!
//! Viewport coordinates are y-down with the origin at the top-left. Everything
//! a [`DialogSurface`](crate::DialogSurface) receives is window-local: the
//! window's top-left is `(0, 0)` and the text block starts at
//! `(WINDOW_PADDING, WINDOW_PADDING)`.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::builder::ChoiceSet;
use crate::style::{HorizontalAnchor, VerticalAnchor};

/// Space between the window edge and the text block.
pub const WINDOW_PADDING: f64 = 8.0;

/// How far a click or highlight extends beyond a choice's own lines.
pub const HIT_TOLERANCE: f64 = 4.0;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Band {
    top: f64,
    height: f64,
}

/// Placement of one dialog, fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogGeometry {
    origin: Point,
    size: Size,
    bands: Vec<Band>,
}

impl DialogGeometry {
    /// Size the window around `choices` and anchor it in `viewport`.
    pub fn new(
        choices: &ChoiceSet,
        horizontal: HorizontalAnchor,
        vertical: VerticalAnchor,
        viewport: Size,
    ) -> Self {
        let size = Size::new(
            choices.width + 2.0 * WINDOW_PADDING,
            choices.height + 2.0 * WINDOW_PADDING,
        );
        let x = match horizontal {
            HorizontalAnchor::Left => 0.0,
            HorizontalAnchor::Center => (viewport.width - size.width) / 2.0,
            HorizontalAnchor::Right => viewport.width - size.width,
        };
        let y = match vertical {
            VerticalAnchor::Top => 0.0,
            VerticalAnchor::Center => (viewport.height - size.height) / 2.0,
            VerticalAnchor::Bottom => viewport.height - size.height,
        };
        let bands = choices
            .choices
            .iter()
            .map(|c| Band {
                top: c.top,
                height: c.height,
            })
            .collect();
        Self {
            origin: Point::new(x, y),
            size,
            bands,
        }
    }

    /// Window top-left in viewport coordinates.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Window size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Window bounds in viewport coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Offset from the window's top-left to the text block.
    pub fn text_offset(&self) -> Vec2 {
        Vec2::new(WINDOW_PADDING, WINDOW_PADDING)
    }

    /// Number of choices.
    pub fn choice_count(&self) -> usize {
        self.bands.len()
    }

    /// Index of the choice under `point` (viewport coordinates), if any.
    ///
    /// Each choice owns its lines plus [`HIT_TOLERANCE`] above and below, so
    /// bands of neighboring choices meet without overlapping. Horizontally the
    /// window minus half the padding on each side is live.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        let local = point - self.origin.to_vec2();
        let half = WINDOW_PADDING / 2.0;
        if local.x < half || local.x >= self.size.width - half {
            return None;
        }
        self.bands.iter().position(|band| {
            let top = WINDOW_PADDING + band.top;
            local.y >= top - HIT_TOLERANCE && local.y < top + band.height + HIT_TOLERANCE
        })
    }

    /// Window-local highlight rectangle for choice `index`.
    pub fn highlight_rect(&self, index: usize) -> Option<Rect> {
        let band = self.bands.get(index)?;
        let top = WINDOW_PADDING + band.top;
        Some(Rect::new(
            WINDOW_PADDING - HIT_TOLERANCE,
            top - HIT_TOLERANCE,
            self.size.width - WINDOW_PADDING + HIT_TOLERANCE,
            top + band.height + HIT_TOLERANCE,
        ))
    }

    /// Window-local background rectangle of `visible_height`, centered vertically.
    pub fn frame_rect(&self, visible_height: f64) -> Rect {
        let height = visible_height.clamp(0.0, self.size.height);
        let y = (self.size.height - height) / 2.0;
        Rect::new(0.0, y, self.size.width, y + height)
    }
}
