// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing capability a dialog renders through.

use choicebox_markup::GlyphPlacement;
use kurbo::{Point, Rect};

use crate::style::{Background, Rgba};

/// A host-owned drawable node the dialog issues imperative calls to.
///
/// The node has three stacked layers: background, highlight, and text. All
/// rectangles and glyphs are window-local; the window itself is moved with
/// [`set_position`](Self::set_position).
pub trait DialogSurface {
    /// Move the window's top-left to `origin` in viewport coordinates.
    fn set_position(&mut self, origin: Point);

    /// Replace the background drawing with `background` filling `rect`.
    fn draw_background(&mut self, background: &Background, rect: Rect);

    /// Remove the background drawing.
    fn clear_background(&mut self);

    /// Set the opacity of the background layer.
    fn set_background_opacity(&mut self, opacity: u8);

    /// Add glyphs to the text layer.
    fn add_glyphs(&mut self, glyphs: &[GlyphPlacement]);

    /// Show or hide the text layer.
    fn set_text_visible(&mut self, visible: bool);

    /// Replace the highlight with a filled `rect`.
    fn set_highlight(&mut self, rect: Rect, color: Rgba);

    /// Show or hide the highlight layer.
    fn set_highlight_visible(&mut self, visible: bool);

    /// Set the opacity of the highlight.
    fn set_highlight_opacity(&mut self, opacity: u8);

    /// Remove the node from the host scene.
    fn detach(&mut self);
}
