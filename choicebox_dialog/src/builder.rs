// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choice set builder: lays out every choice slot and measures the text block.
//!
//! ## Layout
//!
//! Coordinates are y-down and relative to the top-left of the text block.
//! Lines stack downward with [`LINE_MARGIN`] between them, both within a choice
//! and between choices. Each line is as tall as its largest glyph, and glyphs
//! are shifted so the tallest one touches the top of its line.
//!
//! A choice's `height` spans from the top of its first line to the bottom of
//! its last, so it includes the margins between its own lines. Hit bands and the
//! highlight rectangle are both derived from it.

use alloc::string::String;
use alloc::vec::Vec;

use choicebox_markup::{Cursor, FontDescriptor, GlyphPlacement, LabelMeasure, LetterLayout};
use kurbo::Size;

/// Number of choice slots a dialog can show.
pub const MAX_CHOICES: usize = 6;

/// Vertical gap between consecutive lines.
pub const LINE_MARGIN: f64 = 8.0;

/// One configured choice slot.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceEntry {
    /// Resolved text, possibly containing tags and newlines.
    pub text: String,
    /// Font for this slot; falls back to the dialog font if `None`.
    pub font: Option<FontDescriptor>,
    /// Extra horizontal gap after each glyph.
    pub letter_spacing: f64,
}

impl ChoiceEntry {
    /// An entry with no font override and no letter spacing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            letter_spacing: 0.0,
        }
    }
}

/// One laid-out choice.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceLayout {
    /// Glyphs of every line, in text-block coordinates.
    pub glyphs: Vec<GlyphPlacement>,
    /// Height of each line.
    pub line_heights: Vec<i32>,
    /// Top edge of the first line.
    pub top: f64,
    /// Distance from `top` to the bottom of the last line.
    pub height: f64,
}

/// All usable choices and the size of the text block they form.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceSet {
    /// Choices in slot order.
    pub choices: Vec<ChoiceLayout>,
    /// Widest line.
    pub width: f64,
    /// Top of the first line to the bottom of the last.
    pub height: f64,
}

impl ChoiceSet {
    /// Number of choices. Never zero for a set returned by [`build_choices`].
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// True if there are no choices.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Size of the text block.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Reasons a choice set cannot be built.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// The first slot has no text or no font.
    #[error("no usable choices")]
    NoUsableChoices,
}

/// Lay out `entries` in order, stopping at the first slot with empty text or
/// no resolvable font.
///
/// At most [`MAX_CHOICES`] entries are considered. Size and color set by tags
/// carry from one line of a choice to the next; each choice starts over at the
/// font's default size in white.
pub fn build_choices<M: LabelMeasure + ?Sized>(
    entries: &[ChoiceEntry],
    default_font: Option<&FontDescriptor>,
    measure: &M,
) -> Result<ChoiceSet, BuildError> {
    let mut choices = Vec::new();
    let mut width: f64 = 0.0;
    let mut height: f64 = 0.0;

    for (slot, entry) in entries.iter().take(MAX_CHOICES).enumerate() {
        let Some(font) = entry.font.as_ref().or(default_font) else {
            log::debug!("choice slot {slot} has no font; list ends");
            break;
        };
        if entry.text.is_empty() {
            log::debug!("choice slot {slot} is empty; list ends");
            break;
        }

        let layout = LetterLayout::new(font, entry.letter_spacing, measure);
        let letter_height = layout.letter_height();
        let top = height;
        let mut cursor = Cursor::new(0.0, 0.0, letter_height);
        let mut glyphs = Vec::new();
        let mut line_heights = Vec::new();

        for text in entry.text.split('\n') {
            let text = text.strip_suffix('\r').unwrap_or(text);
            cursor.x = 0.0;
            let line = layout.layout_line(text, cursor);
            let shift = height + f64::from(line.max_height - letter_height);
            glyphs.extend(line.glyphs.iter().map(|g| GlyphPlacement {
                y: g.y + shift,
                ..*g
            }));
            width = width.max(line.cursor.x);
            height += f64::from(line.max_height) + LINE_MARGIN;
            line_heights.push(line.max_height);
            cursor = line.cursor;
        }

        choices.push(ChoiceLayout {
            glyphs,
            line_heights,
            top,
            height: height - LINE_MARGIN - top,
        });
    }

    if choices.is_empty() {
        return Err(BuildError::NoUsableChoices);
    }
    Ok(ChoiceSet {
        choices,
        width,
        height: height - LINE_MARGIN,
    })
}
