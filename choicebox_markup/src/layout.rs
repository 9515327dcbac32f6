// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Letter layout: turns one line of tagged text into positioned glyphs.
//!
//! ## Coordinates
//!
//! Layout space is y-down. A glyph's `y` is its top edge. Every glyph on a line
//! shares a baseline at `cursor.y + letter_height`, where `letter_height` is the
//! font's default height, so a glyph enlarged by `\S[+N]` grows upward and a
//! shrunken one sits on the same line. Outline glyphs sit `size / 8` lower to
//! leave room for descenders.
//!
//! ## Scanning
//!
//! At each position, in order:
//! 1. `\\` emits one literal backslash and skips two characters.
//! 2. A recognized tag updates the running size or color and emits nothing.
//! 3. Anything else emits one glyph (or nothing, for a bitmap font with no cell for it).
//!
//! A newline ends the line. Multi-line text is split by the caller and laid out
//! one line at a time.

use alloc::vec::Vec;

use crate::font::{BitmapFont, FontDescriptor, OutlineFont, TextureHandle};
use crate::tag::parse_tag;
use crate::types::{Rgb, TagContext, TextTag};

/// Width oracle for outline glyphs.
///
/// The host renders a label for the single character and reports its width.
/// Any `Fn(&OutlineFont, char, f64) -> f64` closure implements this trait.
pub trait LabelMeasure {
    /// Width of `ch` rendered in `font` at `point_size`.
    fn label_width(&self, font: &OutlineFont, ch: char, point_size: f64) -> f64;
}

impl<F> LabelMeasure for F
where
    F: Fn(&OutlineFont, char, f64) -> f64,
{
    fn label_width(&self, font: &OutlineFont, ch: char, point_size: f64) -> f64 {
        self(font, ch, point_size)
    }
}

/// Running pen state carried across a layout call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cursor {
    /// Horizontal pen position.
    pub x: f64,
    /// Top of the current line.
    pub y: f64,
    /// Color applied to the next glyph.
    pub color: Rgb,
    /// Letter size applied to the next glyph.
    pub size: i32,
}

impl Cursor {
    /// A cursor at `(x, y)` with white text at `size`.
    pub const fn new(x: f64, y: f64, size: i32) -> Self {
        Self {
            x,
            y,
            color: Rgb::WHITE,
            size,
        }
    }
}

/// Where a glyph's pixels come from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GlyphSource {
    /// A cell cut from a bitmap font texture, in texels.
    Cell {
        /// Font texture.
        texture: TextureHandle,
        /// Left edge of the cell.
        x: i32,
        /// Top edge of the cell.
        y: i32,
        /// Cell width.
        width: i32,
        /// Cell height.
        height: i32,
    },
    /// A host-rendered label of the outline font.
    Label {
        /// Point size the label is rendered at.
        point_size: f64,
    },
}

/// One positioned glyph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphPlacement {
    /// The character drawn.
    pub character: char,
    /// Left edge in layout space.
    pub x: f64,
    /// Top edge in layout space.
    pub y: f64,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
    /// Tint.
    pub color: Rgb,
    /// Letter size in effect for this glyph.
    pub size: i32,
    /// Ratio of `size` to the font's default letter height.
    pub size_scale: f64,
    /// Pixel source.
    pub source: GlyphSource,
}

/// Output of [`LetterLayout::layout_line`].
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    /// Glyphs in left-to-right order.
    pub glyphs: Vec<GlyphPlacement>,
    /// Pen state after the last character, including any tag changes.
    pub cursor: Cursor,
    /// Largest size used by a glyph; the starting size if no glyph was placed.
    pub max_height: i32,
}

impl LineLayout {
    /// Horizontal extent from the starting pen position to the final one.
    pub fn advance(&self, start_x: f64) -> f64 {
        self.cursor.x - start_x
    }
}

/// Lays out text in one font with fixed letter spacing.
#[derive(Clone, Copy)]
pub struct LetterLayout<'a, M: ?Sized> {
    font: &'a FontDescriptor,
    letter_spacing: f64,
    measure: &'a M,
}

impl<M: ?Sized> core::fmt::Debug for LetterLayout<'_, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LetterLayout")
            .field("font", &self.font)
            .field("letter_spacing", &self.letter_spacing)
            .finish_non_exhaustive()
    }
}

impl<'a, M: LabelMeasure + ?Sized> LetterLayout<'a, M> {
    /// Create a layout engine over `font`.
    pub fn new(font: &'a FontDescriptor, letter_spacing: f64, measure: &'a M) -> Self {
        Self {
            font,
            letter_spacing,
            measure,
        }
    }

    /// The font's default letter height.
    pub fn letter_height(&self) -> i32 {
        self.font.letter_height()
    }

    /// Lay out `text` up to its first newline.
    ///
    /// ```
    /// use choicebox_markup::{
    ///     BitmapFont, Cursor, FontDescriptor, LetterLayout, OutlineFont, TextureHandle,
    /// };
    ///
    /// let font = FontDescriptor::Bitmap(
    ///     BitmapFont::new("Hi", TextureHandle(1), 20, 10, true, 10, 10).unwrap(),
    /// );
    /// let no_labels = |_: &OutlineFont, _: char, _: f64| 0.0;
    /// let layout = LetterLayout::new(&font, 1.0, &no_labels);
    ///
    /// let line = layout.layout_line("\\S[+4]Hi\\S[]", Cursor::new(0.0, 0.0, 10));
    /// assert_eq!(line.glyphs.len(), 2);
    /// assert!(line.glyphs.iter().all(|g| g.size == 14));
    /// assert_eq!(line.cursor.size, 10);
    /// assert_eq!(line.max_height, 14);
    /// ```
    pub fn layout_line(&self, text: &str, cursor: Cursor) -> LineLayout {
        let chars: Vec<char> = text.chars().collect();
        self.layout_chars(&chars, cursor)
    }

    /// Lay out a character slice up to its first newline.
    pub fn layout_chars(&self, text: &[char], start: Cursor) -> LineLayout {
        let letter_height = self.letter_height();
        let mut cursor = start;
        let mut glyphs = Vec::new();
        let mut max_height: Option<i32> = None;
        let mut j = 0;
        while j < text.len() {
            let ch = text[j];
            if ch == '\n' {
                break;
            }
            if ch == '\\' && text.get(j + 1) == Some(&'\\') {
                self.place(&mut glyphs, &mut cursor, &mut max_height, '\\');
                j += 2;
                continue;
            }
            let ctx = TagContext {
                current_size: cursor.size,
                default_size: letter_height,
                default_color: Rgb::WHITE,
            };
            let parsed = parse_tag(text, j, &ctx);
            if let Some(tag) = parsed.tag {
                match tag {
                    TextTag::Size(size) => cursor.size = size,
                    TextTag::Color(color) => cursor.color = color,
                }
                j = parsed.next_head;
                continue;
            }
            self.place(&mut glyphs, &mut cursor, &mut max_height, ch);
            j += 1;
        }
        LineLayout {
            glyphs,
            cursor,
            max_height: max_height.unwrap_or(start.size),
        }
    }

    fn place(
        &self,
        glyphs: &mut Vec<GlyphPlacement>,
        cursor: &mut Cursor,
        max_height: &mut Option<i32>,
        ch: char,
    ) {
        let placed = match self.font {
            FontDescriptor::Bitmap(font) => self.place_cell(font, cursor, ch),
            FontDescriptor::Outline(font) => Some(self.place_label(font, cursor, ch)),
        };
        let Some(glyph) = placed else {
            log::trace!("no glyph for {ch:?}; skipped");
            return;
        };
        *max_height = Some(max_height.map_or(glyph.size, |m| m.max(glyph.size)));
        glyphs.push(glyph);
    }

    fn scale(&self, size: i32) -> f64 {
        f64::from(size) / f64::from(self.letter_height().max(1))
    }

    /// `value * size / letter_height`, multiplied first so integral inputs stay exact.
    fn scaled(&self, value: i32, size: i32) -> f64 {
        f64::from(value) * f64::from(size) / f64::from(self.letter_height().max(1))
    }

    fn baseline(&self, cursor: &Cursor) -> f64 {
        cursor.y + f64::from(self.letter_height())
    }

    fn place_cell(&self, font: &BitmapFont, cursor: &mut Cursor, ch: char) -> Option<GlyphPlacement> {
        let (row, col) = font.locate(ch)?;
        let scale = self.scale(cursor.size);
        let height = f64::from(cursor.size);
        let glyph = GlyphPlacement {
            character: ch,
            x: cursor.x,
            y: self.baseline(cursor) - height,
            width: self.scaled(font.cell_width, cursor.size),
            height,
            color: cursor.color,
            size: cursor.size,
            size_scale: scale,
            source: GlyphSource::Cell {
                texture: font.texture,
                x: i32::try_from(col).ok()?.saturating_mul(font.cell_width),
                y: i32::try_from(row).ok()?.saturating_mul(font.cell_height),
                width: font.cell_width,
                height: font.cell_height,
            },
        };
        cursor.x += self.scaled(font.advance(ch), cursor.size) + self.letter_spacing;
        Some(glyph)
    }

    fn place_label(&self, font: &OutlineFont, cursor: &mut Cursor, ch: char) -> GlyphPlacement {
        let scale = self.scale(cursor.size);
        let point_size = self.scaled(font.base_size, cursor.size);
        let width = self.measure.label_width(font, ch, point_size);
        let height = f64::from(cursor.size);
        let glyph = GlyphPlacement {
            character: ch,
            x: cursor.x,
            y: self.baseline(cursor) - height + height / 8.0,
            width,
            height,
            color: cursor.color,
            size: cursor.size,
            size_scale: scale,
            source: GlyphSource::Label { point_size },
        };
        cursor.x += width + self.letter_spacing;
        glyph
    }
}
