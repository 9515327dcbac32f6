// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font descriptors: bitmap character grids and scalable outline fonts.

use alloc::string::String;
use alloc::vec::Vec;

/// Host-owned texture handle; opaque to this crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u32);

/// A font resolved once per dialog and shared by every choice render.
#[derive(Clone, Debug, PartialEq)]
pub enum FontDescriptor {
    /// Glyphs are cells of a fixed character-grid image.
    Bitmap(BitmapFont),
    /// Glyphs are rendered by the host from a scalable font file.
    Outline(OutlineFont),
}

impl FontDescriptor {
    /// The font's default letter height; `\S[]` resets to this value.
    pub fn letter_height(&self) -> i32 {
        match self {
            Self::Bitmap(b) => b.cell_height,
            Self::Outline(o) => o.base_size,
        }
    }
}

/// A bitmap font laid out as a row-major grid of characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapFont {
    rows: Vec<Vec<char>>,
    /// Width of one grid cell in texels.
    pub cell_width: i32,
    /// Height of one grid cell in texels; also the default letter height.
    pub cell_height: i32,
    /// If true, every glyph advances by `cell_width`.
    pub fixed_width: bool,
    /// Advance for narrow characters when not fixed-width.
    pub half_width: i32,
    /// Advance for wide characters when not fixed-width.
    pub full_width: i32,
    /// Texture the cells are cut from.
    pub texture: TextureHandle,
}

impl BitmapFont {
    /// Build a bitmap font from the host's newline-separated letter layout.
    ///
    /// Cell size is the texture size divided by the longest row and the
    /// number of rows. Returns `None` if the layout is empty or the texture
    /// is too small to hold one cell.
    pub fn new(
        letter_layout: &str,
        texture: TextureHandle,
        texture_width: u32,
        texture_height: u32,
        fixed_width: bool,
        half_width: i32,
        full_width: i32,
    ) -> Option<Self> {
        let rows: Vec<Vec<char>> = letter_layout
            .split('\n')
            .map(|row| row.trim_end_matches('\r').chars().collect())
            .collect();
        let longest = rows.iter().map(Vec::len).max().unwrap_or(0);
        if longest == 0 {
            return None;
        }
        let columns = u32::try_from(longest).ok()?;
        let row_count = u32::try_from(rows.len()).ok()?;
        let cell_width = i32::try_from(texture_width / columns).ok()?;
        let cell_height = i32::try_from(texture_height / row_count).ok()?;
        if cell_width == 0 || cell_height == 0 {
            return None;
        }
        Some(Self {
            rows,
            cell_width,
            cell_height,
            fixed_width,
            half_width,
            full_width,
            texture,
        })
    }

    /// Locate `ch` in the grid as `(row, column)`; the first occurrence wins.
    pub fn locate(&self, ch: char) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(row, letters)| letters.iter().position(|&c| c == ch).map(|col| (row, col)))
    }

    /// Unscaled advance for `ch`.
    pub fn advance(&self, ch: char) -> i32 {
        if self.fixed_width {
            self.cell_width
        } else if is_narrow(ch) {
            self.half_width
        } else {
            self.full_width
        }
    }

    /// Number of rows in the layout grid.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A scalable font the host rasterizes per glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineFont {
    /// Font file the host loads.
    pub filename: String,
    /// Point size at the default letter height.
    pub base_size: i32,
    /// Alpha threshold for aliased rendering; `None` keeps antialiasing on.
    pub antialias_threshold: Option<i32>,
}

/// True for characters drawn at half width in a proportional bitmap font.
///
/// Printable ASCII and half-width katakana are narrow.
pub fn is_narrow(ch: char) -> bool {
    matches!(ch, '\u{01}'..='\u{7e}' | '\u{ff65}'..='\u{ff9f}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> BitmapFont {
        BitmapFont::new("ABCD\nabcd\n\\あ", TextureHandle(7), 64, 48, false, 6, 12)
            .expect("valid layout")
    }

    #[test]
    fn cell_size_from_texture() {
        let f = grid();
        assert_eq!(f.cell_width, 16);
        assert_eq!(f.cell_height, 16);
        assert_eq!(f.row_count(), 3);
    }

    #[test]
    fn locate_row_major() {
        let f = grid();
        assert_eq!(f.locate('A'), Some((0, 0)));
        assert_eq!(f.locate('c'), Some((1, 2)));
        assert_eq!(f.locate('あ'), Some((2, 1)));
        assert_eq!(f.locate('Z'), None);
    }

    #[test]
    fn advance_by_width_class() {
        let mut f = grid();
        assert_eq!(f.advance('a'), 6);
        assert_eq!(f.advance('あ'), 12);
        assert_eq!(f.advance('\u{ff76}'), 6);
        f.fixed_width = true;
        assert_eq!(f.advance('あ'), 16);
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert!(BitmapFont::new("", TextureHandle(0), 64, 64, true, 8, 8).is_none());
        assert!(BitmapFont::new("ABCDEFGH", TextureHandle(0), 4, 64, true, 8, 8).is_none());
    }

    #[test]
    fn letter_height_per_kind() {
        assert_eq!(FontDescriptor::Bitmap(grid()).letter_height(), 16);
        let outline = FontDescriptor::Outline(OutlineFont {
            filename: "fonts/mplus.ttf".into(),
            base_size: 22,
            antialias_threshold: None,
        });
        assert_eq!(outline.letter_height(), 22);
    }
}
