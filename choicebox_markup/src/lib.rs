// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=choicebox_markup --heading-base-level=0

//! Choicebox Markup: inline text tags and per-glyph letter layout.
//!
//! This crate turns short, lightly marked-up strings into positioned glyphs for
//! a host that draws them. It knows two tags, `\S[...]` for letter size and
//! `\C[...]` for color, and two kinds of font:
//!
//! - [`BitmapFont`]: glyphs are cells of a character-grid texture;
//! - [`OutlineFont`]: glyphs are rendered by the host, which reports their
//!   widths through [`LabelMeasure`].
//!
//! It does not draw, wrap, or shape text. Higher layers split text on newlines
//! and stack the lines; see `choicebox_dialog` for the choice-window builder.
//!
//! ## Example
//!
//! ```rust
//! use choicebox_markup::{
//!     BitmapFont, Cursor, FontDescriptor, LetterLayout, OutlineFont, Rgb, TextureHandle,
//! };
//!
//! // A 4x1 grid in a 32x8 texture: 8x8 cells.
//! let grid = BitmapFont::new("Yes!", TextureHandle(1), 32, 8, true, 8, 8).unwrap();
//! let font = FontDescriptor::Bitmap(grid);
//! let measure = |_: &OutlineFont, _: char, _: f64| 0.0;
//!
//! let layout = LetterLayout::new(&font, 1.0, &measure);
//! let line = layout.layout_line("\\C[#0f0]Yes\\C[]!", Cursor::new(0.0, 0.0, 8));
//!
//! assert_eq!(line.glyphs.len(), 4);
//! assert_eq!(line.glyphs[0].color, Rgb::new(0, 255, 0));
//! assert_eq!(line.glyphs[3].color, Rgb::WHITE);
//! assert_eq!(line.cursor.x, 36.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod font;
mod layout;
mod tag;
mod types;

pub use font::{BitmapFont, FontDescriptor, OutlineFont, TextureHandle, is_narrow};
pub use layout::{Cursor, GlyphPlacement, GlyphSource, LabelMeasure, LetterLayout, LineLayout};
pub use tag::parse_tag;
pub use types::{ParsedTag, Rgb, TagContext, TextTag};
