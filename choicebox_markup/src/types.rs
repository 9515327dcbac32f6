// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: colors, tags, and the parse context shared by the tag parser and layout.

/// An opaque 8-bit RGB color.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Opaque white, the default text color.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A recognized inline tag.
///
/// Produced by [`parse_tag`](crate::parse_tag) and applied immediately by the
/// layout engine. Tags are never stored alongside glyphs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TextTag {
    /// `\S[...]`: the letter size that applies from here on.
    Size(i32),
    /// `\C[...]`: the text color that applies from here on.
    Color(Rgb),
}

/// Result of a tag parse attempt at some position.
///
/// When `tag` is `None`, `next_head` equals the position that was probed and
/// the caller treats the character there as literal text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParsedTag {
    /// Position just past the closing `]`, or the probed position if no tag matched.
    pub next_head: usize,
    /// The tag that was recognized, if any.
    pub tag: Option<TextTag>,
}

impl ParsedTag {
    /// A "no tag here" result for position `head`.
    pub const fn none(head: usize) -> Self {
        Self {
            next_head: head,
            tag: None,
        }
    }
}

/// Running state a tag body is interpreted against.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TagContext {
    /// Size in effect before the tag; base for `+N` / `-N`.
    pub current_size: i32,
    /// Size restored by `\S[]` and used when an absolute size fails to parse.
    pub default_size: i32,
    /// Color restored by `\C[]` and by malformed `#` bodies.
    pub default_color: Rgb,
}

impl TagContext {
    /// Context for text whose default letter height is `default_size`.
    pub const fn new(default_size: i32) -> Self {
        Self {
            current_size: default_size,
            default_size,
            default_color: Rgb::WHITE,
        }
    }
}
