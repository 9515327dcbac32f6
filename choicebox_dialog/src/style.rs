// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window appearance and placement options.

use choicebox_markup::TextureHandle;

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// How the window behind the choices is drawn, and how it animates.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Background {
    /// A filled, bordered rectangle that grows vertically from its center on
    /// open and shrinks back on close.
    Frame {
        /// Fill color.
        fill: Rgba,
        /// One-pixel border color.
        border: Rgba,
    },
    /// An image stretched over the window that fades in and out.
    Image(TextureHandle),
    /// No window; the text appears and disappears without animation.
    None,
}

/// Horizontal placement of the window within the viewport.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HorizontalAnchor {
    /// Flush with the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical placement of the window within the viewport.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum VerticalAnchor {
    /// Flush with the top edge.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Flush with the bottom edge.
    Bottom,
}
