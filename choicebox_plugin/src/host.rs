// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborator interface and the asset records it hands out.

use choicebox_dialog::{DialogSurface, InputSource};
use choicebox_markup::{BitmapFont, FontDescriptor, LabelMeasure, OutlineFont, TextureHandle};
use kurbo::Size;

/// The object instance a command or condition runs on behalf of.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Requester {
    /// Object ID.
    pub object_id: i32,
    /// Instance ID within the object.
    pub instance_id: i32,
}

impl Requester {
    /// Create a requester.
    pub const fn new(object_id: i32, instance_id: i32) -> Self {
        Self {
            object_id,
            instance_id,
        }
    }
}

/// A font as the host stores it.
#[derive(Clone, Debug, PartialEq)]
pub enum FontRecord {
    /// Glyphs cut from a character-grid image.
    Bitmap {
        /// Image holding the grid.
        image_id: i32,
        /// Grid rows separated by newlines.
        letter_layout: String,
        /// Whether every glyph advances by the cell width.
        fixed_width: bool,
        /// Advance of narrow characters.
        half_width: i32,
        /// Advance of wide characters.
        full_width: i32,
    },
    /// A TrueType font shipped under `fonts/`.
    Outline {
        /// File stem of the font.
        font_name: String,
        /// Point size, also the default letter height.
        font_size: i32,
        /// Whether antialiasing is turned off.
        antialias_disabled: bool,
        /// Alpha threshold used when antialiasing is off.
        alias_threshold: i32,
    },
}

/// An image as the host stores it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ImageRecord {
    /// Texture for drawing.
    pub texture: TextureHandle,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

/// A localized text as the host stores it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRecord {
    /// The string for the requested locale.
    pub text: String,
    /// Font override; `None` uses the dialog font.
    pub font_id: Option<i32>,
    /// Extra gap after each glyph.
    pub letter_spacing: f64,
}

/// Everything the plugin needs from the runtime hosting it.
///
/// Input polling and label measurement come from the supertraits; the
/// dialog's drawable node comes from [`attach_dialog_surface`](Self::attach_dialog_surface).
pub trait Host: InputSource + LabelMeasure {
    /// Drawable node type for dialogs.
    type Surface: DialogSurface;

    /// Look up a font.
    fn font(&self, id: i32) -> Option<FontRecord>;
    /// Look up an image.
    fn image(&self, id: i32) -> Option<ImageRecord>;
    /// Look up a text in `locale`.
    fn text(&self, id: i32, locale: &str) -> Option<TextRecord>;
    /// Current locale.
    fn locale(&self) -> &str;
    /// Current viewport size.
    fn viewport(&self) -> Size;
    /// Write `value` into a variable of an object instance.
    fn set_instance_variable(&mut self, instance_id: i32, variable_id: i32, value: f64);
    /// Create a node on the scene's UI layer, or `None` if the scene has none.
    fn attach_dialog_surface(&mut self) -> Option<Self::Surface>;
}

/// Turn a host font into a layout font, resolving a bitmap font's image.
pub fn resolve_font<H: Host + ?Sized>(host: &H, id: i32) -> Option<FontDescriptor> {
    match host.font(id)? {
        FontRecord::Bitmap {
            image_id,
            letter_layout,
            fixed_width,
            half_width,
            full_width,
        } => {
            let image = host.image(image_id)?;
            BitmapFont::new(
                &letter_layout,
                image.texture,
                image.width,
                image.height,
                fixed_width,
                half_width,
                full_width,
            )
            .map(FontDescriptor::Bitmap)
        }
        FontRecord::Outline {
            font_name,
            font_size,
            antialias_disabled,
            alias_threshold,
        } => (font_size > 0).then(|| {
            FontDescriptor::Outline(OutlineFont {
                filename: format!("fonts/{font_name}.ttf"),
                base_size: font_size,
                antialias_threshold: antialias_disabled.then_some(alias_threshold),
            })
        }),
    }
}
