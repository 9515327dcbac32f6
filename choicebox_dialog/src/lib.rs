// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=choicebox_dialog --heading-base-level=0

//! Choicebox Dialog: a frame-driven multiple-choice prompt.
//!
//! ## Overview
//!
//! A dialog is built in two steps and then driven once per frame:
//!
//! 1) [`build_choices`] lays out up to [`MAX_CHOICES`] slots of tagged text
//!    with `choicebox_markup` and measures the text block.
//! 2) [`Dialog::new`] sizes and anchors the window, hands the glyphs to a
//!    [`DialogSurface`], and starts the open animation.
//! 3) [`Dialog::update`] is called every frame with the host's [`InputSource`].
//!    It returns [`Update::Block`] until the dialog has closed, then
//!    [`Update::Finished`] with the [`Outcome`].
//!
//! Nothing here blocks or spawns: "waiting" is the host calling `update` again
//! next frame.
//!
//! ## Input
//!
//! [`EdgeTracker`] turns held-key polling into one-shot presses. Every input
//! starts out "held", so a key still down from whatever opened the dialog is
//! ignored until it is released.
//!
//! ## Example
//!
//! ```rust
//! use choicebox_dialog::{
//!     Background, ChoiceEntry, Dialog, DialogConfig, DialogSurface, HorizontalAnchor,
//!     InputSource, MouseButtons, OperationKeys, Outcome, Rgba, Update, VerticalAnchor,
//!     build_choices,
//! };
//! use choicebox_markup::{BitmapFont, FontDescriptor, GlyphPlacement, OutlineFont, TextureHandle};
//! use kurbo::{Point, Rect, Size};
//!
//! struct Headless;
//! impl DialogSurface for Headless {
//!     fn set_position(&mut self, _: Point) {}
//!     fn draw_background(&mut self, _: &Background, _: Rect) {}
//!     fn clear_background(&mut self) {}
//!     fn set_background_opacity(&mut self, _: u8) {}
//!     fn add_glyphs(&mut self, _: &[GlyphPlacement]) {}
//!     fn set_text_visible(&mut self, _: bool) {}
//!     fn set_highlight(&mut self, _: Rect, _: Rgba) {}
//!     fn set_highlight_visible(&mut self, _: bool) {}
//!     fn set_highlight_opacity(&mut self, _: u8) {}
//!     fn detach(&mut self) {}
//! }
//!
//! struct Keys(OperationKeys);
//! impl InputSource for Keys {
//!     fn operation_keys_down(&self) -> OperationKeys { self.0 }
//!     fn mouse_buttons_down(&self) -> MouseButtons { MouseButtons::empty() }
//!     fn pointer_position(&self) -> Point { Point::ZERO }
//! }
//!
//! let font = FontDescriptor::Bitmap(
//!     BitmapFont::new("NoYes", TextureHandle(1), 40, 8, true, 8, 8).unwrap(),
//! );
//! let measure = |_: &OutlineFont, _: char, _: f64| 0.0;
//! let set = build_choices(
//!     &[ChoiceEntry::new("Yes"), ChoiceEntry::new("No")],
//!     Some(&font),
//!     &measure,
//! )
//! .unwrap();
//!
//! let config = DialogConfig {
//!     background: Background::None,
//!     highlight: Rgba::new(0, 255, 255, 128),
//!     horizontal: HorizontalAnchor::Center,
//!     vertical: VerticalAnchor::Bottom,
//!     cancellable: false,
//! };
//! let mut dialog = Dialog::new(&set, config, Size::new(320.0, 240.0), Headless);
//!
//! assert_eq!(dialog.update(&Keys(OperationKeys::empty())), Update::Block);
//! assert_eq!(dialog.update(&Keys(OperationKeys::DOWN)), Update::Block);
//! assert_eq!(dialog.update(&Keys(OperationKeys::empty())), Update::Block);
//! assert_eq!(
//!     dialog.update(&Keys(OperationKeys::OK)),
//!     Update::Finished(Outcome::Selected(1))
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod dialog;
mod geometry;
mod input;
mod style;
mod surface;

pub use builder::{
    BuildError, ChoiceEntry, ChoiceLayout, ChoiceSet, LINE_MARGIN, MAX_CHOICES, build_choices,
};
pub use dialog::{
    Dialog, DialogConfig, FADE_FRAMES, GROW_STEP, Mode, Outcome, PULSE_MIN_OPACITY, PULSE_PERIOD,
    Update, fade_opacity, pulse_opacity,
};
pub use geometry::{DialogGeometry, HIT_TOLERANCE, WINDOW_PADDING};
pub use input::{EdgeTracker, InputSource, LogicalInput, MouseButtons, OperationKeys};
pub use style::{Background, HorizontalAnchor, Rgba, VerticalAnchor};
pub use surface::DialogSurface;
