// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dialog state machine.
//!
//! ## Modes
//!
//! `Opening → WaitingForInput → Closing → Ended`, advanced by one
//! [`Dialog::update`] per frame:
//!
//! - **Opening** grows the frame by [`GROW_STEP`] per frame, or fades the image
//!   in over [`FADE_FRAMES`]. It always blocks.
//! - **WaitingForInput** handles at most one input per frame, checked in the
//!   order up, down, confirm, left click, then cancel or right click.
//! - **Closing** reverses the opening animation. It starts on the same frame
//!   the input that triggered it arrives.
//! - **Ended** detaches the surface and reports the outcome.
//!
//! With [`Background::None`] there is no animation: a new dialog is already
//! waiting, and a confirm or cancel finishes on the frame it arrives.

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use choicebox_markup::GlyphPlacement;

use crate::builder::ChoiceSet;
use crate::geometry::DialogGeometry;
use crate::input::{EdgeTracker, InputSource, LogicalInput};
use crate::style::{Background, HorizontalAnchor, Rgba, VerticalAnchor};
use crate::surface::DialogSurface;

/// Frame height added per opening frame and removed per closing frame.
pub const GROW_STEP: f64 = 16.0;

/// Length of a fade in either direction.
pub const FADE_FRAMES: u32 = 30;

/// Length of one highlight pulse, bright to dim and back.
pub const PULSE_PERIOD: u32 = 60;

/// Dimmest highlight opacity during a pulse.
pub const PULSE_MIN_OPACITY: u8 = 128;

/// Per-dialog settings, resolved by the caller before the dialog opens.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DialogConfig {
    /// Window style and animation.
    pub background: Background,
    /// Highlight fill.
    pub highlight: Rgba,
    /// Horizontal placement.
    pub horizontal: HorizontalAnchor,
    /// Vertical placement.
    pub vertical: VerticalAnchor,
    /// Whether cancel and right click close the dialog.
    pub cancellable: bool,
}

/// Lifecycle stage of a [`Dialog`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Open animation in progress.
    Opening,
    /// Shown and accepting input.
    WaitingForInput,
    /// Close animation in progress.
    Closing,
    /// Closed and detached.
    Ended,
}

/// How a dialog concluded.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The choice at this 0-based index was confirmed.
    Selected(usize),
    /// The dialog was cancelled.
    Cancelled,
}

/// Result of one [`Dialog::update`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Update {
    /// Still running; call again next frame.
    Block,
    /// Closed with this outcome.
    Finished(Outcome),
}

/// A multiple-choice dialog driven one frame at a time.
#[derive(Debug)]
pub struct Dialog<S> {
    surface: S,
    geometry: DialogGeometry,
    config: DialogConfig,
    input: EdgeTracker,
    mode: Mode,
    counter: u32,
    pulse: u32,
    current: usize,
    committed: Option<Outcome>,
    detached: bool,
}

impl<S: DialogSurface> Dialog<S> {
    /// Place `choices` on `surface` and start opening.
    pub fn new(choices: &ChoiceSet, config: DialogConfig, viewport: Size, mut surface: S) -> Self {
        let geometry = DialogGeometry::new(choices, config.horizontal, config.vertical, viewport);
        surface.set_position(geometry.origin());

        let offset = geometry.text_offset();
        for choice in &choices.choices {
            let glyphs: Vec<GlyphPlacement> = choice
                .glyphs
                .iter()
                .map(|g| translate(g, offset))
                .collect();
            surface.add_glyphs(&glyphs);
        }
        surface.set_text_visible(false);
        surface.set_highlight_visible(false);

        let mut dialog = Self {
            surface,
            geometry,
            config,
            input: EdgeTracker::new(),
            mode: Mode::Opening,
            counter: 0,
            pulse: 0,
            current: 0,
            committed: None,
            detached: false,
        };
        match config.background {
            Background::Frame { .. } => {}
            Background::Image(_) => {
                let full = dialog.geometry.frame_rect(dialog.geometry.size().height);
                dialog.surface.draw_background(&config.background, full);
                dialog.surface.set_background_opacity(0);
            }
            Background::None => dialog.enter_waiting(),
        }
        log::debug!(
            "dialog opened: {} choices, {:?} at {:?}",
            choices.len(),
            dialog.geometry.size(),
            dialog.geometry.origin()
        );
        dialog
    }

    /// Advance one frame.
    ///
    /// Returns [`Update::Finished`] once the dialog has closed. The surface is
    /// detached the first time; later calls repeat the outcome and do nothing else.
    pub fn update<I: InputSource + ?Sized>(&mut self, input: &I) -> Update {
        if self.mode == Mode::Opening {
            self.open_step();
            return Update::Block;
        }
        if self.mode == Mode::WaitingForInput {
            self.pulse_highlight();
            self.poll(input);
        }
        if self.mode == Mode::Closing {
            self.close_step();
        }
        if self.mode == Mode::Ended {
            return Update::Finished(self.finish());
        }
        Update::Block
    }

    /// Close immediately, skipping any animation.
    ///
    /// An outcome already committed by confirm or cancel is kept. Otherwise a
    /// cancellable dialog is cancelled and any other reports its current choice.
    pub fn force_close(&mut self) -> Outcome {
        if self.committed.is_none() {
            self.committed = Some(if self.config.cancellable {
                Outcome::Cancelled
            } else {
                Outcome::Selected(self.current)
            });
        }
        log::debug!("dialog force-closed from {:?}", self.mode);
        self.mode = Mode::Ended;
        self.finish()
    }

    /// Current lifecycle stage.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Index of the highlighted choice.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Whether cancel inputs are honored.
    pub fn is_cancellable(&self) -> bool {
        self.config.cancellable
    }

    /// Window placement.
    pub fn geometry(&self) -> &DialogGeometry {
        &self.geometry
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn open_step(&mut self) {
        let background = self.config.background;
        match background {
            Background::Frame { .. } => {
                let target = self.geometry.size().height;
                let grown = f64::from(self.counter + 1) * GROW_STEP;
                let rect = self.geometry.frame_rect(grown.min(target));
                self.surface.draw_background(&background, rect);
                if grown >= target {
                    self.enter_waiting();
                } else {
                    self.counter += 1;
                }
            }
            Background::Image(_) => {
                self.surface.set_background_opacity(fade_opacity(self.counter));
                if self.counter >= FADE_FRAMES {
                    self.enter_waiting();
                } else {
                    self.counter += 1;
                }
            }
            Background::None => self.enter_waiting(),
        }
    }

    fn close_step(&mut self) {
        let background = self.config.background;
        match background {
            Background::Frame { .. } => {
                let remaining = self.geometry.size().height - f64::from(self.counter + 1) * GROW_STEP;
                if remaining < GROW_STEP {
                    self.surface.clear_background();
                    self.set_mode(Mode::Ended);
                } else {
                    let rect = self.geometry.frame_rect(remaining);
                    self.surface.draw_background(&background, rect);
                    self.counter += 1;
                }
            }
            Background::Image(_) => {
                self.surface
                    .set_background_opacity(u8::MAX - fade_opacity(self.counter));
                if self.counter >= FADE_FRAMES {
                    self.set_mode(Mode::Ended);
                } else {
                    self.counter += 1;
                }
            }
            Background::None => self.set_mode(Mode::Ended),
        }
    }

    fn poll<I: InputSource + ?Sized>(&mut self, input: &I) {
        let count = self.geometry.choice_count();
        if self.input.is_just_pressed(LogicalInput::Up, input) {
            if self.current > 0 {
                self.select(self.current - 1);
            }
        } else if self.input.is_just_pressed(LogicalInput::Down, input) {
            if self.current + 1 < count {
                self.select(self.current + 1);
            }
        } else if self.input.is_just_pressed(LogicalInput::Confirm, input) {
            self.begin_closing(Outcome::Selected(self.current));
        } else if self.input.is_just_pressed(LogicalInput::MouseLeft, input) {
            match self.geometry.hit_test(input.pointer_position()) {
                Some(index) if index == self.current => {
                    self.begin_closing(Outcome::Selected(index));
                }
                Some(index) => self.select(index),
                None => {}
            }
        } else if self.config.cancellable
            && (self.input.is_just_pressed(LogicalInput::Cancel, input)
                || self.input.is_just_pressed(LogicalInput::MouseRight, input))
        {
            self.begin_closing(Outcome::Cancelled);
        }
    }

    fn select(&mut self, index: usize) {
        self.current = index;
        self.refresh_highlight();
    }

    fn refresh_highlight(&mut self) {
        if let Some(rect) = self.geometry.highlight_rect(self.current) {
            self.surface.set_highlight(rect, self.config.highlight);
        }
        self.surface.set_highlight_opacity(u8::MAX);
        self.pulse = 0;
    }

    fn pulse_highlight(&mut self) {
        self.pulse = self.pulse.wrapping_add(1);
        self.surface.set_highlight_opacity(pulse_opacity(self.pulse));
    }

    fn enter_waiting(&mut self) {
        self.set_mode(Mode::WaitingForInput);
        self.surface.set_text_visible(true);
        self.refresh_highlight();
        self.surface.set_highlight_visible(true);
    }

    fn begin_closing(&mut self, outcome: Outcome) {
        self.committed = Some(outcome);
        self.surface.set_text_visible(false);
        self.surface.set_highlight_visible(false);
        self.set_mode(Mode::Closing);
    }

    fn set_mode(&mut self, mode: Mode) {
        log::debug!("dialog {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.counter = 0;
    }

    fn finish(&mut self) -> Outcome {
        if !self.detached {
            self.surface.detach();
            self.detached = true;
        }
        self.committed.unwrap_or(Outcome::Selected(self.current))
    }
}

fn translate(glyph: &GlyphPlacement, offset: Vec2) -> GlyphPlacement {
    GlyphPlacement {
        x: glyph.x + offset.x,
        y: glyph.y + offset.y,
        ..*glyph
    }
}

/// Opacity `frame` frames into a fade-in, reaching 255 at [`FADE_FRAMES`].
pub fn fade_opacity(frame: u32) -> u8 {
    let step = frame.min(FADE_FRAMES) * u32::from(u8::MAX) / FADE_FRAMES;
    u8::try_from(step).unwrap_or(u8::MAX)
}

/// Highlight opacity `frame` frames after it was placed.
///
/// A triangle wave from 255 down to [`PULSE_MIN_OPACITY`] and back over
/// [`PULSE_PERIOD`] frames.
pub fn pulse_opacity(frame: u32) -> u8 {
    let half = PULSE_PERIOD / 2;
    let phase = frame % PULSE_PERIOD;
    let depth = phase.min(PULSE_PERIOD - phase);
    let range = u32::from(u8::MAX - PULSE_MIN_OPACITY);
    let dimmed = range * depth / half;
    u8::try_from(u32::from(u8::MAX) - dimmed).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ChoiceEntry, build_choices};
    use crate::input::{MouseButtons, OperationKeys};
    use alloc::vec;
    use choicebox_markup::{BitmapFont, FontDescriptor, OutlineFont, TextureHandle};
    use kurbo::{Point, Rect};

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Position(Point),
        Background(Rect),
        ClearBackground,
        BackgroundOpacity(u8),
        Glyphs(usize),
        TextVisible(bool),
        Highlight(Rect),
        HighlightVisible(bool),
        HighlightOpacity(u8),
        Detach,
    }

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn backgrounds(&self) -> Vec<f64> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Background(r) => Some(r.height()),
                    _ => None,
                })
                .collect()
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    impl DialogSurface for Recorder {
        fn set_position(&mut self, origin: Point) {
            self.calls.push(Call::Position(origin));
        }
        fn draw_background(&mut self, _: &Background, rect: Rect) {
            self.calls.push(Call::Background(rect));
        }
        fn clear_background(&mut self) {
            self.calls.push(Call::ClearBackground);
        }
        fn set_background_opacity(&mut self, opacity: u8) {
            self.calls.push(Call::BackgroundOpacity(opacity));
        }
        fn add_glyphs(&mut self, glyphs: &[GlyphPlacement]) {
            self.calls.push(Call::Glyphs(glyphs.len()));
        }
        fn set_text_visible(&mut self, visible: bool) {
            self.calls.push(Call::TextVisible(visible));
        }
        fn set_highlight(&mut self, rect: Rect, _: Rgba) {
            self.calls.push(Call::Highlight(rect));
        }
        fn set_highlight_visible(&mut self, visible: bool) {
            self.calls.push(Call::HighlightVisible(visible));
        }
        fn set_highlight_opacity(&mut self, opacity: u8) {
            self.calls.push(Call::HighlightOpacity(opacity));
        }
        fn detach(&mut self) {
            self.calls.push(Call::Detach);
        }
    }

    #[derive(Clone, Copy)]
    struct Frame {
        keys: OperationKeys,
        mouse: MouseButtons,
        pointer: Point,
    }

    impl InputSource for Frame {
        fn operation_keys_down(&self) -> OperationKeys {
            self.keys
        }
        fn mouse_buttons_down(&self) -> MouseButtons {
            self.mouse
        }
        fn pointer_position(&self) -> Point {
            self.pointer
        }
    }

    const IDLE: Frame = Frame {
        keys: OperationKeys::empty(),
        mouse: MouseButtons::empty(),
        pointer: Point::ZERO,
    };

    fn keys(keys: OperationKeys) -> Frame {
        Frame { keys, ..IDLE }
    }

    fn click(button: MouseButtons, x: f64, y: f64) -> Frame {
        Frame {
            mouse: button,
            pointer: Point::new(x, y),
            ..IDLE
        }
    }

    fn choices(n: usize) -> ChoiceSet {
        let font = FontDescriptor::Bitmap(
            BitmapFont::new("abc", TextureHandle(1), 30, 10, true, 10, 10).unwrap(),
        );
        let entries: Vec<ChoiceEntry> = (0..n).map(|_| ChoiceEntry::new("abc")).collect();
        build_choices(&entries, Some(&font), &|_: &OutlineFont, _: char, _: f64| 0.0).unwrap()
    }

    fn config(background: Background, cancellable: bool) -> DialogConfig {
        DialogConfig {
            background,
            highlight: Rgba::new(0, 255, 255, 128),
            horizontal: HorizontalAnchor::Left,
            vertical: VerticalAnchor::Top,
            cancellable,
        }
    }

    const FRAME: Background = Background::Frame {
        fill: Rgba::new(0, 0, 0, 128),
        border: Rgba::WHITE,
    };

    fn open(n: usize, background: Background, cancellable: bool) -> Dialog<Recorder> {
        Dialog::new(
            &choices(n),
            config(background, cancellable),
            Size::new(320.0, 240.0),
            Recorder::default(),
        )
    }

    /// One idle frame, then `frame`; returns the result of the second.
    fn press(d: &mut Dialog<Recorder>, frame: Frame) -> Update {
        assert_eq!(d.update(&IDLE), Update::Block);
        d.update(&frame)
    }

    #[test]
    fn no_background_skips_animation() {
        let mut d = open(3, Background::None, false);
        assert_eq!(d.mode(), Mode::WaitingForInput);
        assert_eq!(
            press(&mut d, keys(OperationKeys::OK)),
            Update::Finished(Outcome::Selected(0))
        );
        assert_eq!(d.mode(), Mode::Ended);
        assert_eq!(d.surface().count(&Call::Detach), 1);
        assert!(d.surface().backgrounds().is_empty());
    }

    #[test]
    fn glyphs_are_placed_inside_the_padding() {
        let d = open(2, Background::None, false);
        assert_eq!(d.surface().calls[0], Call::Position(Point::ZERO));
        assert_eq!(d.surface().count(&Call::Glyphs(3)), 2);
    }

    #[test]
    fn frame_grows_until_full_height() {
        // Three 10px lines: text 46 high, window 62.
        let mut d = open(3, FRAME, false);
        assert_eq!(d.mode(), Mode::Opening);
        for _ in 0..3 {
            assert_eq!(d.update(&IDLE), Update::Block);
            assert_eq!(d.mode(), Mode::Opening);
        }
        assert_eq!(d.update(&IDLE), Update::Block);
        assert_eq!(d.mode(), Mode::WaitingForInput);
        assert_eq!(d.surface().backgrounds(), vec![16.0, 32.0, 48.0, 62.0]);
        assert_eq!(d.surface().count(&Call::TextVisible(true)), 1);
    }

    #[test]
    fn opening_ignores_input() {
        let mut d = open(2, FRAME, false);
        assert_eq!(d.update(&IDLE), Update::Block);
        assert_eq!(d.update(&keys(OperationKeys::OK)), Update::Block);
        assert_eq!(d.mode(), Mode::Opening);
    }

    #[test]
    fn frame_shrinks_then_finishes() {
        let mut d = open(3, FRAME, false);
        while d.mode() == Mode::Opening {
            d.update(&IDLE);
        }
        assert_eq!(press(&mut d, keys(OperationKeys::OK)), Update::Block);
        assert_eq!(d.mode(), Mode::Closing);
        assert_eq!(d.update(&IDLE), Update::Block);
        assert_eq!(d.update(&IDLE), Update::Finished(Outcome::Selected(0)));
        let heights = d.surface().backgrounds();
        assert_eq!(heights[heights.len() - 2..], [46.0, 30.0]);
        assert_eq!(d.surface().count(&Call::ClearBackground), 1);
    }

    #[test]
    fn image_fades_in_and_out() {
        let image = Background::Image(TextureHandle(9));
        let mut d = open(1, image, true);
        let mut blocks = 0;
        while d.mode() == Mode::Opening {
            assert_eq!(d.update(&IDLE), Update::Block);
            blocks += 1;
        }
        assert_eq!(blocks, 31);
        assert_eq!(
            d.surface().calls.last(),
            Some(&Call::HighlightVisible(true))
        );
        assert_eq!(d.surface().count(&Call::BackgroundOpacity(255)), 1);

        assert_eq!(press(&mut d, keys(OperationKeys::CANCEL)), Update::Block);
        let mut closing = 1;
        let outcome = loop {
            if let Update::Finished(o) = d.update(&IDLE) {
                break o;
            }
            closing += 1;
        };
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(closing, 30);
        assert_eq!(d.surface().count(&Call::BackgroundOpacity(0)), 3);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut d = open(3, Background::None, false);
        press(&mut d, keys(OperationKeys::UP));
        assert_eq!(d.current_index(), 0);
        for _ in 0..5 {
            press(&mut d, keys(OperationKeys::DOWN));
            assert!(d.current_index() < 3);
        }
        assert_eq!(d.current_index(), 2);
        press(&mut d, keys(OperationKeys::UP));
        assert_eq!(d.current_index(), 1);
        assert_eq!(
            press(&mut d, keys(OperationKeys::OK)),
            Update::Finished(Outcome::Selected(1))
        );
    }

    #[test]
    fn held_key_must_be_released() {
        let mut d = open(2, Background::None, false);
        let held = keys(OperationKeys::DOWN);
        d.update(&held);
        d.update(&held);
        assert_eq!(d.current_index(), 0);
        d.update(&IDLE);
        d.update(&held);
        assert_eq!(d.current_index(), 1);
    }

    #[test]
    fn one_input_per_frame() {
        let mut d = open(2, Background::None, false);
        press(&mut d, keys(OperationKeys::DOWN));
        let both = keys(OperationKeys::UP | OperationKeys::OK);
        assert_eq!(press(&mut d, both), Update::Block);
        assert_eq!(d.current_index(), 0);
        // Confirm was not sampled on the previous frame, so it fires now.
        assert_eq!(d.update(&both), Update::Finished(Outcome::Selected(0)));
    }

    #[test]
    fn click_selects_then_confirms() {
        // Window at the origin; choice 1 lines span y 26..36.
        let mut d = open(3, Background::None, false);
        assert_eq!(press(&mut d, click(MouseButtons::LEFT, 20.0, 30.0)), Update::Block);
        assert_eq!(d.current_index(), 1);
        assert_eq!(
            d.surface().calls.last(),
            Some(&Call::HighlightOpacity(255))
        );
        assert!(d.surface().calls.contains(&Call::Highlight(Rect::new(4.0, 22.0, 42.0, 40.0))));
        assert_eq!(press(&mut d, click(MouseButtons::LEFT, 300.0, 30.0)), Update::Block);
        assert_eq!(d.current_index(), 1);
        assert_eq!(
            press(&mut d, click(MouseButtons::LEFT, 20.0, 30.0)),
            Update::Finished(Outcome::Selected(1))
        );
    }

    #[test]
    fn cancel_requires_cancellable() {
        let mut d = open(2, Background::None, false);
        assert_eq!(press(&mut d, keys(OperationKeys::CANCEL)), Update::Block);
        assert_eq!(
            press(&mut d, click(MouseButtons::RIGHT, 0.0, 0.0)),
            Update::Block
        );
        assert_eq!(d.mode(), Mode::WaitingForInput);

        let mut d = open(2, Background::None, true);
        assert_eq!(
            press(&mut d, click(MouseButtons::RIGHT, 0.0, 0.0)),
            Update::Finished(Outcome::Cancelled)
        );
    }

    #[test]
    fn force_close_outcomes() {
        let mut d = open(3, FRAME, true);
        d.update(&IDLE);
        assert_eq!(d.force_close(), Outcome::Cancelled);
        assert_eq!(d.mode(), Mode::Ended);
        assert_eq!(d.surface().count(&Call::Detach), 1);

        let mut d = open(3, Background::None, false);
        press(&mut d, keys(OperationKeys::DOWN));
        assert_eq!(d.force_close(), Outcome::Selected(1));

        // A committed choice survives a forced close mid-animation.
        let mut d = open(3, FRAME, true);
        while d.mode() == Mode::Opening {
            d.update(&IDLE);
        }
        press(&mut d, keys(OperationKeys::OK));
        assert_eq!(d.mode(), Mode::Closing);
        assert_eq!(d.force_close(), Outcome::Selected(0));
    }

    #[test]
    fn finished_is_sticky() {
        let mut d = open(1, Background::None, false);
        press(&mut d, keys(OperationKeys::OK));
        assert_eq!(d.update(&IDLE), Update::Finished(Outcome::Selected(0)));
        assert_eq!(d.surface().count(&Call::Detach), 1);
    }

    #[test]
    fn pulse_shape() {
        assert_eq!(pulse_opacity(0), 255);
        assert_eq!(pulse_opacity(15), 192);
        assert_eq!(pulse_opacity(30), 128);
        assert_eq!(pulse_opacity(45), 192);
        assert_eq!(pulse_opacity(60), 255);
        assert!((0..PULSE_PERIOD).all(|f| pulse_opacity(f) >= PULSE_MIN_OPACITY));
    }

    #[test]
    fn fade_shape() {
        assert_eq!(fade_opacity(0), 0);
        assert_eq!(fade_opacity(15), 127);
        assert_eq!(fade_opacity(30), 255);
        assert_eq!(fade_opacity(99), 255);
    }
}
