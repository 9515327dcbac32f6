// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-triggered input: one-shot "just pressed" events from level-sensed polling.
//!
//! ## Usage
//!
//! The host reports which inputs are currently held through [`InputSource`].
//! [`EdgeTracker::is_just_pressed`] samples one logical input and remembers the
//! result, so it reports a press only on the first sample after the input goes
//! down. Query each logical input at most once per frame.
//!
//! ```
//! use choicebox_dialog::{EdgeTracker, InputSource, LogicalInput, MouseButtons, OperationKeys};
//! use kurbo::Point;
//!
//! struct Held(OperationKeys);
//! impl InputSource for Held {
//!     fn operation_keys_down(&self) -> OperationKeys { self.0 }
//!     fn mouse_buttons_down(&self) -> MouseButtons { MouseButtons::empty() }
//!     fn pointer_position(&self) -> Point { Point::ZERO }
//! }
//!
//! let mut tracker = EdgeTracker::new();
//! // Held since before the tracker existed: not a press.
//! assert!(!tracker.is_just_pressed(LogicalInput::Confirm, &Held(OperationKeys::OK)));
//! assert!(!tracker.is_just_pressed(LogicalInput::Confirm, &Held(OperationKeys::empty())));
//! assert!(tracker.is_just_pressed(LogicalInput::Confirm, &Held(OperationKeys::OK)));
//! assert!(!tracker.is_just_pressed(LogicalInput::Confirm, &Held(OperationKeys::OK)));
//! ```

use kurbo::Point;

bitflags::bitflags! {
    /// Controller operation keys, merged across every connected controller.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OperationKeys: u32 {
        /// Move the selection up.
        const UP     = 0b0000_0001;
        /// Move the selection down.
        const DOWN   = 0b0000_0010;
        /// Confirm the selection.
        const OK     = 0b0000_0100;
        /// Cancel the dialog.
        const CANCEL = 0b0000_1000;
    }
}

bitflags::bitflags! {
    /// Mouse buttons.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary button.
        const LEFT  = 0b0000_0001;
        /// Secondary button.
        const RIGHT = 0b0000_0010;
    }
}

/// An abstract input, decoupled from device codes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LogicalInput {
    /// Selection up.
    Up,
    /// Selection down.
    Down,
    /// Confirm.
    Confirm,
    /// Cancel key.
    Cancel,
    /// Primary mouse button.
    MouseLeft,
    /// Secondary mouse button.
    MouseRight,
}

enum Channel {
    Key(OperationKeys),
    Mouse(MouseButtons),
}

impl LogicalInput {
    fn channel(self) -> Channel {
        match self {
            Self::Up => Channel::Key(OperationKeys::UP),
            Self::Down => Channel::Key(OperationKeys::DOWN),
            Self::Confirm => Channel::Key(OperationKeys::OK),
            Self::Cancel => Channel::Key(OperationKeys::CANCEL),
            Self::MouseLeft => Channel::Mouse(MouseButtons::LEFT),
            Self::MouseRight => Channel::Mouse(MouseButtons::RIGHT),
        }
    }
}

/// Level-sensed input polled from the host once per query.
pub trait InputSource {
    /// Operation keys currently held on any controller.
    fn operation_keys_down(&self) -> OperationKeys;
    /// Mouse buttons currently held.
    fn mouse_buttons_down(&self) -> MouseButtons;
    /// Pointer position in viewport coordinates (y-down, origin top-left).
    fn pointer_position(&self) -> Point;
}

/// Remembers the last sample of every logical input.
///
/// A new tracker treats every input as held, so a key that is already down
/// when a dialog opens must be released before it counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeTracker {
    keys: OperationKeys,
    mouse: MouseButtons,
}

impl Default for EdgeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeTracker {
    /// A tracker with every input marked as held.
    pub fn new() -> Self {
        Self {
            keys: OperationKeys::all(),
            mouse: MouseButtons::all(),
        }
    }

    /// Sample `input` and report whether it went down since its last sample.
    pub fn is_just_pressed<I: InputSource + ?Sized>(
        &mut self,
        input: LogicalInput,
        source: &I,
    ) -> bool {
        match input.channel() {
            Channel::Key(key) => {
                let down = source.operation_keys_down().contains(key);
                let was = self.keys.contains(key);
                self.keys.set(key, down);
                down && !was
            }
            Channel::Mouse(button) => {
                let down = source.mouse_buttons_down().contains(button);
                let was = self.mouse.contains(button);
                self.mouse.set(button, down);
                down && !was
            }
        }
    }
}
