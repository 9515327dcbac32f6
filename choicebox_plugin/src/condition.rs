// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The "choice selected" link condition.

use choicebox_dialog::MAX_CHOICES;

use crate::publisher::CANCELLED;

/// Condition target meaning "the dialog was cancelled".
pub const TARGET_CANCELLED: i64 = 7;

/// Whether `result` matches `target`: 1..=6 for a 1-based choice, or
/// [`TARGET_CANCELLED`]. Any other target never matches.
pub fn choice_selected(result: i32, target: i64) -> bool {
    match target {
        TARGET_CANCELLED => result == CANCELLED,
        1..=6 => i64::from(result) == target - 1,
        _ => false,
    }
}

const _: () = assert!(MAX_CHOICES as i64 + 1 == TARGET_CANCELLED);
