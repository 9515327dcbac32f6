// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection results keyed by requester.

use std::collections::HashMap;

use choicebox_dialog::Outcome;

use crate::host::{Host, Requester};

/// Result code of a cancelled dialog.
pub const CANCELLED: i32 = -1;

/// Result code of a requester whose dialog is open or has never run.
pub const NO_CHOICE: i32 = -2;

/// Result code for a dialog outcome: the 0-based index, or [`CANCELLED`].
pub fn result_code(outcome: Outcome) -> i32 {
    match outcome {
        // Indices are bounded by the slot count.
        Outcome::Selected(index) => i32::try_from(index).unwrap_or(i32::MAX),
        Outcome::Cancelled => CANCELLED,
    }
}

/// Last result per requester. Entries never expire.
#[derive(Clone, Debug, Default)]
pub struct SelectionPublisher {
    results: HashMap<Requester, i32>,
}

impl SelectionPublisher {
    /// An empty publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result` for `requester`, replacing any earlier one.
    ///
    /// If `variable_id` is non-negative, `result + 1` is also written to that
    /// variable of the requester's instance, so hosts see 1-based choices,
    /// `0` for cancelled, and `-1` for pending.
    pub fn publish<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        requester: Requester,
        result: i32,
        variable_id: i32,
    ) {
        log::debug!("result {result} for {requester:?}");
        self.results.insert(requester, result);
        if variable_id >= 0 {
            host.set_instance_variable(
                requester.instance_id,
                variable_id,
                f64::from(result) + 1.0,
            );
        }
    }

    /// Last result for `requester`, or [`NO_CHOICE`].
    pub fn lookup(&self, requester: Requester) -> i32 {
        self.results.get(&requester).copied().unwrap_or(NO_CHOICE)
    }
}
