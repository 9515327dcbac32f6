// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=choicebox_plugin --heading-base-level=0

//! Choicebox Plugin: the Show Choices command and the Choice Selected link condition.
//!
//! ## Overview
//!
//! The host runtime owns assets, input, and the scene. It drives the plugin through
//! [`ChoicesPlugin`]:
//!
//! - [`ChoicesPlugin::set_plugin_parameters`] once at load, with the plugin-level
//!   [`ParameterList`];
//! - [`ChoicesPlugin::execute_command`] every frame an object instance runs Show
//!   Choices, until it returns [`CommandBehavior::Continue`];
//! - [`ChoicesPlugin::evaluate_condition`] when a link condition is checked;
//! - [`ChoicesPlugin::shutdown`] at unload.
//!
//! Everything the plugin reads or writes on the host side goes through the
//! [`Host`] trait.
//!
//! ## Results
//!
//! Each requester has one published result: the chosen index, [`CANCELLED`], or
//! [`NO_CHOICE`] while a dialog is open. When the command names a variable, the
//! result plus one is written into it, so `0` means cancelled and `-1` means
//! still choosing.
//!
//! Only one dialog is shown at a time. A second requester running the command
//! closes the open dialog, publishes its result, and shows its own.

mod condition;
mod host;
mod params;
mod plugin;
mod publisher;

pub use condition::{TARGET_CANCELLED, choice_selected};
pub use host::{FontRecord, Host, ImageRecord, Requester, TextRecord, resolve_font};
pub use params::{
    BackgroundKind, ChoiceSource, CommandSettings, FALLBACK_BORDER, FALLBACK_FILL,
    FALLBACK_HIGHLIGHT, ParamError, ParameterList, ParameterValue, PluginSettings, param_id,
    parse_color,
};
pub use plugin::{
    CHOICE_SELECTED_CONDITION, ChoicesPlugin, CommandBehavior, OpenError, SHOW_CHOICES_COMMAND,
};
pub use publisher::{CANCELLED, NO_CHOICE, SelectionPublisher, result_code};
