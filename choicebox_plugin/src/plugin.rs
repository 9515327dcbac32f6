// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plugin state and the two host entry points.

use choicebox_dialog::{
    Background, BuildError, ChoiceEntry, Dialog, DialogConfig, DialogSurface, Update,
    build_choices,
};

use crate::condition::choice_selected;
use crate::host::{Host, Requester, resolve_font};
use crate::params::{BackgroundKind, CommandSettings, ParameterList, PluginSettings, param_id};
use crate::publisher::{NO_CHOICE, SelectionPublisher, result_code};

/// Command index of Show Choices.
pub const SHOW_CHOICES_COMMAND: usize = 0;

/// Condition index of Choice Selected.
pub const CHOICE_SELECTED_CONDITION: usize = 0;

/// What the host should do with the requester's command list after a call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CommandBehavior {
    /// Call the same command again next frame.
    Block,
    /// Move on to the next command.
    Continue,
}

/// Reasons a dialog does not open.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The current scene has no UI layer.
    #[error("no UI layer to show choices on")]
    NoUiLayer,
    /// The first choice has no font of its own and the dialog font is unavailable.
    #[error("font {0} is unavailable")]
    MissingFont(i32),
    /// An image background was requested but its image is unavailable.
    #[error("background image {0} is unavailable")]
    MissingBackgroundImage(i32),
    /// No slot produced a choice.
    #[error(transparent)]
    Build(#[from] BuildError),
}

#[derive(Debug)]
struct ActiveDialog<S> {
    dialog: Dialog<S>,
    requester: Requester,
    variable_id: i32,
}

/// Process-wide plugin state: settings, results, and at most one open dialog.
#[derive(Debug)]
pub struct ChoicesPlugin<S> {
    settings: PluginSettings,
    publisher: SelectionPublisher,
    active: Option<ActiveDialog<S>>,
}

impl<S> Default for ChoicesPlugin<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ChoicesPlugin<S> {
    /// Plugin state at load, with schema-default settings.
    pub fn new() -> Self {
        Self {
            settings: PluginSettings::default(),
            publisher: SelectionPublisher::new(),
            active: None,
        }
    }

    /// Replace the plugin-level settings.
    pub fn set_plugin_parameters(&mut self, params: &ParameterList) {
        self.settings = PluginSettings::from_parameters(params);
        log::debug!("plugin settings: {:?}", self.settings);
    }

    /// Current plugin-level settings.
    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Whether a dialog is open.
    pub fn is_showing(&self) -> bool {
        self.active.is_some()
    }

    /// Requester of the open dialog.
    pub fn active_requester(&self) -> Option<Requester> {
        self.active.as_ref().map(|a| a.requester)
    }

    /// Last published result for `requester`.
    pub fn result(&self, requester: Requester) -> i32 {
        self.publisher.lookup(requester)
    }

    /// Evaluate a link condition for `requester`.
    pub fn evaluate_condition(
        &self,
        condition_index: usize,
        params: &ParameterList,
        requester: Requester,
    ) -> bool {
        if condition_index != CHOICE_SELECTED_CONDITION {
            log::warn!("unknown link condition {condition_index}");
            return false;
        }
        let target = params.int(param_id::CONDITION_TARGET).unwrap_or(1);
        choice_selected(self.publisher.lookup(requester), target)
    }
}

impl<S: DialogSurface> ChoicesPlugin<S> {
    /// Run a command for `requester` this frame.
    ///
    /// The first call opens a dialog and the following calls drive it until it
    /// closes. A call from another requester while a dialog is open closes that
    /// dialog at once, publishes its result, and opens a new one.
    pub fn execute_command<H: Host<Surface = S>>(
        &mut self,
        host: &mut H,
        command_index: usize,
        params: &ParameterList,
        requester: Requester,
    ) -> CommandBehavior {
        if command_index != SHOW_CHOICES_COMMAND {
            log::warn!("unknown action command {command_index}");
            return CommandBehavior::Continue;
        }

        if let Some(mut active) = self.active.take() {
            if active.requester == requester {
                return match active.dialog.update(&*host) {
                    Update::Block => {
                        self.active = Some(active);
                        CommandBehavior::Block
                    }
                    Update::Finished(outcome) => {
                        self.publisher.publish(
                            host,
                            requester,
                            result_code(outcome),
                            active.variable_id,
                        );
                        CommandBehavior::Continue
                    }
                };
            }
            log::debug!(
                "{requester:?} preempts the dialog of {:?}",
                active.requester
            );
            let outcome = active.dialog.force_close();
            self.publisher.publish(
                host,
                active.requester,
                result_code(outcome),
                active.variable_id,
            );
        }

        match self.open(host, params, requester) {
            Ok(active) => {
                self.publisher
                    .publish(host, requester, NO_CHOICE, active.variable_id);
                self.active = Some(active);
                CommandBehavior::Block
            }
            Err(err) => {
                log::warn!("choices for {requester:?} not shown: {err}");
                CommandBehavior::Continue
            }
        }
    }

    /// Plugin unload: detach any open dialog without publishing a result.
    pub fn shutdown(&mut self) {
        if let Some(mut active) = self.active.take() {
            log::debug!("detaching the dialog of {:?} at shutdown", active.requester);
            active.dialog.force_close();
        }
    }

    fn open<H: Host<Surface = S>>(
        &self,
        host: &mut H,
        params: &ParameterList,
        requester: Requester,
    ) -> Result<ActiveDialog<S>, OpenError> {
        let command = CommandSettings::resolve(params, &self.settings);
        let settings = command.dialog;
        let default_font = (settings.font_id >= 0)
            .then(|| resolve_font(&*host, settings.font_id))
            .flatten();

        let locale = host.locale().to_owned();
        let mut entries = Vec::new();
        for (slot, source) in command.choices.iter().enumerate() {
            let record = (source.text_id >= 0)
                .then(|| host.text(source.text_id, &locale))
                .flatten();
            let text = source
                .inline
                .clone()
                .or_else(|| record.as_ref().map(|r| r.text.clone()))
                .unwrap_or_default();
            if text.is_empty() {
                break;
            }
            let font = record
                .as_ref()
                .and_then(|r| r.font_id)
                .filter(|id| *id >= 0)
                .and_then(|id| resolve_font(&*host, id));
            if font.is_none() && default_font.is_none() {
                if slot == 0 {
                    return Err(OpenError::MissingFont(settings.font_id));
                }
                break;
            }
            entries.push(ChoiceEntry {
                text,
                font,
                letter_spacing: record.map_or(0.0, |r| r.letter_spacing),
            });
        }

        let choices = build_choices(&entries, default_font.as_ref(), &*host)?;

        let background = match settings.background {
            BackgroundKind::Frame => Background::Frame {
                fill: settings.background_color,
                border: settings.border_color,
            },
            BackgroundKind::Image => {
                let image = host
                    .image(settings.image_id)
                    .ok_or(OpenError::MissingBackgroundImage(settings.image_id))?;
                Background::Image(image.texture)
            }
            BackgroundKind::None => Background::None,
        };
        let config = DialogConfig {
            background,
            highlight: settings.highlight_color,
            horizontal: settings.horizontal,
            vertical: settings.vertical,
            cancellable: settings.cancellable,
        };

        let viewport = host.viewport();
        let surface = host.attach_dialog_surface().ok_or(OpenError::NoUiLayer)?;
        log::debug!("opening {} choices for {requester:?}", choices.len());
        Ok(ActiveDialog {
            dialog: Dialog::new(&choices, config, viewport, surface),
            requester,
            variable_id: command.variable_id,
        })
    }
}
