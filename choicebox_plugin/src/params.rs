// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parameter decoding and default layering.
//!
//! ## Layers
//!
//! Per-command parameters are resolved against the plugin-level parameters,
//! which are resolved against built-in defaults:
//!
//! - A per-command value of "inherit", or a missing or malformed value, takes
//!   the plugin-level value.
//! - A missing plugin-level value takes its schema default ([`PluginSettings::default`]).
//!   A malformed plugin-level color takes a hard-coded fallback.
//!
//! ## Wire format
//!
//! The host sends parameters as a JSON array of `{ "id": <int>, "value": <json> }`
//! records. Integers may arrive as numbers or numeric strings.

use choicebox_dialog::{HorizontalAnchor, MAX_CHOICES, Rgba, VerticalAnchor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameter IDs. Plugin-level parameters use `BACKGROUND..=CANCEL`.
pub mod param_id {
    /// Background style.
    pub const BACKGROUND: i32 = 1;
    /// Background image ID.
    pub const BACKGROUND_IMAGE: i32 = 2;
    /// Frame fill color string.
    pub const BACKGROUND_COLOR: i32 = 3;
    /// Frame border color string.
    pub const BORDER_COLOR: i32 = 4;
    /// Highlight color string.
    pub const HIGHLIGHT_COLOR: i32 = 5;
    /// Font ID.
    pub const FONT: i32 = 6;
    /// Horizontal position.
    pub const HORIZONTAL: i32 = 7;
    /// Vertical position.
    pub const VERTICAL: i32 = 8;
    /// Cancellable flag.
    pub const CANCEL: i32 = 9;
    /// Destination variable ID (per command only).
    pub const VARIABLE: i32 = 10;

    /// Text ID of choice slot `n` (1-based).
    pub const fn choice_text(n: i32) -> i32 {
        100 + n
    }

    /// Inline text of choice slot `n` (1-based).
    pub const fn choice_inline(n: i32) -> i32 {
        1000 + n
    }

    /// Link condition target: 1..=6 for a choice, 7 for cancelled.
    pub const CONDITION_TARGET: i32 = 1;
}

const BACKGROUND_FRAME: i64 = 1;
const BACKGROUND_IMAGE: i64 = 2;
const BACKGROUND_NONE: i64 = 3;

const POSITION_START: i64 = 1;
const POSITION_CENTER: i64 = 2;
const POSITION_END: i64 = 3;

const CANCEL_ENABLED: i64 = 1;
const CANCEL_DISABLED: i64 = 2;

/// Fill used when a configured fill color is malformed.
pub const FALLBACK_FILL: Rgba = Rgba::new(0, 0, 0, 128);
/// Border used when a configured border color is malformed.
pub const FALLBACK_BORDER: Rgba = Rgba::WHITE;
/// Highlight used when a configured highlight color is malformed.
pub const FALLBACK_HIGHLIGHT: Rgba = Rgba::new(0, 255, 255, 128);

/// Reasons a parameter payload cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// Not a JSON array of `{ id, value }` records.
    #[error("invalid parameter payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// One parameter record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Parameter ID.
    pub id: i32,
    /// Raw value.
    pub value: Value,
}

/// An ordered list of parameter records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterList(Vec<ParameterValue>);

impl FromIterator<(i32, Value)> for ParameterList {
    fn from_iter<T: IntoIterator<Item = (i32, Value)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(id, value)| ParameterValue { id, value })
                .collect(),
        )
    }
}

impl ParameterList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a host payload.
    ///
    /// ```
    /// use choicebox_plugin::ParameterList;
    ///
    /// let params = ParameterList::from_json(r#"[{"id": 6, "value": 3}, {"id": 3, "value": "1,2,3"}]"#)
    ///     .unwrap();
    /// assert_eq!(params.int(6), Some(3));
    /// assert_eq!(params.string(3), Some("1,2,3"));
    /// assert!(ParameterList::from_json("{}").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ParamError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a record.
    pub fn push(&mut self, id: i32, value: impl Into<Value>) {
        self.0.push(ParameterValue {
            id,
            value: value.into(),
        });
    }

    /// Raw value of the first record with `id`.
    pub fn get(&self, id: i32) -> Option<&Value> {
        self.0.iter().find(|p| p.id == id).map(|p| &p.value)
    }

    /// Integer value of `id`; numbers are truncated and numeric strings parsed.
    pub fn int(&self, id: i32) -> Option<i64> {
        match self.get(id)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                let f = n.as_f64().filter(|f| f.is_finite())?;
                #[allow(clippy::cast_possible_truncation, reason = "saturating float to int")]
                let v = f.trunc() as i64;
                Some(v)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Integer value of `id` narrowed to `i32`.
    pub fn id_value(&self, id: i32) -> Option<i32> {
        self.int(id).and_then(|v| i32::try_from(v).ok())
    }

    /// String value of `id`.
    pub fn string(&self, id: i32) -> Option<&str> {
        self.get(id)?.as_str()
    }
}

/// Parse `"r,g,b"` or `"r,g,b,a"` with every component an integer in `0..=255`.
///
/// Missing alpha is opaque. Anything else is rejected.
pub fn parse_color(text: &str) -> Option<Rgba> {
    let mut channels = [0_u8, 0, 0, u8::MAX];
    let mut count = 0;
    for part in text.split(',') {
        let slot = channels.get_mut(count)?;
        *slot = part.trim().parse().ok()?;
        count += 1;
    }
    (count >= 3).then(|| Rgba::new(channels[0], channels[1], channels[2], channels[3]))
}

/// Which background to draw, before colors and images are attached.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BackgroundKind {
    /// Growing bordered frame.
    Frame,
    /// Fading image.
    Image,
    /// No background.
    None,
}

impl BackgroundKind {
    fn decode(code: i64) -> Option<Self> {
        match code {
            BACKGROUND_FRAME => Some(Self::Frame),
            BACKGROUND_IMAGE => Some(Self::Image),
            BACKGROUND_NONE => Some(Self::None),
            _ => None,
        }
    }
}

fn horizontal(code: i64) -> Option<HorizontalAnchor> {
    match code {
        POSITION_START => Some(HorizontalAnchor::Left),
        POSITION_CENTER => Some(HorizontalAnchor::Center),
        POSITION_END => Some(HorizontalAnchor::Right),
        _ => None,
    }
}

fn vertical(code: i64) -> Option<VerticalAnchor> {
    match code {
        POSITION_START => Some(VerticalAnchor::Top),
        POSITION_CENTER => Some(VerticalAnchor::Center),
        POSITION_END => Some(VerticalAnchor::Bottom),
        _ => None,
    }
}

fn cancellable(code: i64) -> Option<bool> {
    match code {
        CANCEL_ENABLED => Some(true),
        CANCEL_DISABLED => Some(false),
        _ => None,
    }
}

/// Settings shared by every dialog.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PluginSettings {
    /// Background style.
    pub background: BackgroundKind,
    /// Background image ID, or negative for none.
    pub image_id: i32,
    /// Frame fill.
    pub background_color: Rgba,
    /// Frame border.
    pub border_color: Rgba,
    /// Highlight fill.
    pub highlight_color: Rgba,
    /// Font ID, or negative for none.
    pub font_id: i32,
    /// Horizontal placement.
    pub horizontal: HorizontalAnchor,
    /// Vertical placement.
    pub vertical: VerticalAnchor,
    /// Whether dialogs can be cancelled.
    pub cancellable: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            background: BackgroundKind::None,
            image_id: -1,
            background_color: Rgba::new(0, 0, 0, 255),
            border_color: Rgba::WHITE,
            highlight_color: Rgba::WHITE,
            font_id: -1,
            horizontal: HorizontalAnchor::Center,
            vertical: VerticalAnchor::Center,
            cancellable: false,
        }
    }
}

impl PluginSettings {
    /// Decode plugin-level parameters.
    pub fn from_parameters(params: &ParameterList) -> Self {
        let defaults = Self::default();
        let color = |id: i32, default: Rgba, fallback: Rgba| match params.string(id) {
            None => default,
            Some(text) => parse_color(text).unwrap_or_else(|| {
                log::debug!("plugin color {id} {text:?} is malformed");
                fallback
            }),
        };
        Self {
            background: params
                .int(param_id::BACKGROUND)
                .and_then(BackgroundKind::decode)
                .unwrap_or(defaults.background),
            image_id: params
                .id_value(param_id::BACKGROUND_IMAGE)
                .unwrap_or(defaults.image_id),
            background_color: color(
                param_id::BACKGROUND_COLOR,
                defaults.background_color,
                FALLBACK_FILL,
            ),
            border_color: color(param_id::BORDER_COLOR, defaults.border_color, FALLBACK_BORDER),
            highlight_color: color(
                param_id::HIGHLIGHT_COLOR,
                defaults.highlight_color,
                FALLBACK_HIGHLIGHT,
            ),
            font_id: params.id_value(param_id::FONT).unwrap_or(defaults.font_id),
            horizontal: params
                .int(param_id::HORIZONTAL)
                .and_then(horizontal)
                .unwrap_or(defaults.horizontal),
            vertical: params
                .int(param_id::VERTICAL)
                .and_then(vertical)
                .unwrap_or(defaults.vertical),
            cancellable: params
                .int(param_id::CANCEL)
                .and_then(cancellable)
                .unwrap_or(defaults.cancellable),
        }
    }
}

/// Where one choice slot's text comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChoiceSource {
    /// Host text ID, or negative for none.
    pub text_id: i32,
    /// Inline text; replaces the host text's string when non-empty.
    pub inline: Option<String>,
}

/// Fully resolved settings of one Show Choices command.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandSettings {
    /// Shared settings with per-command overrides applied.
    pub dialog: PluginSettings,
    /// Variable that receives the 1-based result, or negative for none.
    pub variable_id: i32,
    /// Choice slots in order.
    pub choices: [ChoiceSource; MAX_CHOICES],
}

impl CommandSettings {
    /// Resolve per-command `params` against `plugin`.
    pub fn resolve(params: &ParameterList, plugin: &PluginSettings) -> Self {
        let non_negative = |id: i32| params.id_value(id).filter(|v| *v >= 0);
        let color = |id: i32, inherited: Rgba| {
            params
                .string(id)
                .and_then(parse_color)
                .unwrap_or(inherited)
        };
        let dialog = PluginSettings {
            background: params
                .int(param_id::BACKGROUND)
                .and_then(BackgroundKind::decode)
                .unwrap_or(plugin.background),
            image_id: non_negative(param_id::BACKGROUND_IMAGE).unwrap_or(plugin.image_id),
            background_color: color(param_id::BACKGROUND_COLOR, plugin.background_color),
            border_color: color(param_id::BORDER_COLOR, plugin.border_color),
            highlight_color: color(param_id::HIGHLIGHT_COLOR, plugin.highlight_color),
            font_id: non_negative(param_id::FONT).unwrap_or(plugin.font_id),
            horizontal: params
                .int(param_id::HORIZONTAL)
                .and_then(horizontal)
                .unwrap_or(plugin.horizontal),
            vertical: params
                .int(param_id::VERTICAL)
                .and_then(vertical)
                .unwrap_or(plugin.vertical),
            cancellable: params
                .int(param_id::CANCEL)
                .and_then(cancellable)
                .unwrap_or(plugin.cancellable),
        };
        let choices = core::array::from_fn(|slot| {
            let n = i32::try_from(slot + 1).unwrap_or(i32::MAX);
            ChoiceSource {
                text_id: params.id_value(param_id::choice_text(n)).unwrap_or(-1),
                inline: params
                    .string(param_id::choice_inline(n))
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            }
        });
        Self {
            dialog,
            variable_id: params.id_value(param_id::VARIABLE).unwrap_or(-1),
            choices,
        }
    }
}
