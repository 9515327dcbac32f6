// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted run of the Show Choices command.
//!
//! A fake host feeds one input per frame from a script and prints what the
//! dialog draws. Set `RUST_LOG=debug` to see the plugin's own logging.
//!
//! Run:
//! - `cargo run -p choicebox_demos --example show_choices`

use std::collections::HashMap;

use choicebox_dialog::{Background, DialogSurface, InputSource, MouseButtons, OperationKeys, Rgba};
use choicebox_markup::{GlyphPlacement, LabelMeasure, OutlineFont, TextureHandle};
use choicebox_plugin::{
    CHOICE_SELECTED_CONDITION, ChoicesPlugin, CommandBehavior, FontRecord, Host, ImageRecord,
    ParameterList, Requester, SHOW_CHOICES_COMMAND, TextRecord,
};
use kurbo::{Point, Rect, Size};

struct PrintSurface;

impl DialogSurface for PrintSurface {
    fn set_position(&mut self, origin: Point) {
        println!("  window at ({}, {})", origin.x, origin.y);
    }
    fn draw_background(&mut self, _: &Background, rect: Rect) {
        println!("  frame {}x{}", rect.width(), rect.height());
    }
    fn clear_background(&mut self) {
        println!("  frame cleared");
    }
    fn set_background_opacity(&mut self, _: u8) {}
    fn add_glyphs(&mut self, glyphs: &[GlyphPlacement]) {
        let text: String = glyphs.iter().map(|g| g.character).collect();
        println!("  text {text:?}");
    }
    fn set_text_visible(&mut self, visible: bool) {
        println!("  text visible: {visible}");
    }
    fn set_highlight(&mut self, rect: Rect, _: Rgba) {
        println!("  highlight at y={}", rect.y0);
    }
    fn set_highlight_visible(&mut self, _: bool) {}
    fn set_highlight_opacity(&mut self, _: u8) {}
    fn detach(&mut self) {
        println!("  detached");
    }
}

struct ScriptedHost {
    texts: HashMap<i32, &'static str>,
    keys: OperationKeys,
    variables: HashMap<(i32, i32), f64>,
}

impl InputSource for ScriptedHost {
    fn operation_keys_down(&self) -> OperationKeys {
        self.keys
    }
    fn mouse_buttons_down(&self) -> MouseButtons {
        MouseButtons::empty()
    }
    fn pointer_position(&self) -> Point {
        Point::new(-1.0, -1.0)
    }
}

impl LabelMeasure for ScriptedHost {
    fn label_width(&self, _: &OutlineFont, ch: char, point_size: f64) -> f64 {
        if ch.is_ascii() { point_size * 0.55 } else { point_size }
    }
}

impl Host for ScriptedHost {
    type Surface = PrintSurface;

    fn font(&self, id: i32) -> Option<FontRecord> {
        (id == 1).then(|| FontRecord::Outline {
            font_name: "mplus-1m-regular".into(),
            font_size: 20,
            antialias_disabled: false,
            alias_threshold: 0,
        })
    }
    fn image(&self, _: i32) -> Option<ImageRecord> {
        Some(ImageRecord {
            texture: TextureHandle(0),
            width: 0,
            height: 0,
        })
    }
    fn text(&self, id: i32, _: &str) -> Option<TextRecord> {
        self.texts.get(&id).map(|text| TextRecord {
            text: (*text).to_owned(),
            font_id: None,
            letter_spacing: 0.0,
        })
    }
    fn locale(&self) -> &str {
        "en_US"
    }
    fn viewport(&self) -> Size {
        Size::new(1280.0, 720.0)
    }
    fn set_instance_variable(&mut self, instance_id: i32, variable_id: i32, value: f64) {
        println!("  variable {variable_id} of instance {instance_id} = {value}");
        self.variables.insert((instance_id, variable_id), value);
    }
    fn attach_dialog_surface(&mut self) -> Option<PrintSurface> {
        Some(PrintSurface)
    }
}

fn main() -> Result<(), choicebox_plugin::ParamError> {
    env_logger::init();

    let mut host = ScriptedHost {
        texts: HashMap::from([
            (1, "\\C[#ff0]Fight"),
            (2, "Sneak past\n\\S[-6]\\C[160,160,160](costs a turn)"),
            (3, "Run"),
        ]),
        keys: OperationKeys::empty(),
        variables: HashMap::new(),
    };
    let mut plugin = ChoicesPlugin::new();
    plugin.set_plugin_parameters(&ParameterList::from_json(
        r#"[{"id": 1, "value": 1}, {"id": 6, "value": 1}, {"id": 9, "value": 1}]"#,
    )?);

    let command = ParameterList::from_json(
        r#"[{"id": 101, "value": 1}, {"id": 102, "value": 2},
            {"id": 103, "value": 3}, {"id": 10, "value": 4}]"#,
    )?;
    let requester = Requester::new(7, 42);

    let script = [
        OperationKeys::empty(),
        OperationKeys::DOWN,
        OperationKeys::empty(),
        OperationKeys::OK,
    ];
    let mut frame = 0_usize;
    loop {
        host.keys = script
            .get(frame.saturating_sub(6))
            .copied()
            .unwrap_or_else(OperationKeys::empty);
        println!("frame {frame} keys {:?}", host.keys);
        let behavior =
            plugin.execute_command(&mut host, SHOW_CHOICES_COMMAND, &command, requester);
        frame += 1;
        if behavior == CommandBehavior::Continue || frame > 60 {
            break;
        }
    }

    let second: ParameterList = [(1, serde_json::json!(2))].into_iter().collect();
    println!(
        "result {}, picked the second choice: {}, variable = {:?}",
        plugin.result(requester),
        plugin.evaluate_condition(CHOICE_SELECTED_CONDITION, &second, requester),
        host.variables.get(&(42, 4)),
    );
    plugin.shutdown();
    Ok(())
}
