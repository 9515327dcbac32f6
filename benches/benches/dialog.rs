// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use choicebox_dialog::{
    Background, ChoiceEntry, Dialog, DialogConfig, DialogSurface, HorizontalAnchor, InputSource,
    MouseButtons, OperationKeys, Rgba, Update, VerticalAnchor, build_choices,
};
use choicebox_markup::{FontDescriptor, GlyphPlacement, OutlineFont};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};

struct Null;

impl DialogSurface for Null {
    fn set_position(&mut self, _: Point) {}
    fn draw_background(&mut self, _: &Background, _: Rect) {}
    fn clear_background(&mut self) {}
    fn set_background_opacity(&mut self, _: u8) {}
    fn add_glyphs(&mut self, glyphs: &[GlyphPlacement]) {
        black_box(glyphs);
    }
    fn set_text_visible(&mut self, _: bool) {}
    fn set_highlight(&mut self, _: Rect, _: Rgba) {}
    fn set_highlight_visible(&mut self, _: bool) {}
    fn set_highlight_opacity(&mut self, _: u8) {}
    fn detach(&mut self) {}
}

struct Pointer(Point);

impl InputSource for Pointer {
    fn operation_keys_down(&self) -> OperationKeys {
        OperationKeys::empty()
    }
    fn mouse_buttons_down(&self) -> MouseButtons {
        MouseButtons::empty()
    }
    fn pointer_position(&self) -> Point {
        self.0
    }
}

fn half_em(_: &OutlineFont, _: char, size: f64) -> f64 {
    size / 2.0
}

fn entries() -> Vec<ChoiceEntry> {
    [
        "\\C[#ff0]Attack",
        "Defend\n\\S[-6](halves damage)",
        "\\S[+8]Magic",
        "Items",
        "Talk",
        "\\C[128,128,128]Run away",
    ]
    .into_iter()
    .map(ChoiceEntry::new)
    .collect()
}

fn config() -> DialogConfig {
    DialogConfig {
        background: Background::Frame {
            fill: Rgba::new(0, 0, 0, 160),
            border: Rgba::WHITE,
        },
        highlight: Rgba::new(0, 255, 255, 128),
        horizontal: HorizontalAnchor::Center,
        vertical: VerticalAnchor::Bottom,
        cancellable: true,
    }
}

fn bench_dialog(c: &mut Criterion) {
    let font = FontDescriptor::Outline(OutlineFont {
        filename: "fonts/body.ttf".into(),
        base_size: 24,
        antialias_threshold: None,
    });
    let entries = entries();
    let viewport = Size::new(1280.0, 720.0);

    let mut group = c.benchmark_group("dialog");
    group.bench_function("build_choices_six_slots", |b| {
        b.iter(|| black_box(build_choices(black_box(&entries), Some(&font), &half_em)));
    });

    let Ok(choices) = build_choices(&entries, Some(&font), &half_em) else {
        unreachable!("six non-empty choices");
    };
    group.bench_function("open_and_hover_frames", |b| {
        b.iter_batched(
            || Dialog::new(&choices, config(), viewport, Null),
            |mut dialog| {
                let origin = dialog.geometry().origin();
                let size = dialog.geometry().size();
                for frame in 0..120_u32 {
                    let y = origin.y + f64::from(frame % 60) / 60.0 * size.height;
                    let pointer = Pointer(Point::new(origin.x + size.width / 2.0, y));
                    if let Update::Finished(outcome) = dialog.update(&pointer) {
                        black_box(outcome);
                    }
                }
                black_box(dialog.current_index());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_dialog);
criterion_main!(benches);
