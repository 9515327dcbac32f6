// Copyright 2025 the Choicebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use choicebox_markup::{
    BitmapFont, Cursor, FontDescriptor, LetterLayout, OutlineFont, TextureHandle,
};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ\nabcdefghijklmnopqrstuvwxyz\n0123456789 !?.,";

fn bitmap_font() -> FontDescriptor {
    let font = BitmapFont::new(ALPHABET, TextureHandle(1), 416, 48, false, 8, 16);
    FontDescriptor::Bitmap(font.unwrap_or_else(|| unreachable!("grid fits the texture")))
}

fn outline_font() -> FontDescriptor {
    FontDescriptor::Outline(OutlineFont {
        filename: "fonts/body.ttf".into(),
        base_size: 24,
        antialias_threshold: None,
    })
}

fn half_em(_: &OutlineFont, _: char, size: f64) -> f64 {
    size / 2.0
}

fn plain_line(len: usize) -> String {
    "Choose wisely ".chars().cycle().take(len).collect()
}

fn tagged_line(len: usize) -> String {
    let mut out = String::new();
    let mut i = 0;
    while out.chars().count() < len {
        match i % 3 {
            0 => out.push_str("\\C[#f80]warm "),
            1 => out.push_str("\\S[+4]big\\S[] "),
            _ => out.push_str("\\C[40,200,255]cool\\C[] "),
        }
        i += 1;
    }
    out
}

fn bench_layout_line(c: &mut Criterion) {
    let bitmap = bitmap_font();
    let outline = outline_font();
    let mut group = c.benchmark_group("layout_line");
    for &len in &[16_usize, 64, 256] {
        let plain = plain_line(len);
        let tagged = tagged_line(len);
        group.throughput(Throughput::Elements(len as u64));
        for (name, font) in [("bitmap", &bitmap), ("outline", &outline)] {
            let layout = LetterLayout::new(font, 1.0, &half_em);
            let start = Cursor::new(0.0, 0.0, font.letter_height());
            group.bench_function(format!("{name}_plain_n{len}"), |b| {
                b.iter(|| black_box(layout.layout_line(black_box(&plain), start)));
            });
            group.bench_function(format!("{name}_tagged_n{len}"), |b| {
                b.iter(|| black_box(layout.layout_line(black_box(&tagged), start)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_layout_line);
criterion_main!(benches);
