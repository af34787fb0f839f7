// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_stage::config::EditorConfig;
use image_stage::editor::ImageEditor;
use std::hint::black_box; // Use std::hint::black_box
use tiny_skia::Pixmap;

fn checker_pixmap(width: u32, height: u32) -> Pixmap {
    let mut pixmap = Pixmap::new(width, height).expect("pixmap allocation");
    let light = tiny_skia::ColorU8::from_rgba(220, 220, 220, 255).premultiply();
    let dark = tiny_skia::ColorU8::from_rgba(60, 60, 60, 255).premultiply();
    for y in 0..height {
        for x in 0..width {
            let index = (y * width + x) as usize;
            pixmap.pixels_mut()[index] = if (x / 8 + y / 8) % 2 == 0 { light } else { dark };
        }
    }
    pixmap
}

fn loaded_editor(image_count: u64) -> ImageEditor {
    let mut editor = ImageEditor::new(EditorConfig {
        width: 400.0,
        height: 400.0,
        ..EditorConfig::default()
    });
    for i in 0..image_count {
        let id = editor.add_image(format!("img-{i}.png"), false);
        editor.complete_load(id, checker_pixmap(320, 240));
        editor.select_image(id);
        editor.move_image(i as f32 * 7.0, i as f32 * 3.0);
        editor.rotate_image(i as f32 * 15.0);
        editor.scale_image(0.5 + i as f32 * 0.2);
    }
    editor
}

fn compose_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    let single = loaded_editor(1);
    group.bench_function("merge_single_image", |b| {
        b.iter(|| {
            // Use black_box to prevent the compiler from optimizing away the call
            let _ = black_box(single.merge_image().unwrap());
        });
    });

    let stack = loaded_editor(8);
    group.bench_function("merge_eight_image_stack", |b| {
        b.iter(|| {
            let _ = black_box(stack.merge_image().unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, compose_benchmark);
criterion_main!(benches);
