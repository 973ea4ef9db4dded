//! # Dispatch Benchmark
//!
//! Measures one frame of the widget engine:
//! 1. Routing pointer traffic through a crowded screen
//! 2. Painting that screen into a software image
//!
//! Hover-only frames must stay cheap: nothing is repainted when no
//! widget changed.

#![allow(missing_docs)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ember_core::{BlockFont, Color, Decoration, Image, Point, Size, Theme};
use ember_ui::{App, Button, ButtonOptions, MouseButton, Placement, RawEvent, Window};

fn theme() -> Theme {
    let tile = Arc::new(Image::filled(Size::new(3, 3), Color::rgb(80, 80, 96)));
    let mut theme = Theme::plain(Arc::new(BlockFont::new(10)), 10);
    theme.button.default = Decoration::Image(Arc::clone(&tile));
    theme.button.hover = Decoration::Image(Arc::clone(&tile));
    theme.button.click = Decoration::Image(Arc::clone(&tile));
    theme.window.border = Decoration::Image(tile);
    theme.window_bar = theme.button.clone();
    theme
}

/// A grid of `count` buttons plus a window holding a few more.
fn screen(count: i32) -> App {
    let theme = theme();
    let mut app = App::new(Size::new(1280, 720), theme.clone());
    for i in 0..count {
        let placement = Placement::at((i % 16) * 72, 40 + (i / 16) * 24);
        let name = format!("b{i}");
        if let Ok(button) = Button::new(&theme, placement, name.as_str(), name.as_str(), ButtonOptions::default()) {
            app.add(Box::new(button));
        }
    }
    if let Ok(mut window) = Window::new(&theme, Placement::centered(), "w", Size::new(300, 200), "Window", None) {
        for i in 0..8 {
            let placement = Placement::at(8, 8 + i * 22);
            if let Ok(button) = Button::new(&theme, placement, "w", "inside", ButtonOptions::default()) {
                window.add(Box::new(button));
            }
        }
        app.add(Box::new(window));
    }
    app
}

fn sweep() -> Vec<RawEvent> {
    (0..64)
        .map(|i| {
            let pos = Point::new(i * 20, 40 + (i % 12) * 24);
            RawEvent::PointerMove { delta: Point::new(20, 0), pos }
        })
        .collect()
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for count in [16, 64, 256] {
        let mut app = screen(count);
        let events = sweep();
        group.bench_with_input(BenchmarkId::new("pointer_sweep", count), &count, |b, _| {
            b.iter(|| black_box(app.dispatch(events.iter().cloned())));
        });

        let mut app = screen(count);
        let at = Point::new(4, 44);
        group.bench_with_input(BenchmarkId::new("click", count), &count, |b, _| {
            b.iter(|| {
                black_box(app.dispatch([
                    RawEvent::PointerDown { button: MouseButton::Left, pos: at },
                    RawEvent::PointerUp { button: MouseButton::Left, pos: at },
                ]))
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for count in [16, 64, 256] {
        let mut app = screen(count);
        let mut frame = Image::new(app.size());
        group.bench_with_input(BenchmarkId::new("full_repaint", count), &count, |b, _| {
            b.iter(|| {
                app.force_update();
                black_box(app.render(&mut frame))
            });
        });

        let mut app = screen(count);
        let mut frame = Image::new(app.size());
        app.render(&mut frame);
        group.bench_with_input(BenchmarkId::new("clean_frame", count), &count, |b, _| {
            b.iter(|| black_box(app.render(&mut frame)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_render);
criterion_main!(benches);
