//! Benchmarks for building, showing and painting menus.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fluent_menu::{svg_to_icon, ContextMenu, Env, ItemOptions, Popup, StaticScreens, Theme};
use fluent_menu_core::{Event, FixedWidthMetrics, Key, Point, Rect, RecordingCanvas};

const GEAR: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><circle cx="8" cy="8" r="5" fill="none" stroke="currentColor" stroke-width="2"/></svg>"#;

fn sample_menu(items: usize) -> ContextMenu {
    let mut menu = ContextMenu::new(false);
    for i in 0..items {
        if i % 5 == 4 {
            menu.add_separator();
        } else {
            menu.add_item(
                format!("Action {i}"),
                ItemOptions::default().shortcut(format!("Ctrl+{i}")),
            );
        }
    }
    menu.add_submenu("More", None)
        .add_item("Nested", ItemOptions::default());
    menu
}

fn bench_popup_build(c: &mut Criterion) {
    let menu = sample_menu(20);
    let text = FixedWidthMetrics::default();
    let theme = Theme::light();

    c.bench_function("popup_build_20_rows", |b| {
        b.iter(|| Popup::build(black_box(menu.entries()), theme.clone(), &text))
    });
}

fn bench_menu_paint(c: &mut Criterion) {
    let screens = StaticScreens::single(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    let text = FixedWidthMetrics::default();
    let mut menu = sample_menu(20);
    menu.show_at(Point::new(100.0, 100.0), Env::new(&screens, &text));

    c.bench_function("menu_paint_20_rows", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new();
            menu.paint(&mut canvas);
            black_box(canvas.command_count())
        })
    });
}

fn bench_keyboard_navigation(c: &mut Criterion) {
    let screens = StaticScreens::single(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    let text = FixedWidthMetrics::default();
    let env = Env::new(&screens, &text);
    let mut menu = sample_menu(50);
    menu.show_at(Point::new(100.0, 100.0), env);
    let down = Event::KeyDown { key: Key::Down };

    c.bench_function("menu_key_down_50_rows", |b| {
        b.iter(|| menu.handle_event(black_box(&down), env))
    });
}

fn bench_svg_icon(c: &mut Criterion) {
    c.bench_function("svg_to_icon_16px", |b| {
        b.iter(|| svg_to_icon(black_box(GEAR), 16, None))
    });
}

criterion_group!(
    benches,
    bench_popup_build,
    bench_menu_paint,
    bench_keyboard_navigation,
    bench_svg_icon,
);
criterion_main!(benches);
