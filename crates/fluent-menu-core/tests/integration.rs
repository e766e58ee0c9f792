//! Integration tests for fluent-menu-core.
//!
//! These tests verify the public API works correctly end-to-end.

use fluent_menu_core::{
    Canvas, Color, Constraints, DrawCommand, Event, FixedWidthMetrics, Key, LayoutResult,
    MouseButton, Point, RecordingCanvas, Rect, Size, TextMetrics, TextStyle, Transform2D, Widget,
};

// =============================================================================
// A minimal widget used to drive the trait through a full cycle
// =============================================================================

struct Label {
    text: String,
    width: f32,
    bounds: Rect,
    clicks: u32,
}

impl Label {
    fn new(text: &str, metrics: &dyn TextMetrics) -> Self {
        Self {
            text: text.to_string(),
            width: metrics.text_width(text, 13.0),
            bounds: Rect::default(),
            clicks: 0,
        }
    }
}

impl Widget for Label {
    type Message = u32;

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.width, 20.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(Rect::from_size(self.bounds.size()), Color::WHITE);
        canvas.draw_text(&self.text, Point::ORIGIN, &TextStyle::default());
    }

    fn event(&mut self, event: &Event) -> Option<u32> {
        match event {
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } if self.bounds.hit_test(position) => {
                self.clicks += 1;
                Some(self.clicks)
            }
            _ => None,
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

// =============================================================================
// Widget Cycle Tests
// =============================================================================

#[test]
fn test_measure_layout_paint_cycle() {
    let metrics = FixedWidthMetrics::default();
    let mut label = Label::new("Copy", &metrics);

    let size = label.measure(Constraints::unbounded().with_min_width(180.0));
    assert_eq!(size, Size::new(180.0, 20.0));

    let result = label.layout(Rect::from_origin_size(Point::new(12.0, 16.0), size));
    assert_eq!(result.size, size);

    let mut canvas = RecordingCanvas::new();
    canvas.push_transform(Transform2D::translate(label.bounds().x, label.bounds().y));
    label.paint(&mut canvas);
    canvas.pop_transform();

    assert_eq!(canvas.texts(), vec!["Copy"]);
    match &canvas.commands()[1] {
        DrawCommand::Text { position, .. } => assert_eq!(*position, Point::new(12.0, 16.0)),
        other => panic!("Expected Text command, got {other:?}"),
    }
}

#[test]
fn test_event_messages_are_typed() {
    let metrics = FixedWidthMetrics::default();
    let mut label = Label::new("Paste", &metrics);
    label.layout(Rect::new(0.0, 0.0, 100.0, 20.0));

    let inside = Event::MouseUp {
        position: Point::new(10.0, 10.0),
        button: MouseButton::Left,
    };
    let outside = inside.relative_to(Point::new(-200.0, 0.0));

    assert_eq!(label.event(&inside), Some(1));
    assert_eq!(label.event(&outside), None);
    assert_eq!(label.event(&Event::KeyDown { key: Key::Enter }), None);
    assert_eq!(label.event(&inside), Some(2));
}

// =============================================================================
// Color / Geometry Integration Tests
// =============================================================================

#[test]
fn test_color_hex_roundtrip() {
    let original = Color::rgb8(76, 194, 255);
    let parsed = Color::from_hex(&original.to_hex()).expect("valid hex");
    assert_eq!(parsed.to_rgba8(), original.to_rgba8());
}

#[test]
fn test_stacked_rows_hit_exactly_one() {
    let rows: Vec<Rect> = (0..4)
        .map(|i| Rect::new(0.0, i as f32 * 32.0, 200.0, 32.0))
        .collect();

    for y in [0.0, 31.9, 32.0, 64.0, 127.0] {
        let p = Point::new(50.0, y);
        assert_eq!(rows.iter().filter(|r| r.hit_test(&p)).count(), 1, "y = {y}");
    }
}
