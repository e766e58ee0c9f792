//! In-memory canvas used by tests and by hosts that replay paint output.

use crate::bitmap::Bitmap;
use crate::draw::{BoxStyle, DrawCommand, StrokeStyle};
use crate::widget::{Canvas, TextStyle, Transform2D};
use crate::{Color, CornerRadius, Point, Rect};

/// Stores every paint call as a [`DrawCommand`] in canvas space.
///
/// Widgets paint in local coordinates under `push_transform`; the recorded
/// geometry is already mapped to where it lands. Text also carries the clip
/// that was active when it was drawn, so truncation is observable.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    transform_stack: Vec<Transform2D>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in paint order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands recorded so far.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop recorded commands along with any unbalanced clip or transform.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.transform_stack.clear();
    }

    /// Transform in effect for the next command; identity at depth 0.
    #[must_use]
    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    /// Pushes not yet matched by a pop. Zero after balanced painting.
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    /// All text strings drawn so far, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every color used by any recorded command.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        self.commands.iter().flat_map(DrawCommand::colors).collect()
    }

    fn map_rect(&self, rect: Rect) -> Rect {
        self.current_transform().apply_rect(rect)
    }

    fn map_point(&self, point: Point) -> Point {
        self.current_transform().apply(point)
    }

    fn push_rect(&mut self, rect: Rect, radius: f32, style: BoxStyle) {
        self.commands.push(DrawCommand::Rect {
            bounds: self.map_rect(rect),
            radius: CornerRadius::uniform(radius),
            style,
        });
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push_rect(rect, 0.0, BoxStyle::fill(color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.push_rect(rect, 0.0, BoxStyle::stroke(StrokeStyle { color, width }));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push_rect(rect, radius, BoxStyle::fill(color));
    }

    fn draw_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    ) {
        let style = BoxStyle::fill(fill).with_stroke(StrokeStyle {
            color: stroke,
            width: stroke_width,
        });
        self.push_rect(rect, radius, style);
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position: self.map_point(position),
            style: style.clone(),
            clip: self.clip_stack.last().copied(),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        let cmd = DrawCommand::line(
            self.map_point(from),
            self.map_point(to),
            StrokeStyle { color, width },
        );
        self.commands.push(cmd);
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: Rect) {
        self.commands.push(DrawCommand::Bitmap {
            bounds: self.map_rect(dest),
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        let mut mapped = self.map_rect(rect);
        if let Some(outer) = self.clip_stack.last() {
            let x = mapped.x.max(outer.x);
            let y = mapped.y.max(outer.y);
            mapped = Rect::new(
                x,
                y,
                (mapped.right().min(outer.right()) - x).max(0.0),
                (mapped.bottom().min(outer.bottom()) - y).max(0.0),
            );
        }
        self.clip_stack.push(mapped);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }
}
