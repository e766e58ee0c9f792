//! Draw commands recorded by [`RecordingCanvas`](crate::RecordingCanvas).
//!
//! All menu rendering reduces to these primitives.

use crate::widget::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }

    /// Add a stroke to the box.
    #[must_use]
    pub const fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// A single recorded draw operation, in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a path (polyline)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },
    /// Draw a rectangle, optionally rounded
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radii
        radius: CornerRadius,
        /// Fill and stroke
        style: BoxStyle,
    },
    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Top-left position
        position: Point,
        /// Text style
        style: TextStyle,
        /// Clip rectangle active when the text was drawn
        clip: Option<Rect>,
    },
    /// Blit a bitmap
    Bitmap {
        /// Destination bounds
        bounds: Rect,
        /// Source width in pixels
        width: u32,
        /// Source height in pixels
        height: u32,
    },
}

impl DrawCommand {
    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            style,
        }
    }

    /// Every color this command paints with.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        match self {
            Self::Path { style, .. } => vec![style.color],
            Self::Rect { style, .. } => style
                .fill
                .into_iter()
                .chain(style.stroke.map(|s| s.color))
                .collect(),
            Self::Text { style, .. } => vec![style.color],
            Self::Bitmap { .. } => Vec::new(),
        }
    }
}
