//! Text measurement supplied by the host.

/// Font metrics capability.
///
/// Layout needs the advance width of labels before anything is painted, so
/// widgets take a `&dyn TextMetrics` when they are built and cache what they
/// measure.
pub trait TextMetrics {
    /// Horizontal advance of `text` at `pixel_size`.
    fn text_width(&self, text: &str, pixel_size: f32) -> f32;

    /// Line height at `pixel_size`.
    fn line_height(&self, pixel_size: f32) -> f32 {
        (pixel_size * 1.25).ceil()
    }
}

/// Approximate metrics: every character advances by a fixed fraction of the
/// pixel size.
///
/// Good enough for headless layout and tests; real hosts plug in their font
/// engine instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMetrics {
    /// Advance per character, as a multiple of the pixel size.
    pub advance: f32,
}

impl FixedWidthMetrics {
    /// Create metrics with the given per-character advance factor.
    #[must_use]
    pub const fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for FixedWidthMetrics {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMetrics for FixedWidthMetrics {
    fn text_width(&self, text: &str, pixel_size: f32) -> f32 {
        text.chars().count() as f32 * pixel_size * self.advance
    }
}
