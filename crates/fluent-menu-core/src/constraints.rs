//! Layout constraints for widgets.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Layout constraints that specify minimum and maximum sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width
    pub min_width: f32,
    /// Maximum width
    pub max_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Maximum height
    pub max_height: f32,
}

impl Constraints {
    /// Create new constraints.
    #[must_use]
    pub const fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Create unbounded constraints.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(0.0, f32::INFINITY, 0.0, f32::INFINITY)
    }

    /// Constrain a size to fit within these constraints.
    ///
    /// When min exceeds max the minimum wins, so a floor such as a menu's
    /// minimum row width survives a narrower maximum.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.min(self.max_width).max(self.min_width),
            size.height.min(self.max_height).max(self.min_height),
        )
    }

    /// Create constraints with a different minimum width.
    #[must_use]
    pub const fn with_min_width(&self, min_width: f32) -> Self {
        Self::new(min_width, self.max_width, self.min_height, self.max_height)
    }

}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}
