//! Error types for icon loading and theme configuration.

use fluent_menu_core::ColorParseError;
use thiserror::Error;

/// Failure to produce an [`Icon`](crate::Icon).
#[derive(Debug, Error)]
pub enum IconError {
    /// The SVG markup could not be parsed.
    #[error("invalid SVG markup: {0}")]
    Svg(#[from] resvg::usvg::Error),
    /// The requested raster size cannot be allocated.
    #[error("cannot allocate a {width}x{height} icon")]
    Allocation {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
    /// A raw pixel buffer did not match its declared size.
    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    BufferSize {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Actual buffer length
        len: usize,
    },
}

/// Failure to load a theme from configuration.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// The document is not valid TOML or has unknown/mistyped fields.
    #[error("theme config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A palette entry is not a `#rrggbb` / `#rrggbbaa` color.
    #[error("theme color `{field}` = {value:?}: {source}")]
    InvalidColor {
        /// Palette field name
        field: &'static str,
        /// Rejected value
        value: String,
        /// Parse failure
        #[source]
        source: ColorParseError,
    },
    /// A metric is negative or not finite.
    #[error("theme metric `{field}` must be a finite, non-negative number (got {value})")]
    InvalidMetric {
        /// Metric field name
        field: &'static str,
        /// Rejected value
        value: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_error_display() {
        let err = IconError::Allocation {
            width: 0,
            height: 16,
        };
        assert_eq!(err.to_string(), "cannot allocate a 0x16 icon");

        let err = IconError::BufferSize {
            width: 2,
            height: 2,
            len: 3,
        };
        assert_eq!(
            err.to_string(),
            "pixel buffer of 3 bytes does not match 2x2 RGBA"
        );
    }

    #[test]
    fn test_theme_error_display_and_source() {
        use std::error::Error as _;

        let err = ThemeError::InvalidColor {
            field: "popup_bg",
            value: "#zz".to_string(),
            source: ColorParseError::InvalidLength,
        };
        assert_eq!(
            err.to_string(),
            "theme color `popup_bg` = \"#zz\": invalid hex string length (expected 6 or 8)"
        );
        assert!(err.source().is_some());

        let err = ThemeError::InvalidMetric {
            field: "row_height",
            value: -1.0,
        };
        assert!(err.to_string().contains("row_height"));
    }
}
