//! Menu themes: palette, metrics, and the two built-in variants.
//!
//! The built-in light and dark themes are built once per process and shared
//! as `Arc<Theme>`. Switching themes swaps the reference; a `Theme` is never
//! mutated after construction.

use crate::error::ThemeError;
use fluent_menu_core::Color;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// Which built-in palette a theme derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Light background, dark text
    #[default]
    Light,
    /// Dark background, light text
    Dark,
}

/// Colors used when painting a popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Popup background fill
    pub popup_bg: Color,
    /// Popup border stroke
    pub popup_border: Color,
    /// Enabled label text
    pub item_text: Color,
    /// Disabled label and shortcut text
    pub item_text_disabled: Color,
    /// Shortcut label text
    pub item_shortcut: Color,
    /// Hover pill
    pub item_hover_bg: Color,
    /// Pressed pill
    pub item_pressed_bg: Color,
    /// Check glyph stroke
    pub item_check: Color,
    /// Separator line
    pub separator: Color,
    /// Shadow base color; its alpha is the strongest shadow layer
    pub shadow: Color,
    /// Default icon tint
    pub icon: Color,
}

impl Palette {
    /// Palette for light mode.
    #[must_use]
    pub fn light() -> Self {
        Self {
            popup_bg: Color::rgb8(249, 249, 249),
            popup_border: Color::rgb8(229, 229, 229),
            item_text: Color::rgb8(26, 26, 26),
            item_text_disabled: Color::rgb8(160, 160, 160),
            item_shortcut: Color::rgb8(110, 110, 110),
            item_hover_bg: Color::rgb8(235, 235, 235),
            item_pressed_bg: Color::rgb8(224, 224, 224),
            item_check: Color::rgb8(0, 95, 184),
            separator: Color::rgb8(229, 229, 229),
            shadow: Color::rgba8(0, 0, 0, 50),
            icon: Color::rgb8(26, 26, 26),
        }
    }

    /// Palette for dark mode.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            popup_bg: Color::rgb8(43, 43, 43),
            popup_border: Color::rgb8(60, 60, 60),
            item_text: Color::rgb8(228, 228, 228),
            item_text_disabled: Color::rgb8(110, 110, 110),
            item_shortcut: Color::rgb8(154, 154, 154),
            item_hover_bg: Color::rgb8(61, 61, 61),
            item_pressed_bg: Color::rgb8(51, 51, 51),
            item_check: Color::rgb8(76, 194, 255),
            separator: Color::rgb8(60, 60, 60),
            shadow: Color::rgba8(0, 0, 0, 100),
            icon: Color::rgb8(228, 228, 228),
        }
    }

    /// Every palette entry, in declaration order.
    #[must_use]
    pub fn all(&self) -> [Color; 11] {
        [
            self.popup_bg,
            self.popup_border,
            self.item_text,
            self.item_text_disabled,
            self.item_shortcut,
            self.item_hover_bg,
            self.item_pressed_bg,
            self.item_check,
            self.separator,
            self.shadow,
            self.icon,
        ]
    }
}

/// Sizes in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Popup corner radius
    pub corner_radius: f32,
    /// Nominal shadow blur radius
    pub shadow_radius: f32,
    /// Height of an item row
    pub row_height: f32,
    /// Corner radius of the hover pill
    pub row_radius: f32,
    /// Horizontal padding inside a row
    pub h_padding: f32,
    /// Icon edge length
    pub icon_size: f32,
    /// Label font size
    pub font_size: f32,
    /// Shortcut font size
    pub shortcut_font_size: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            shadow_radius: 16.0,
            row_height: 32.0,
            row_radius: 4.0,
            h_padding: 12.0,
            icon_size: 16.0,
            font_size: 13.0,
            shortcut_font_size: 12.0,
        }
    }
}

/// A complete menu theme.
///
/// # Examples
///
/// ```
/// use fluent_menu::{Theme, ThemeVariant};
///
/// let dark = Theme::dark();
/// assert_eq!(dark.variant, ThemeVariant::Dark);
/// assert_eq!(dark.metrics.row_height, 32.0);
/// assert!(std::sync::Arc::ptr_eq(&dark, &Theme::for_mode(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Variant this theme was derived from
    pub variant: ThemeVariant,
    /// Colors
    pub palette: Palette,
    /// Sizes
    pub metrics: Metrics,
}

static LIGHT: OnceLock<Arc<Theme>> = OnceLock::new();
static DARK: OnceLock<Arc<Theme>> = OnceLock::new();

impl Theme {
    /// Build an unshared theme for a variant.
    #[must_use]
    pub fn new(variant: ThemeVariant) -> Self {
        let palette = match variant {
            ThemeVariant::Light => Palette::light(),
            ThemeVariant::Dark => Palette::dark(),
        };
        Self {
            variant,
            palette,
            metrics: Metrics::default(),
        }
    }

    /// The shared light theme.
    #[must_use]
    pub fn light() -> Arc<Self> {
        Arc::clone(LIGHT.get_or_init(|| Arc::new(Self::new(ThemeVariant::Light))))
    }

    /// The shared dark theme.
    #[must_use]
    pub fn dark() -> Arc<Self> {
        Arc::clone(DARK.get_or_init(|| Arc::new(Self::new(ThemeVariant::Dark))))
    }

    /// The shared theme for a dark-mode flag.
    #[must_use]
    pub fn for_mode(dark_mode: bool) -> Arc<Self> {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// True for themes derived from the dark palette.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.variant == ThemeVariant::Dark
    }

    /// True when a popup laid out with `self` keeps its geometry under `other`.
    #[must_use]
    pub fn same_geometry(&self, other: &Self) -> bool {
        self.metrics == other.metrics
    }

    /// Parse a theme from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] on malformed TOML, unknown fields, bad color
    /// strings, or negative metrics.
    pub fn from_toml(source: &str) -> Result<Self, ThemeError> {
        let config: ThemeConfig = toml::from_str(source)?;
        config.resolve()
    }
}

/// Partial theme description loaded from configuration.
///
/// Anything left out falls back to the `base` variant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Variant supplying the defaults
    #[serde(default)]
    pub base: ThemeVariant,
    /// Color overrides as `#rrggbb` or `#rrggbbaa`
    #[serde(default)]
    pub colors: PaletteConfig,
    /// Metric overrides
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Optional palette overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct PaletteConfig {
    pub popup_bg: Option<String>,
    pub popup_border: Option<String>,
    pub item_text: Option<String>,
    pub item_text_disabled: Option<String>,
    pub item_shortcut: Option<String>,
    pub item_hover_bg: Option<String>,
    pub item_pressed_bg: Option<String>,
    pub item_check: Option<String>,
    pub separator: Option<String>,
    pub shadow: Option<String>,
    pub icon: Option<String>,
}

/// Optional metric overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct MetricsConfig {
    pub corner_radius: Option<f32>,
    pub shadow_radius: Option<f32>,
    pub row_height: Option<f32>,
    pub row_radius: Option<f32>,
    pub h_padding: Option<f32>,
    pub icon_size: Option<f32>,
    pub font_size: Option<f32>,
    pub shortcut_font_size: Option<f32>,
}

impl ThemeConfig {
    /// Apply the overrides on top of the base variant.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError`] for the first invalid override.
    pub fn resolve(&self) -> Result<Theme, ThemeError> {
        let mut theme = Theme::new(self.base);

        let c = &self.colors;
        let p = &mut theme.palette;
        for (field, value, slot) in [
            ("popup_bg", &c.popup_bg, &mut p.popup_bg),
            ("popup_border", &c.popup_border, &mut p.popup_border),
            ("item_text", &c.item_text, &mut p.item_text),
            (
                "item_text_disabled",
                &c.item_text_disabled,
                &mut p.item_text_disabled,
            ),
            ("item_shortcut", &c.item_shortcut, &mut p.item_shortcut),
            ("item_hover_bg", &c.item_hover_bg, &mut p.item_hover_bg),
            ("item_pressed_bg", &c.item_pressed_bg, &mut p.item_pressed_bg),
            ("item_check", &c.item_check, &mut p.item_check),
            ("separator", &c.separator, &mut p.separator),
            ("shadow", &c.shadow, &mut p.shadow),
            ("icon", &c.icon, &mut p.icon),
        ] {
            if let Some(value) = value {
                *slot = Color::from_hex(value).map_err(|source| {
                    log::warn!("rejected theme color {field} = {value:?}");
                    ThemeError::InvalidColor {
                        field,
                        value: value.clone(),
                        source,
                    }
                })?;
            }
        }

        let m = &self.metrics;
        let t = &mut theme.metrics;
        for (field, value, slot) in [
            ("corner_radius", m.corner_radius, &mut t.corner_radius),
            ("shadow_radius", m.shadow_radius, &mut t.shadow_radius),
            ("row_height", m.row_height, &mut t.row_height),
            ("row_radius", m.row_radius, &mut t.row_radius),
            ("h_padding", m.h_padding, &mut t.h_padding),
            ("icon_size", m.icon_size, &mut t.icon_size),
            ("font_size", m.font_size, &mut t.font_size),
            (
                "shortcut_font_size",
                m.shortcut_font_size,
                &mut t.shortcut_font_size,
            ),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    log::warn!("rejected theme metric {field} = {value}");
                    return Err(ThemeError::InvalidMetric { field, value });
                }
                *slot = value;
            }
        }

        Ok(theme)
    }
}
