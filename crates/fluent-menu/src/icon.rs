//! Item icons and SVG rasterization.

use crate::error::IconError;
use fluent_menu_core::{Bitmap, Color};
use resvg::{tiny_skia, usvg};

/// An item icon. The null icon means "no icon".
///
/// # Examples
///
/// ```
/// use fluent_menu::Icon;
///
/// assert!(Icon::null().is_null());
/// let dot = Icon::from_rgba(1, 1, vec![255, 0, 0, 255]).expect("4 bytes");
/// assert!(!dot.is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Icon(Option<Bitmap>);

impl Icon {
    /// The null icon.
    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    /// Wrap a host bitmap. Empty bitmaps become the null icon.
    #[must_use]
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        if bitmap.is_empty() {
            Self::null()
        } else {
            Self(Some(bitmap))
        }
    }

    /// Wrap a premultiplied RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`IconError::BufferSize`] if `pixels` is not
    /// `width * height * 4` bytes long.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, IconError> {
        let len = pixels.len();
        Bitmap::from_rgba(width, height, pixels)
            .map(Self::from_bitmap)
            .ok_or(IconError::BufferSize { width, height, len })
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The raster, if any.
    #[must_use]
    pub const fn bitmap(&self) -> Option<&Bitmap> {
        self.0.as_ref()
    }
}

impl From<Bitmap> for Icon {
    fn from(bitmap: Bitmap) -> Self {
        Self::from_bitmap(bitmap)
    }
}

/// Replace `currentColor` stroke and fill placeholders with `color`.
///
/// Both quote styles are handled. Other color values are left alone.
/// Translucent colors are written as `#rrggbbaa`.
///
/// ```
/// use fluent_menu::recolor_svg;
/// use fluent_menu_core::Color;
///
/// let svg = r##"<path stroke="currentColor" fill="#00ff00"/>"##;
/// assert_eq!(
///     recolor_svg(svg, Color::RED),
///     r##"<path stroke="#ff0000" fill="#00ff00"/>"##
/// );
/// ```
#[must_use]
pub fn recolor_svg(svg: &str, color: Color) -> String {
    let hex = if color.to_rgba8()[3] == u8::MAX {
        color.to_hex()
    } else {
        color.to_hex_with_alpha()
    };
    svg.replace("stroke=\"currentColor\"", &format!("stroke=\"{hex}\""))
        .replace("fill=\"currentColor\"", &format!("fill=\"{hex}\""))
        .replace("stroke='currentColor'", &format!("stroke='{hex}'"))
        .replace("fill='currentColor'", &format!("fill='{hex}'"))
}

/// Largest edge, in pixels, that SVG rasterization will allocate.
pub const MAX_ICON_SIZE: u32 = 1024;

/// Rasterize SVG markup into a `size` x `size` icon.
///
/// When `color` is given, `currentColor` placeholders are replaced first so a
/// single-color icon can follow the theme.
///
/// # Errors
///
/// Returns [`IconError::Allocation`] when `size` is 0 or above
/// [`MAX_ICON_SIZE`], and [`IconError::Svg`] if the markup does not parse.
pub fn try_svg_to_icon(svg: &str, size: u32, color: Option<Color>) -> Result<Icon, IconError> {
    if !(1..=MAX_ICON_SIZE).contains(&size) {
        return Err(IconError::Allocation {
            width: size,
            height: size,
        });
    }

    let markup = match color {
        Some(color) => recolor_svg(svg, color),
        None => svg.to_string(),
    };

    let tree = usvg::Tree::from_str(&markup, &usvg::Options::default())?;
    let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(IconError::Allocation {
        width: size,
        height: size,
    })?;

    let tree_size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        size as f32 / tree_size.width(),
        size as f32 / tree_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Icon::from_rgba(size, size, pixmap.take())
}

/// Rasterize SVG markup, falling back to a blank icon on failure.
///
/// The fallback is a fully transparent bitmap of the requested size, which
/// still occupies the icon column. Sizes outside `1..=MAX_ICON_SIZE` fall
/// back to the null icon instead. Use [`try_svg_to_icon`] to observe the
/// error.
#[must_use]
pub fn svg_to_icon(svg: &str, size: u32, color: Option<Color>) -> Icon {
    try_svg_to_icon(svg, size, color).unwrap_or_else(|err| {
        log::warn!("icon rasterization failed: {err}");
        if size <= MAX_ICON_SIZE {
            Icon::from_bitmap(Bitmap::transparent(size, size))
        } else {
            Icon::null()
        }
    })
}
