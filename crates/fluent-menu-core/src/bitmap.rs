//! Raster images handed to [`Canvas::draw_bitmap`](crate::Canvas::draw_bitmap).

use std::fmt;
use std::sync::Arc;

/// An immutable RGBA8 raster with premultiplied alpha.
///
/// Pixel storage is shared, so clones are cheap and icons can be reused by
/// every row that displays them.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl Bitmap {
    /// Wrap a pixel buffer. Returns `None` if the buffer length is not
    /// `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        if pixels.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// A fully transparent bitmap of the given size.
    #[must_use]
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            pixels: vec![0; len].into(),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 data, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// A bitmap with no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when every pixel has zero alpha.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// RGBA value at `(x, y)`, or `None` outside the bitmap.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Bitmap::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Bitmap::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_transparent_is_blank() {
        let bmp = Bitmap::transparent(16, 16);
        assert!(bmp.is_blank());
        assert!(!bmp.is_empty());
        assert_eq!(bmp.pixels().len(), 16 * 16 * 4);
    }

    #[test]
    fn test_empty() {
        assert!(Bitmap::transparent(0, 16).is_empty());
    }

    #[test]
    fn test_pixel_lookup() {
        let mut data = vec![0; 8];
        data[4..8].copy_from_slice(&[255, 0, 0, 255]);
        let bmp = Bitmap::from_rgba(2, 1, data).expect("valid buffer");
        assert_eq!(bmp.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(bmp.pixel(2, 0), None);
        assert!(!bmp.is_blank());
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = Bitmap::transparent(4, 4);
        let b = a.clone();
        assert!(std::ptr::eq(a.pixels().as_ptr(), b.pixels().as_ptr()));
    }

    #[test]
    fn test_debug_omits_pixels() {
        let text = format!("{:?}", Bitmap::transparent(1, 1));
        assert!(text.contains("width: 1"));
        assert!(!text.contains("pixels"));
    }
}
