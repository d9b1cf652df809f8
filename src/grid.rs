use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

use crate::error::NetpbmError;

/// Fully black pixel (bitmap value 1).
pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
/// Fully white pixel (bitmap value 0).
pub const WHITE: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// A fully materialized image: `width * height` colors in row-major order.
///
/// Grayscale samples are stored with R = G = B.
#[derive(Clone, Debug)]
pub struct PixelGrid {
    img: ImgVec<RGB8>,
}

impl PartialEq for PixelGrid {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.pixels() == other.pixels()
    }
}

impl Eq for PixelGrid {}

impl PixelGrid {
    /// A white grid of the given size.
    ///
    /// # Panics
    /// If `width` or `height` is zero. Use [`from_pixels`](Self::from_pixels)
    /// for a fallible constructor.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive, got {width}x{height}");
        Self {
            img: ImgVec::new(vec![WHITE; width * height], width, height),
        }
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// Fails with [`NetpbmError::EmptyGrid`] if either dimension is zero and
    /// with [`NetpbmError::PixelCountMismatch`] if `pixels` does not hold
    /// exactly `width * height` colors.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<RGB8>) -> Result<Self, NetpbmError> {
        if width == 0 || height == 0 {
            return Err(NetpbmError::EmptyGrid { width, height });
        }
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(NetpbmError::PixelCountMismatch {
                expected: width as u64 * height as u64,
                found: pixels.len() as u64,
            });
        }
        Ok(Self {
            img: ImgVec::new(pixels, width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.img.width()
    }

    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Number of addressable pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.img.buf().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<RGB8> {
        (x < self.width() && y < self.height()).then(|| self.img[(x, y)])
    }

    /// Overwrite the color at `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` lies outside the grid.
    pub fn set(&mut self, x: usize, y: usize, color: RGB8) {
        self.img[(x, y)] = color;
    }

    /// Color at row-major index `i`.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    pub fn pixel_at(&self, i: usize) -> RGB8 {
        let (x, y) = coords(i, self.width());
        self.img[(x, y)]
    }

    /// Overwrite the color at row-major index `i`.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    pub fn set_at(&mut self, i: usize, color: RGB8) {
        let (x, y) = coords(i, self.width());
        self.img[(x, y)] = color;
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[RGB8] {
        self.img.buf()
    }

    pub fn as_imgref(&self) -> ImgRef<'_, RGB8> {
        self.img.as_ref()
    }

    pub fn into_imgvec(self) -> ImgVec<RGB8> {
        self.img
    }
}

impl From<ImgVec<RGB8>> for PixelGrid {
    // Padded or oversized buffers are repacked so that stride == width.
    fn from(img: ImgVec<RGB8>) -> Self {
        if img.stride() == img.width() && img.buf().len() == img.width() * img.height() {
            return Self { img };
        }
        let (w, h) = (img.width(), img.height());
        let pixels: Vec<RGB8> = img.as_ref().pixels().collect();
        Self {
            img: ImgVec::new(pixels, w, h),
        }
    }
}

/// Bytes held by a decoded `width` x `height` grid, or `None` on overflow.
pub(crate) fn grid_bytes(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(size_of::<RGB8>())
}

/// Row-major index → `(x, y)`. `width` must be non-zero.
#[inline]
pub fn coords(i: usize, width: usize) -> (usize, usize) {
    (i % width, i / width)
}

/// `(x, y)` → row-major index.
#[inline]
pub fn index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Scale a sample in `0..=max_color` to `0..=255` with integer division.
///
/// Callers must reject `value > max_color` first.
#[inline]
pub fn normalize(value: u32, max_color: u32) -> u8 {
    debug_assert!(value <= max_color);
    (value * 255 / max_color) as u8
}

/// Gray pixel from a single 8-bit intensity.
#[inline]
pub fn gray(v: u8) -> RGB8 {
    RGB8 { r: v, g: v, b: v }
}

/// Integer mean of the three channels.
#[inline]
pub fn average(c: RGB8) -> u8 {
    ((u16::from(c.r) + u16::from(c.g) + u16::from(c.b)) / 3) as u8
}

/// Bitmap threshold: a pixel whose red channel is at most 127 is black.
#[inline]
pub fn is_dark(c: RGB8) -> bool {
    c.r <= 127
}
