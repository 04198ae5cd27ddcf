//! Grayscale image container
//!
//! [`GrayImage`] is the immutable, cheaply-cloneable image handle: the pixel
//! buffer sits behind an [`Arc`], so `clone()` shares data. [`GrayImageMut`]
//! holds the buffer exclusively and allows modification; convert between the
//! two with [`GrayImage::try_into_mut`] / [`GrayImage::to_mut`] and
//! `Into<GrayImage>`.
//!
//! Pixels are 8-bit intensity samples in row-major order:
//! `index = row * width + col`.

mod serial;
mod stats;

pub use serial::Gry8Header;

use std::sync::Arc;

use crate::error::{Error, Result};

/// Row-major linear index of `(row, col)` for the given row width.
#[inline]
pub(crate) fn linear_index(row: u32, col: u32, width: u32) -> usize {
    row as usize * width as usize + col as usize
}

/// Allocate a zero-filled pixel buffer, surfacing allocation failure
/// instead of aborting.
fn alloc_pixels(width: u32, height: u32) -> Result<Vec<u8>> {
    let size = width as usize * height as usize;
    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| Error::AllocationFailed)?;
    data.resize(size, 0);
    Ok(data)
}

/// Internal image storage shared by [`GrayImage`] and [`GrayImageMut`].
#[derive(Debug, Clone)]
struct GrayImageData {
    /// Width in pixels (columns)
    width: u32,
    /// Height in pixels (rows)
    height: u32,
    /// Pixel samples, row-major, length `width * height`
    data: Vec<u8>,
}

/// Immutable 8-bit grayscale image
///
/// Cloning is cheap: the pixel buffer is reference-counted, so clones share
/// storage. All read accessors work on any handle; to modify pixels, obtain
/// a [`GrayImageMut`] via [`GrayImage::try_into_mut`] (zero-copy when this
/// is the only handle) or [`GrayImage::to_mut`] (always copies).
///
/// A zero-area image (`width == 0` or `height == 0`) is a valid, empty
/// value; operations that need at least one pixel reject it with
/// [`Error::EmptyImage`].
///
/// # Examples
///
/// ```
/// use grayproc_core::GrayImage;
///
/// let img = GrayImage::new(4, 3)?;
/// assert_eq!(img.width(), 4);
/// assert_eq!(img.height(), 3);
/// assert_eq!(img.area(), 12);
/// assert_eq!(img.get_pixel(0, 0), Some(0));
/// # Ok::<(), grayproc_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GrayImage {
    inner: Arc<GrayImageData>,
}

impl GrayImage {
    /// Create a new zero-filled image.
    ///
    /// Zero dimensions are accepted and produce an empty image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the pixel buffer cannot be
    /// allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let data = alloc_pixels(width, height)?;
        Ok(GrayImage {
            inner: Arc::new(GrayImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Create an image from an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] unless
    /// `data.len() == width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(GrayImage {
            inner: Arc::new(GrayImageData {
                width,
                height,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the total pixel count.
    #[inline]
    pub fn area(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Check whether the image has zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.width == 0 || self.inner.height == 0
    }

    /// Get the raw pixel buffer (row-major).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[linear_index(y, x, self.inner.width)])
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        let start = linear_index(y, 0, self.inner.width);
        let end = start + self.inner.width as usize;
        &self.inner.data[start..end]
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &GrayImage) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a new zero-filled image with the same dimensions as this one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the buffer cannot be
    /// allocated.
    pub fn create_template(&self) -> Result<GrayImage> {
        GrayImage::new(self.inner.width, self.inner.height)
    }

    /// Create a deep copy of this image.
    ///
    /// Unlike `clone()`, which shares the buffer via `Arc`, this copies the
    /// pixel data into an independent allocation.
    pub fn deep_clone(&self) -> Self {
        GrayImage {
            inner: Arc::new(GrayImageData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the pixel buffer without copying.
    ///
    /// Succeeds only if this is the sole handle to the data; otherwise the
    /// original handle is returned unchanged in the `Err` slot.
    pub fn try_into_mut(self) -> std::result::Result<GrayImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GrayImageMut { inner: data }),
            Err(arc) => Err(GrayImage { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    ///
    /// Always copies the pixel buffer, regardless of how many handles share
    /// it.
    pub fn to_mut(&self) -> GrayImageMut {
        GrayImageMut {
            inner: GrayImageData {
                width: self.inner.width,
                height: self.inner.height,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable 8-bit grayscale image
///
/// Holds its pixel buffer exclusively, so writes need no synchronization
/// and cannot be observed through any other handle. Convert back to an
/// immutable [`GrayImage`] with `Into<GrayImage>`.
#[derive(Debug)]
pub struct GrayImageMut {
    inner: GrayImageData,
}

impl GrayImageMut {
    /// Create a new zero-filled mutable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the pixel buffer cannot be
    /// allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let data = alloc_pixels(width, height)?;
        Ok(GrayImageMut {
            inner: GrayImageData {
                width,
                height,
                data,
            },
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the total pixel count.
    #[inline]
    pub fn area(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Check whether the image has zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.width == 0 || self.inner.height == 0
    }

    /// Get the raw pixel buffer (row-major).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the raw pixel buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[linear_index(y, x, self.inner.width)])
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinates are out of
    /// bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: linear_index(y, x, self.inner.width),
                len: self.inner.data.len(),
            });
        }
        let idx = linear_index(y, x, self.inner.width);
        self.inner.data[idx] = value;
        Ok(())
    }

    /// Set every pixel to the given value.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<GrayImageMut> for GrayImage {
    fn from(img: GrayImageMut) -> Self {
        GrayImage {
            inner: Arc::new(img.inner),
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// Headerless pixel dump; dimensions travel out of band
    Raw,
    /// Native GRY8 container
    Gry8,
    /// PNG format
    Png,
}

impl ImageFormat {
    /// Conventional file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Raw => "raw",
            Self::Gry8 => "gry8",
            Self::Png => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_image(width: u32, height: u32) -> GrayImage {
        let data: Vec<u8> = (0..width as usize * height as usize)
            .map(|i| (i % 256) as u8)
            .collect();
        GrayImage::from_vec(width, height, data).unwrap()
    }

    // ===== construction =====

    #[test]
    fn test_new_zero_filled() {
        let img = GrayImage::new(5, 4).unwrap();
        assert_eq!(img.width(), 5);
        assert_eq!(img.height(), 4);
        assert_eq!(img.area(), 20);
        assert!(img.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_new_zero_dimensions_are_valid() {
        let img = GrayImage::new(0, 7).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.area(), 0);
        assert_eq!(img.data().len(), 0);

        let img = GrayImage::new(7, 0).unwrap();
        assert!(img.is_empty());
    }

    #[test]
    fn test_from_vec_valid() {
        let img = GrayImage::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.get_pixel(0, 0), Some(1));
        assert_eq!(img.get_pixel(1, 2), Some(6));
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = GrayImage::from_vec(2, 3, vec![1, 2, 3]).unwrap_err();
        match err {
            Error::DataLengthMismatch { expected, actual } => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_vec_empty() {
        let img = GrayImage::from_vec(0, 0, Vec::new()).unwrap();
        assert!(img.is_empty());
    }

    // ===== access =====

    #[test]
    fn test_get_pixel_row_major() {
        let img = ramp_image(4, 3);
        // index = row * width + col
        assert_eq!(img.get_pixel(0, 0), Some(0));
        assert_eq!(img.get_pixel(3, 0), Some(3));
        assert_eq!(img.get_pixel(0, 1), Some(4));
        assert_eq!(img.get_pixel(2, 2), Some(10));
    }

    #[test]
    fn test_get_pixel_out_of_bounds() {
        let img = ramp_image(4, 3);
        assert_eq!(img.get_pixel(4, 0), None);
        assert_eq!(img.get_pixel(0, 3), None);
    }

    #[test]
    fn test_row_data() {
        let img = ramp_image(4, 3);
        assert_eq!(img.row_data(0), &[0, 1, 2, 3]);
        assert_eq!(img.row_data(2), &[8, 9, 10, 11]);
    }

    #[test]
    fn test_sizes_equal() {
        let a = GrayImage::new(3, 4).unwrap();
        let b = GrayImage::new(3, 4).unwrap();
        let c = GrayImage::new(4, 3).unwrap();
        assert!(a.sizes_equal(&b));
        assert!(!a.sizes_equal(&c));
    }

    #[test]
    fn test_create_template() {
        let img = ramp_image(6, 2);
        let tmpl = img.create_template().unwrap();
        assert!(tmpl.sizes_equal(&img));
        assert!(tmpl.data().iter().all(|&v| v == 0));
    }

    // ===== sharing and mutation =====

    #[test]
    fn test_clone_shares_deep_clone_copies() {
        let img = ramp_image(3, 3);
        let shared = img.clone();
        let deep = img.deep_clone();
        assert_eq!(shared.data(), img.data());
        assert_eq!(deep.data(), img.data());
        // the shared clone pins the Arc, so zero-copy mutation must fail
        let img = img.try_into_mut().unwrap_err();
        drop(shared);
        // deep_clone holds its own allocation and does not pin the Arc
        assert!(img.try_into_mut().is_ok());
        assert_eq!(deep.get_pixel(1, 1), Some(4));
    }

    #[test]
    fn test_try_into_mut_sole_handle() {
        let img = ramp_image(2, 2);
        let mut m = img.try_into_mut().unwrap();
        m.set_pixel(0, 0, 99).unwrap();
        let back: GrayImage = m.into();
        assert_eq!(back.get_pixel(0, 0), Some(99));
        assert_eq!(back.get_pixel(1, 1), Some(3));
    }

    #[test]
    fn test_to_mut_always_copies() {
        let img = ramp_image(2, 2);
        let mut m = img.to_mut();
        m.set_pixel(1, 1, 77).unwrap();
        // original is unaffected
        assert_eq!(img.get_pixel(1, 1), Some(3));
        let changed: GrayImage = m.into();
        assert_eq!(changed.get_pixel(1, 1), Some(77));
    }

    #[test]
    fn test_mut_new_and_fill() {
        let mut m = GrayImageMut::new(3, 2).unwrap();
        assert_eq!(m.area(), 6);
        assert!(!m.is_empty());
        m.fill(42);
        assert!(m.data().iter().all(|&v| v == 42));
        assert_eq!(m.get_pixel(2, 1), Some(42));
        assert_eq!(m.get_pixel(3, 0), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut m = GrayImageMut::new(3, 2).unwrap();
        let err = m.set_pixel(3, 0, 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { .. }));
        let err = m.set_pixel(0, 2, 1).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { .. }));
    }

    #[test]
    fn test_data_mut_direct_write() {
        let mut m = GrayImageMut::new(2, 2).unwrap();
        m.data_mut()[3] = 8;
        let img: GrayImage = m.into();
        assert_eq!(img.get_pixel(1, 1), Some(8));
    }
}
