//! Intensity statistics for grayscale images

use super::{GrayImage, GrayImageMut};
use crate::error::{Error, Result};

/// Single-pass min/max scan over a pixel buffer.
///
/// Both extremes start from the first pixel. A pixel below the running
/// minimum updates the minimum, otherwise a pixel above the running
/// maximum updates the maximum — a pixel equal to the current minimum is
/// never tested against the maximum. Downstream consumers size tables
/// from these values, so the comparisons are part of the contract.
fn scan_min_max(data: &[u8]) -> Option<(u8, u8)> {
    let (&first, rest) = data.split_first()?;
    let mut min = first;
    let mut max = first;
    for &v in rest {
        if v < min {
            min = v;
        } else if v > max {
            max = v;
        }
    }
    Some((min, max))
}

impl GrayImage {
    /// Find the minimum and maximum pixel intensity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-pixel image.
    ///
    /// # Examples
    ///
    /// ```
    /// use grayproc_core::GrayImage;
    ///
    /// let img = GrayImage::from_vec(2, 2, vec![7, 3, 200, 41])?;
    /// assert_eq!(img.min_max()?, (3, 200));
    /// # Ok::<(), grayproc_core::Error>(())
    /// ```
    pub fn min_max(&self) -> Result<(u8, u8)> {
        scan_min_max(self.data()).ok_or(Error::EmptyImage)
    }

    /// Count pixel occurrences per intensity value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyImage`] for a zero-pixel image.
    pub fn histogram(&self) -> Result<[usize; 256]> {
        if self.is_empty() {
            return Err(Error::EmptyImage);
        }
        let mut hist = [0usize; 256];
        for &v in self.data() {
            hist[v as usize] += 1;
        }
        Ok(hist)
    }
}

impl GrayImageMut {
    /// Find the minimum and maximum pixel intensity.
    ///
    /// Same contract as [`GrayImage::min_max`].
    pub fn min_max(&self) -> Result<(u8, u8)> {
        scan_min_max(self.data()).ok_or(Error::EmptyImage)
    }
}
