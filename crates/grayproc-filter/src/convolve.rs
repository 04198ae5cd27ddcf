//! Grayscale convolution
//!
//! Applies a square, odd-sized [`Kernel`] to an 8-bit grayscale image.
//! The kernel is applied flipped (true convolution, mirrored through its
//! center, not correlation). Interior pixels get the full weighted sum;
//! border pixels are then filled by replicating the nearest interior row
//! and column, so the output keeps the source dimensions.
//!
//! The weighted sum accumulates in `f64`, row-major over the kernel, and
//! is stored by clamping to `[0, 255]` and truncating the fraction. The
//! accumulation order is part of the output contract and must not change.

use grayproc_core::{GrayImage, GrayImageMut};

use crate::{FilterError, FilterResult, Kernel};

/// Check that dst and src have identical dimensions and at least one pixel.
fn check_images(dst: &GrayImageMut, src: &GrayImage) -> FilterResult<()> {
    if dst.width() != src.width() || dst.height() != src.height() {
        return Err(FilterError::SizeMismatch {
            expected: (src.width(), src.height()),
            actual: (dst.width(), dst.height()),
        });
    }
    if src.is_empty() {
        return Err(FilterError::EmptyImage);
    }
    Ok(())
}

/// Convolve `src` with `kernel`, writing into a caller-provided
/// destination of the same dimensions.
///
/// Interior pixels — those at least `kernel.half()` away from every edge —
/// receive the flipped-kernel weighted sum of their neighborhood, clamped
/// to `[0, 255]` and truncated to `u8`. Border pixels are then replicated:
/// top and bottom rows copy the nearest interior row (interior columns
/// only), after which left and right columns copy the nearest interior
/// column across all rows, filling the four corners from the rows
/// extended just before. The pass order matters and must not change.
///
/// A kernel larger than the image leaves no interior and nothing to
/// replicate; the destination is left unmodified.
///
/// # Errors
///
/// Returns [`FilterError::SizeMismatch`] if dst and src dimensions differ
/// and [`FilterError::EmptyImage`] if the source has zero pixels. On error
/// the destination is untouched.
pub fn convolve_into(
    dst: &mut GrayImageMut,
    src: &GrayImage,
    kernel: &Kernel,
) -> FilterResult<()> {
    check_images(dst, src)?;

    let width = src.width() as usize;
    let height = src.height() as usize;
    let size = kernel.size() as usize;
    let half = kernel.half() as usize;

    // Interior empty in either dimension: nothing well-defined to compute
    // or replicate.
    if 2 * half >= height || 2 * half >= width {
        return Ok(());
    }

    let src_data = src.data();
    let weights = kernel.data();
    let dst_data = dst.data_mut();

    for row in half..height - half {
        for col in half..width - half {
            let mut sum = 0.0f64;
            for ky in 0..size {
                let sy = row + ky - half;
                // flipped kernel row: size-1-ky
                let wrow = (size - 1 - ky) * size;
                for kx in 0..size {
                    let sx = col + kx - half;
                    let weight = weights[wrow + (size - 1 - kx)];
                    sum += src_data[sy * width + sx] as f64 * weight;
                }
            }
            let clamped = if sum > 255.0 {
                255.0
            } else if sum < 0.0 {
                0.0
            } else {
                sum
            };
            dst_data[row * width + col] = clamped as u8;
        }
    }

    // Top and bottom rows replicate the nearest interior row, interior
    // columns only; corners are handled by the column pass below.
    let top_base = half * width;
    for row in 0..half {
        let row_base = row * width;
        for col in half..width - half {
            dst_data[row_base + col] = dst_data[top_base + col];
        }
    }
    let bottom_base = (height - half - 1) * width;
    for row in height - half..height {
        let row_base = row * width;
        for col in half..width - half {
            dst_data[row_base + col] = dst_data[bottom_base + col];
        }
    }

    // Left and right columns replicate the nearest interior column across
    // all rows, including the rows extended above.
    for col in 0..half {
        for row in 0..height {
            let row_base = row * width;
            dst_data[row_base + col] = dst_data[row_base + half];
        }
    }
    for col in width - half..width {
        for row in 0..height {
            let row_base = row * width;
            dst_data[row_base + col] = dst_data[row_base + width - half - 1];
        }
    }

    Ok(())
}

/// Convolve `src` with `kernel` into a freshly allocated image.
///
/// See [`convolve_into`] for the algorithm. For a kernel larger than the
/// image this returns the zero-filled template.
///
/// # Errors
///
/// Returns [`FilterError::EmptyImage`] if the source has zero pixels.
pub fn convolve(src: &GrayImage, kernel: &Kernel) -> FilterResult<GrayImage> {
    let mut dst = GrayImageMut::new(src.width(), src.height())?;
    convolve_into(&mut dst, src, kernel)?;
    Ok(dst.into())
}

/// Convolve with a box (averaging) kernel of the given odd size.
pub fn box_blur(src: &GrayImage, size: u32) -> FilterResult<GrayImage> {
    let kernel = Kernel::box_filter(size)?;
    convolve(src, &kernel)
}

/// Convolve with a normalized Gaussian kernel.
pub fn gaussian_blur(src: &GrayImage, size: u32, sigma: f64) -> FilterResult<GrayImage> {
    let kernel = Kernel::gaussian(size, sigma)?;
    convolve(src, &kernel)
}
