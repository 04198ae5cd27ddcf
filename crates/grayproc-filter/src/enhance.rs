//! Contrast enhancement
//!
//! Histogram equalization remaps pixel intensities through their
//! cumulative distribution, spreading intensity usage across the 8-bit
//! range. The pipeline runs in four stages over a call-scoped table
//! indexed by `pixel - min`: occurrence counting, in-place cumulative
//! summing, remapping of the table entries, and a final population pass
//! over the pixels. The table decouples the read and write phases, so the
//! in-place form is safe.

use grayproc_core::{Error as CoreError, GrayImage, GrayImageMut};

use crate::{FilterError, FilterResult};

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

/// Build the intensity remap table for one equalization pass.
///
/// The table has `max - min + 1` entries and is transformed in place:
/// occurrence counts, then cumulative counts, then the final remapped
/// intensities. The first cumulative count is narrowed to 8 bits before
/// it enters the mapping formula; the narrowing changes the result when
/// more than 255 pixels hold the minimum intensity and is kept for
/// compatibility with results derived from it.
///
/// A uniform image with fewer than 256 pixels would make the mapping
/// denominator zero; that case maps every intensity to itself.
fn build_remap_table(src_data: &[u8], min: u8, max: u8, area: usize) -> FilterResult<Vec<usize>> {
    let table_len = (max - min) as usize + 1;
    let mut table = Vec::new();
    table
        .try_reserve_exact(table_len)
        .map_err(|_| FilterError::Core(CoreError::AllocationFailed))?;
    table.resize(table_len, 0usize);

    for &v in src_data {
        table[(v - min) as usize] += 1;
    }
    for i in 1..table.len() {
        table[i] += table[i - 1];
    }

    let cdf_min = table[0] as u8;
    if area == cdf_min as usize {
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = min as usize + i;
        }
        return Ok(table);
    }
    let denom = area as f64 - cdf_min as f64;
    for entry in table.iter_mut() {
        *entry = (((*entry as f64 - cdf_min as f64) * 255.0) / denom).round() as usize;
    }
    Ok(table)
}

/// Equalize the histogram of `src`, writing into a caller-provided
/// destination of the same dimensions.
///
/// Every output pixel is the remapped value of the corresponding source
/// pixel; the mapping comes from the source's cumulative intensity
/// distribution over the range `[min, max]` found by
/// [`GrayImage::min_max`].
///
/// # Errors
///
/// Returns [`FilterError::SizeMismatch`] if dst and src dimensions differ,
/// [`FilterError::EmptyImage`] if the source has zero pixels, and
/// [`FilterError::Core`] with an allocation failure if the remap table
/// cannot be allocated. On error the destination is untouched.
pub fn equalize_into(dst: &mut GrayImageMut, src: &GrayImage) -> FilterResult<()> {
    check_images(dst, src)?;
    let (min, max) = src.min_max()?;
    let table = build_remap_table(src.data(), min, max, src.area())?;
    for (d, &s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = table[(s - min) as usize] as u8;
    }
    Ok(())
}

/// Equalize the histogram of `src` into a freshly allocated image.
///
/// See [`equalize_into`].
pub fn equalize(src: &GrayImage) -> FilterResult<GrayImage> {
    let mut dst = GrayImageMut::new(src.width(), src.height())?;
    equalize_into(&mut dst, src)?;
    Ok(dst.into())
}

/// Equalize an image in place.
///
/// The remap table is built from the pixels before any of them is
/// rewritten, so reading and writing the same buffer is safe. Produces
/// exactly the result of the two-buffer forms.
///
/// # Errors
///
/// Returns [`FilterError::EmptyImage`] for a zero-pixel image.
pub fn equalize_in_place(img: &mut GrayImageMut) -> FilterResult<()> {
    if img.is_empty() {
        return Err(FilterError::EmptyImage);
    }
    let (min, max) = img.min_max()?;
    let table = build_remap_table(img.data(), min, max, img.area())?;
    for v in img.data_mut().iter_mut() {
        *v = table[(*v - min) as usize] as u8;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from(width: u32, height: u32, data: &[u8]) -> GrayImage {
        GrayImage::from_vec(width, height, data.to_vec()).unwrap()
    }

    /// Canonical 8x8 equalization reference input.
    #[rustfmt::skip]
    const REFERENCE_8X8: [u8; 64] = [
        52, 55, 61,  59,  79,  61, 76, 61,
        62, 59, 55, 104,  94,  85, 59, 71,
        63, 65, 66, 113, 144, 104, 63, 72,
        64, 70, 70, 126, 154, 109, 71, 69,
        67, 73, 68, 106, 122,  88, 68, 68,
        68, 79, 60,  70,  77,  66, 58, 75,
        69, 85, 64,  58,  55,  61, 65, 83,
        70, 87, 69,  68,  65,  73, 78, 90,
    ];

    /// Documented equalization output for [`REFERENCE_8X8`].
    #[rustfmt::skip]
    const REFERENCE_8X8_EQUALIZED: [u8; 64] = [
          0,  12,  53,  32, 190,  53, 174,  53,
         57,  32,  12, 227, 219, 202,  32, 154,
         65,  85,  93, 239, 251, 227,  65, 158,
         73, 146, 146, 247, 255, 235, 154, 130,
         97, 166, 117, 231, 243, 210, 117, 117,
        117, 190,  36, 146, 178,  93,  20, 170,
        130, 202,  73,  20,  12,  53,  85, 194,
        146, 206, 130, 117,  85, 166, 182, 215,
    ];

    // ========== validation tests ==========

    #[test]
    fn test_size_mismatch_rejected() {
        let src = image_from(3, 3, &[5; 9]);
        let mut dst = GrayImageMut::new(3, 4).unwrap();
        let err = equalize_into(&mut dst, &src).unwrap_err();
        match err {
            FilterError::SizeMismatch { expected, actual } => {
                assert_eq!(expected, (3, 3));
                assert_eq!(actual, (3, 4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_image_rejected() {
        let src = GrayImage::new(4, 0).unwrap();
        let mut dst = GrayImageMut::new(4, 0).unwrap();
        assert!(matches!(
            equalize_into(&mut dst, &src),
            Err(FilterError::EmptyImage)
        ));
        assert!(matches!(equalize(&src), Err(FilterError::EmptyImage)));
        let mut img = GrayImageMut::new(0, 0).unwrap();
        assert!(matches!(
            equalize_in_place(&mut img),
            Err(FilterError::EmptyImage)
        ));
    }

    #[test]
    fn test_dst_untouched_on_error() {
        let src = image_from(3, 3, &[5; 9]);
        let mut dst = GrayImageMut::new(2, 2).unwrap();
        dst.fill(99);
        assert!(equalize_into(&mut dst, &src).is_err());
        assert!(dst.data().iter().all(|&v| v == 99));
    }

    // ========== equalization fixtures ==========

    #[test]
    fn test_reference_8x8() {
        let src = image_from(8, 8, &REFERENCE_8X8);
        let out = equalize(&src).unwrap();
        assert_eq!(out.data(), &REFERENCE_8X8_EQUALIZED);
    }

    #[test]
    fn test_ramp_5x5() {
        let data: Vec<u8> = (1..=25).collect();
        let src = image_from(5, 5, &data);
        let out = equalize(&src).unwrap();
        #[rustfmt::skip]
        let expected: [u8; 25] = [
              0,  11,  21,  32,  43,
             53,  64,  74,  85,  96,
            106, 117, 128, 138, 149,
            159, 170, 181, 191, 202,
            213, 223, 234, 244, 255,
        ];
        assert_eq!(out.data(), &expected);
    }

    #[test]
    fn test_uniform_small_maps_identically() {
        // 64 pixels at one intensity: denominator would be zero
        let src = image_from(8, 8, &[100; 64]);
        let out = equalize(&src).unwrap();
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn test_uniform_large_maps_to_255() {
        // 400 pixels at one intensity: the narrowed first count wraps below
        // the area, so the formula applies and sends everything to 255
        let src = image_from(20, 20, &[100; 400]);
        let out = equalize(&src).unwrap();
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_cdf_min_narrowing_quirk() {
        // 256 pixels at the minimum: the first cumulative count narrows to
        // 0, which lifts the zero pixels to 240 instead of leaving them at 0
        let mut data = vec![0u8; 256];
        data.extend_from_slice(&[1; 16]);
        let src = image_from(16, 17, &data);
        let out = equalize(&src).unwrap();
        assert!(out.data()[..256].iter().all(|&v| v == 240));
        assert!(out.data()[256..].iter().all(|&v| v == 255));
    }

    #[test]
    fn test_single_pixel_image() {
        let src = image_from(1, 1, &[5]);
        let out = equalize(&src).unwrap();
        assert_eq!(out.data(), &[5]);
    }

    // ========== operation forms ==========

    #[test]
    fn test_into_form_matches_allocating_form() {
        let src = image_from(8, 8, &REFERENCE_8X8);
        let allocated = equalize(&src).unwrap();
        let mut dst = GrayImageMut::new(8, 8).unwrap();
        equalize_into(&mut dst, &src).unwrap();
        let dst: GrayImage = dst.into();
        assert_eq!(dst.data(), allocated.data());
    }

    #[test]
    fn test_in_place_matches_two_buffer_form() {
        let src = image_from(8, 8, &REFERENCE_8X8);
        let expected = equalize(&src).unwrap();
        let mut img = src.to_mut();
        equalize_in_place(&mut img).unwrap();
        assert_eq!(img.data(), expected.data());
        assert_eq!(img.data(), &REFERENCE_8X8_EQUALIZED);
    }
}
