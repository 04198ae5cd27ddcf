//! Grayproc IO - image file I/O
//!
//! File-format collaborators around [`GrayImage`]. Each format module
//! exposes `read_*` / `write_*` functions over `std::io` readers and
//! writers, and the crate-level [`read_image`] / [`write_image`] dispatch
//! on detected or requested format.
//!
//! | format | module | feature      | notes                               |
//! |--------|--------|--------------|-------------------------------------|
//! | raw    | `raw`  | `raw`        | headerless dump, no detection       |
//! | GRY8   | `gry8` | `gry8`       | native container                    |
//! | PNG    | `png`  | `png-format` | reads any layout, writes 8-bit gray |

mod error;
pub mod format;

#[cfg(feature = "gry8")]
pub mod gry8;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "raw")]
pub mod raw;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use grayproc_core::ImageFormat;

use grayproc_core::GrayImage;
use std::io::Cursor;
use std::path::Path;

/// Read an image from a file path, detecting the format from its magic.
///
/// Raw dumps carry no magic and cannot be detected; use
/// [`raw::read_raw_from_file`] for those.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let path = path.as_ref();
    match detect_format(path)? {
        #[cfg(feature = "gry8")]
        ImageFormat::Gry8 => gry8::read_gry8_from_file(path),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png_from_file(path),
        other => Err(IoError::UnsupportedFormat(format!(
            "no reader enabled for {:?}",
            other
        ))),
    }
}

/// Read an image from an in-memory buffer, detecting the format from its
/// magic.
pub fn read_image_mem(data: &[u8]) -> IoResult<GrayImage> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "gry8")]
        ImageFormat::Gry8 => gry8::read_gry8(Cursor::new(data)),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        other => Err(IoError::UnsupportedFormat(format!(
            "no reader enabled for {:?}",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(img: &GrayImage, path: P, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "raw")]
        ImageFormat::Raw => raw::write_raw_to_file(img, path),
        #[cfg(feature = "gry8")]
        ImageFormat::Gry8 => gry8::write_gry8_to_file(img, path),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png_to_file(img, path),
        other => Err(IoError::UnsupportedFormat(format!(
            "no writer enabled for {:?}",
            other
        ))),
    }
}

/// Serialize an image into memory in the given format.
pub fn write_image_mem(img: &GrayImage, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        #[cfg(feature = "raw")]
        ImageFormat::Raw => raw::write_raw(img, &mut buf)?,
        #[cfg(feature = "gry8")]
        ImageFormat::Gry8 => gry8::write_gry8(img, &mut buf)?,
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(img, &mut buf)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "no writer enabled for {:?}",
                other
            )));
        }
    }
    Ok(buf)
}
