//! Headerless raw pixel dumps
//!
//! A raw dump is the bare pixel block of an image: `width * height` bytes
//! in row-major order, nothing else. There is no header, so the caller
//! supplies the dimensions when reading. Anything in the stream after the
//! pixel block is left unread.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use grayproc_core::{GrayImage, GrayImageMut};

use crate::IoResult;

/// Read a raw grayscale dump with caller-supplied dimensions.
///
/// Reads exactly `width * height` bytes from the reader; trailing bytes
/// are ignored. A short stream surfaces as [`IoError::Io`].
///
/// [`IoError::Io`]: crate::IoError::Io
pub fn read_raw<R: Read>(mut reader: R, width: u32, height: u32) -> IoResult<GrayImage> {
    let mut img = GrayImageMut::new(width, height)?;
    reader.read_exact(img.data_mut())?;
    Ok(img.into())
}

/// Read a raw grayscale dump from a file.
pub fn read_raw_from_file<P: AsRef<Path>>(path: P, width: u32, height: u32) -> IoResult<GrayImage> {
    let file = File::open(path)?;
    read_raw(BufReader::new(file), width, height)
}

/// Write an image as a raw dump: the pixel block and nothing else.
///
/// The dimensions are not written; readers must learn them out of band.
pub fn write_raw<W: Write>(img: &GrayImage, mut writer: W) -> IoResult<()> {
    writer.write_all(img.data())?;
    Ok(())
}

/// Write an image as a raw dump to a file.
pub fn write_raw_to_file<P: AsRef<Path>>(img: &GrayImage, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_raw(img, &mut writer)?;
    writer.flush()?;
    Ok(())
}
