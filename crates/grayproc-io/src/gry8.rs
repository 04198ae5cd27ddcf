//! GRY8 image format support
//!
//! Reading and writing the library's native GRY8 binary format.
//! GRY8 is a fast, uncompressed serialization of grayscale images; the
//! wire layout lives in `grayproc-core` and these functions wrap it in
//! the same reader/writer surface as the other formats.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use grayproc_core::{GrayImage, Gry8Header};

use crate::IoResult;

/// Read GRY8 header metadata without decoding pixel data.
pub fn read_gry8_header<R: Read>(mut reader: R) -> IoResult<Gry8Header> {
    Ok(GrayImage::read_gry8_header(&mut reader)?)
}

/// Read a GRY8 image.
pub fn read_gry8<R: Read>(mut reader: R) -> IoResult<GrayImage> {
    Ok(GrayImage::read_gry8(&mut reader)?)
}

/// Read a GRY8 image from a file.
pub fn read_gry8_from_file<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let file = File::open(path)?;
    read_gry8(BufReader::new(file))
}

/// Write an image as GRY8.
pub fn write_gry8<W: Write>(img: &GrayImage, mut writer: W) -> IoResult<()> {
    Ok(img.write_gry8(&mut writer)?)
}

/// Write an image as GRY8 to a file.
pub fn write_gry8_to_file<P: AsRef<Path>>(img: &GrayImage, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_gry8(img, &mut writer)?;
    writer.flush()?;
    Ok(())
}
