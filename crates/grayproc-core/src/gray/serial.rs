//! GRY8 native serialization
//!
//! GRY8 is the library's own single-image container: a fixed 12-byte header
//! followed by the raw pixel block. It exists so images can be written and
//! reloaded without an external codec.
//!
//! | offset | size             | field                     |
//! |--------|------------------|---------------------------|
//! | 0      | 4                | magic `"gry8"`            |
//! | 4      | 4                | width, u32 little-endian  |
//! | 8      | 4                | height, u32 little-endian |
//! | 12     | `width * height` | samples, row-major        |
//!
//! A zero-area image serializes to a bare 12-byte header and reads back as
//! a valid empty image.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use super::GrayImage;
use crate::error::{Error, Result};

/// File magic identifying the GRY8 format.
const GRY8_MAGIC: [u8; 4] = *b"gry8";

/// Parsed GRY8 header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gry8Header {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl GrayImage {
    /// Read a GRY8 header without reading the pixel block.
    ///
    /// Consumes exactly 12 bytes from the reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the magic does not match,
    /// or [`Error::Io`] on a short or failed read.
    pub fn read_gry8_header(reader: &mut impl Read) -> Result<Gry8Header> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != GRY8_MAGIC {
            return Err(Error::UnsupportedFormat(format!(
                "bad GRY8 magic: {magic:02x?}"
            )));
        }
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        let width = u32::from_le_bytes(buf);
        reader.read_exact(&mut buf)?;
        let height = u32::from_le_bytes(buf);
        Ok(Gry8Header { width, height })
    }

    /// Read a GRY8 image from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for a bad magic,
    /// [`Error::AllocationFailed`] if the pixel buffer cannot be allocated,
    /// or [`Error::Io`] on a short or failed read.
    pub fn read_gry8(reader: &mut impl Read) -> Result<GrayImage> {
        let header = Self::read_gry8_header(reader)?;
        let size = header.width as usize * header.height as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| Error::AllocationFailed)?;
        data.resize(size, 0);
        reader.read_exact(&mut data)?;
        GrayImage::from_vec(header.width, header.height, data)
    }

    /// Read a GRY8 image from an in-memory byte slice.
    pub fn read_gry8_from_bytes(bytes: &[u8]) -> Result<GrayImage> {
        let mut cursor = Cursor::new(bytes);
        Self::read_gry8(&mut cursor)
    }

    /// Read a GRY8 image from a file.
    pub fn read_gry8_from_file(path: impl AsRef<Path>) -> Result<GrayImage> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_gry8(&mut reader)
    }

    /// Write this image as GRY8 to a writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on a failed write.
    pub fn write_gry8(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&GRY8_MAGIC)?;
        writer.write_all(&self.width().to_le_bytes())?;
        writer.write_all(&self.height().to_le_bytes())?;
        writer.write_all(self.data())?;
        Ok(())
    }

    /// Serialize this image as GRY8 into a byte vector.
    pub fn write_gry8_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_gry8(&mut buf)?;
        Ok(buf)
    }

    /// Write this image as GRY8 to a file.
    pub fn write_gry8_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_gry8(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> GrayImage {
        GrayImage::from_vec(3, 2, vec![10, 20, 30, 40, 50, 60]).unwrap()
    }

    #[test]
    fn test_write_layout() {
        let bytes = sample_image().write_gry8_to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"gry8");
        assert_eq!(&bytes[4..8], &3u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
        assert_eq!(&bytes[12..], &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_roundtrip_bytes() {
        let img = sample_image();
        let bytes = img.write_gry8_to_bytes().unwrap();
        let back = GrayImage::read_gry8_from_bytes(&bytes).unwrap();
        assert!(back.sizes_equal(&img));
        assert_eq!(back.data(), img.data());
    }

    #[test]
    fn test_roundtrip_empty_image() {
        let img = GrayImage::new(0, 9).unwrap();
        let bytes = img.write_gry8_to_bytes().unwrap();
        assert_eq!(bytes.len(), 12);
        let back = GrayImage::read_gry8_from_bytes(&bytes).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.width(), 0);
        assert_eq!(back.height(), 9);
    }

    #[test]
    fn test_header_only_read() {
        let bytes = sample_image().write_gry8_to_bytes().unwrap();
        let mut cursor = Cursor::new(bytes.as_slice());
        let header = GrayImage::read_gry8_header(&mut cursor).unwrap();
        assert_eq!(
            header,
            Gry8Header {
                width: 3,
                height: 2
            }
        );
        // cursor now sits at the pixel block
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = sample_image().write_gry8_to_bytes().unwrap();
        bytes[0] = b'x';
        let err = GrayImage::read_gry8_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_truncated_header() {
        let err = GrayImage::read_gry8_from_bytes(b"gry8\x03\x00").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_truncated_pixels() {
        let mut bytes = sample_image().write_gry8_to_bytes().unwrap();
        bytes.truncate(14);
        let err = GrayImage::read_gry8_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = std::env::temp_dir().join("grayproc_serial_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.gry8");
        let img = sample_image();
        img.write_gry8_to_file(&path).unwrap();
        let back = GrayImage::read_gry8_from_file(&path).unwrap();
        assert_eq!(back.data(), img.data());
        std::fs::remove_file(&path).unwrap();
    }
}
