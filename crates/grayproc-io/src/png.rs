//! PNG image format support
//!
//! Reads PNG images of any supported layout into 8-bit grayscale and
//! writes images as 8-bit grayscale PNG. Sub-byte grayscale depths are
//! expanded to evenly spaced 8-bit values (0, 17, ... 255 for 4-bit);
//! color and indexed images are converted to luminance. 16-bit channels
//! are not supported.

use crate::{IoError, IoResult};
use grayproc_core::{GrayImage, GrayImageMut};
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

/// Perceptual weights for RGB-to-gray conversion.
const RED_WEIGHT: f32 = 0.3;
const GREEN_WEIGHT: f32 = 0.5;
const BLUE_WEIGHT: f32 = 0.2;

/// Convert an RGB sample to gray using the perceptual weights.
#[inline]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32 + 0.5) as u8
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayImage> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    // Read image data
    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut out = GrayImageMut::new(width, height)?;
    let w = width as usize;
    let pixels = out.data_mut();

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..w {
                    let byte_idx = row_start + x / 8;
                    let bit_idx = 7 - (x % 8);
                    let val = (data[byte_idx] >> bit_idx) & 1;
                    pixels[y * w + x] = val * 255;
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Two) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..w {
                    let byte_idx = row_start + x / 4;
                    let shift = 6 - (x % 4) * 2;
                    let val = (data[byte_idx] >> shift) & 3;
                    pixels[y * w + x] = val * 85;
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Four) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..w {
                    let byte_idx = row_start + x / 2;
                    let val = if x % 2 == 0 {
                        (data[byte_idx] >> 4) & 0xF
                    } else {
                        data[byte_idx] & 0xF
                    };
                    pixels[y * w + x] = val * 17;
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                pixels[y * w..(y + 1) * w].copy_from_slice(&data[row_start..row_start + w]);
            }
        }
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..w {
                    pixels[y * w + x] = data[row_start + x * 2];
                }
            }
        }
        (ColorType::Rgb, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..w {
                    let idx = row_start + x * 3;
                    pixels[y * w + x] = luminance(data[idx], data[idx + 1], data[idx + 2]);
                }
            }
        }
        (ColorType::Rgba, BitDepth::Eight) => {
            for y in 0..height as usize {
                let row_start = y * bytes_per_row;
                for x in 0..w {
                    let idx = row_start + x * 4;
                    pixels[y * w + x] = luminance(data[idx], data[idx + 1], data[idx + 2]);
                }
            }
        }
        (ColorType::Indexed, BitDepth::One | BitDepth::Two | BitDepth::Four | BitDepth::Eight) => {
            let palette = reader
                .info()
                .palette
                .as_ref()
                .ok_or_else(|| IoError::DecodeError("indexed PNG without a palette".to_string()))?;
            let palette_bytes: &[u8] = palette;
            let gray_palette: Vec<u8> = palette_bytes
                .chunks_exact(3)
                .map(|c| luminance(c[0], c[1], c[2]))
                .collect();

            for y in 0..height as usize {
                let row = &data[y * bytes_per_row..];
                for x in 0..w {
                    let index = match bit_depth {
                        BitDepth::One => (row[x / 8] >> (7 - (x % 8))) & 1,
                        BitDepth::Two => (row[x / 4] >> (6 - (x % 4) * 2)) & 3,
                        BitDepth::Four => {
                            if x % 2 == 0 {
                                (row[x / 2] >> 4) & 0xF
                            } else {
                                row[x / 2] & 0xF
                            }
                        }
                        _ => row[x],
                    };
                    pixels[y * w + x] = gray_palette.get(index as usize).copied().unwrap_or(0);
                }
            }
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }

    Ok(out.into())
}

/// Read a PNG image from a file
pub fn read_png_from_file<P: AsRef<Path>>(path: P) -> IoResult<GrayImage> {
    let file = File::open(path)?;
    read_png(BufReader::new(file))
}

/// Write a PNG image
pub fn write_png<W: Write>(img: &GrayImage, writer: W) -> IoResult<()> {
    if img.is_empty() {
        return Err(IoError::EncodeError(
            "cannot encode an empty image".to_string(),
        ));
    }

    let mut encoder = Encoder::new(writer, img.width(), img.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(img.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

/// Write a PNG image to a file
pub fn write_png_to_file<P: AsRef<Path>>(img: &GrayImage, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_png(img, &mut writer)?;
    writer.flush()?;
    Ok(())
}
