//! Grayproc Core - grayscale image container and statistics
//!
//! This crate provides the fundamental data structures used throughout the
//! grayproc image processing library:
//!
//! - [`GrayImage`] / [`GrayImageMut`] - 8-bit grayscale image
//!   (immutable, reference-counted / exclusively owned, mutable)
//! - intensity statistics: [`GrayImage::min_max`], [`GrayImage::histogram`]
//! - native GRY8 serialization: [`GrayImage::read_gry8`],
//!   [`GrayImage::write_gry8`] and friends
//!
//! Filtering operations (convolution, histogram equalization) live in
//! `grayproc-filter`; file-format collaborators live in `grayproc-io`.

pub mod error;
pub mod gray;

pub use error::{Error, Result};
pub use gray::{GrayImage, GrayImageMut, Gry8Header, ImageFormat};
