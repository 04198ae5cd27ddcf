//! grayproc - Grayscale image processing for Rust
//!
//! # Overview
//!
//! grayproc provides a compact set of operations on 8-bit grayscale
//! images:
//!
//! - Image I/O (PNG, the native GRY8 container, raw pixel dumps)
//! - Convolution (box, Gaussian, and custom kernels)
//! - Histogram equalization
//!
//! # Example
//!
//! ```
//! use grayproc::GrayImage;
//!
//! // Create a new 8-bit grayscale image
//! let img = GrayImage::new(640, 480).unwrap();
//! assert_eq!(img.width(), 640);
//! assert_eq!(img.height(), 480);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use grayproc_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use grayproc_filter as filter;
pub use grayproc_io as io;
