//! grayproc-filter - Grayscale filtering operations
//!
//! This crate provides the filtering operations of the grayproc library:
//!
//! - Convolution with arbitrary square odd-sized kernels, with
//!   replicating border extension
//! - Blur convenience wrappers (box blur, Gaussian blur)
//! - Contrast enhancement via histogram equalization

pub mod convolve;
pub mod enhance;
mod error;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use convolve::{box_blur, convolve, convolve_into, gaussian_blur};
pub use enhance::{equalize, equalize_in_place, equalize_into};
