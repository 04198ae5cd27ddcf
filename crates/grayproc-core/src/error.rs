//! Error types for grayproc-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Grayproc error type
#[derive(Error, Debug)]
pub enum Error {
    /// Operation requires at least one pixel
    #[error("image has zero pixels")]
    EmptyImage,

    /// Pixel buffer length does not match the stated dimensions
    #[error("data length mismatch: expected {expected} bytes, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported image format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for grayproc operations
pub type Result<T> = std::result::Result<T, Error>;
