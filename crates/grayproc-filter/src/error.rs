//! Error types for grayproc-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] grayproc_core::Error),

    /// Kernel size is even (zero included)
    #[error("invalid kernel size: {size} (must be odd)")]
    InvalidKernelSize { size: u32 },

    /// Kernel weight count does not match the stated size
    #[error("kernel data mismatch: expected {expected} weights, got {actual}")]
    KernelDataMismatch { expected: usize, actual: usize },

    /// Destination and source dimensions differ, as (width, height)
    #[error("size mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Operation requires at least one pixel
    #[error("image has zero pixels")]
    EmptyImage,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
