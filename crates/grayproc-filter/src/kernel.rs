//! Convolution kernels
//!
//! A [`Kernel`] is a square, odd-sized matrix of `f64` weights with a
//! well-defined central element. Weights are unconstrained: they may be
//! negative and need not sum to 1.

use crate::{FilterError, FilterResult};

/// A square convolution kernel with an odd side length
///
/// Weights are stored row-major; the side length is validated at
/// construction, so every `Kernel` value has a center.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Side length (always odd)
    size: u32,
    /// Weights (row-major, `size * size` values)
    data: Vec<f64>,
}

impl Kernel {
    fn check_size(size: u32) -> FilterResult<()> {
        if size % 2 == 0 {
            return Err(FilterError::InvalidKernelSize { size });
        }
        Ok(())
    }

    /// Create a zero-filled kernel.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelSize`] if `size` is even
    /// (zero included).
    pub fn new(size: u32) -> FilterResult<Self> {
        Self::check_size(size)?;
        let n = size as usize * size as usize;
        Ok(Kernel {
            size,
            data: vec![0.0; n],
        })
    }

    /// Create a kernel from a row-major slice of weights.
    ///
    /// The size is validated before the weight count, so an even size is
    /// reported even when the data length is also wrong.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelSize`] for an even size, then
    /// [`FilterError::KernelDataMismatch`] unless
    /// `data.len() == size * size`.
    pub fn from_slice(size: u32, data: &[f64]) -> FilterResult<Self> {
        Self::check_size(size)?;
        let expected = size as usize * size as usize;
        if data.len() != expected {
            return Err(FilterError::KernelDataMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Kernel {
            size,
            data: data.to_vec(),
        })
    }

    /// Create a box (averaging) kernel.
    ///
    /// All weights are `1 / (size * size)`, so the filtered value is the
    /// local mean.
    pub fn box_filter(size: u32) -> FilterResult<Self> {
        Self::check_size(size)?;
        let n = size as usize * size as usize;
        Ok(Kernel {
            size,
            data: vec![1.0 / n as f64; n],
        })
    }

    /// Create an identity kernel: a single weight of 1 at the center.
    pub fn identity(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size)?;
        let center = kernel.center_index();
        kernel.data[center] = 1.0;
        Ok(kernel)
    }

    /// Create a Gaussian kernel normalized to sum 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelSize`] for an even size and
    /// [`FilterError::InvalidParameters`] for a non-positive sigma.
    pub fn gaussian(size: u32, sigma: f64) -> FilterResult<Self> {
        Self::check_size(size)?;
        if sigma <= 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian sigma must be positive, got {sigma}"
            )));
        }
        let half = (size / 2) as i64;
        let n = size as usize * size as usize;
        let mut data = Vec::with_capacity(n);
        for i in -half..=half {
            for j in -half..=half {
                let d2 = (i * i + j * j) as f64;
                data.push((-d2 / (2.0 * sigma * sigma)).exp());
            }
        }
        let sum: f64 = data.iter().sum();
        for w in &mut data {
            *w /= sum;
        }
        Ok(Kernel { size, data })
    }

    /// Get the side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the interior margin `size / 2` the kernel needs on every side.
    #[inline]
    pub fn half(&self) -> u32 {
        self.size / 2
    }

    /// Get the linear index of the central weight in [`Kernel::data`].
    #[inline]
    pub fn center_index(&self) -> usize {
        let s = self.size as usize;
        s * (s / 2) + s / 2
    }

    /// Get the weights (row-major).
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the weight at (x, y).
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.data[y as usize * self.size as usize + x as usize])
    }

    /// Set the weight at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= size` or `y >= size`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        assert!(
            x < self.size && y < self.size,
            "kernel index ({x}, {y}) out of bounds for size {}",
            self.size
        );
        self.data[y as usize * self.size as usize + x as usize] = value;
    }

    /// Get the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Scale the weights so they sum to 1.
    ///
    /// Kernels whose weights sum to zero are left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for w in &mut self.data {
                *w /= sum;
            }
        }
    }
}
