//! Autocorrelation over the real transform pair.
//!
//! Computed in the frequency domain: forward real FFT of the zero-padded
//! input, squared magnitudes, inverse real FFT, then a per-lag normalization
//! by `len * (len - lag)`.

use bytemuck::Pod;
use num_complex::Complex;
use num_traits::{Float, FloatConst, Zero};

use crate::math::power_spectrum_in_place;
use crate::real::RealFft;
use crate::twiddles::Direction;

/// Autocorrelation of fixed-length sample frames.
///
/// Owns a forward and an inverse [`RealFft`] of twice the frame length, built
/// once at construction.
pub struct Autocorrelation<T> {
    len: usize,
    forward: RealFft<T>,
    inverse: RealFft<T>,
}

impl<T: Float + FloatConst + Pod> Autocorrelation<T> {
    /// Creates an engine for frames of `len` samples.
    ///
    /// # Panics
    ///
    /// Panics if `len` is not a power of two of at least 2 (the embedded
    /// transforms run at length `2 * len`).
    pub fn new(len: usize) -> Self {
        Self {
            len,
            forward: RealFft::new(2 * len, Direction::Forward),
            inverse: RealFft::new(2 * len, Direction::Inverse),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Writes the normalized autocorrelation of `input` into `output`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer length differs from [`Autocorrelation::len`].
    pub fn process(&self, input: &[T], output: &mut [T]) {
        assert_eq!(input.len(), self.len);
        assert_eq!(output.len(), self.len);

        let mut time = vec![T::zero(); 2 * self.len];
        time[..self.len].copy_from_slice(input);

        let mut freq = vec![Complex::zero(); self.len + 1];
        self.forward.transform_forward(&time, &mut freq);
        power_spectrum_in_place(&mut freq);
        self.inverse.transform_inverse(&mut freq, &mut time);

        for (lag, out) in output.iter_mut().enumerate() {
            let weight = T::from(self.len * (self.len - lag)).unwrap();
            *out = time[lag].abs() / weight;
        }
    }

    /// In-place variant of [`Autocorrelation::process`].
    pub fn process_in_place(&self, data: &mut [T]) {
        let input = data.to_vec();
        self.process(&input, data);
    }
}
