//! Real-valued FFT built atop the half-size complex engine.
//!
//! A length-N real transform is computed by reinterpreting the N samples as
//! N/2 complex pairs, running the half-size complex engine, and then
//! recombining the conjugate-symmetric halves of the result. Only the
//! N/2 + 1 unique bins of the Hermitian spectrum are stored.

use bytemuck::{cast_slice, cast_slice_mut, Pod};
use num_complex::Complex;
use num_traits::{Float, FloatConst, Zero};

use crate::fft::Fft;
use crate::twiddles::{generate_packed_twiddles, Direction};

/// Real Fourier transform of a fixed size divisible by four.
///
/// Like [`Fft`], the engine is immutable after construction and applies no
/// `1/N` scaling: a forward transform followed by an inverse one yields the
/// input multiplied by `size`.
///
/// The spectrum layout is the natural one: bin 0 carries the DC component,
/// bin `size/2` the Nyquist component, both with zero imaginary part.
pub struct RealFft<T> {
    size: usize,
    direction: Direction,
    half_fft: Fft<T>,
    twiddles: Box<[Complex<T>]>,
}

impl<T: Float + FloatConst + Pod> RealFft<T> {
    /// Creates an engine for real transforms of length `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not divisible by four or `size/2` is not a power
    /// of two.
    pub fn new(size: usize, direction: Direction) -> Self {
        assert!(size % 4 == 0);
        Self {
            size,
            direction,
            half_fft: Fft::new(size / 2, direction),
            twiddles: generate_packed_twiddles(size, direction),
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Forward transform of `size` real samples into `size/2 + 1` spectrum
    /// bins.
    ///
    /// # Panics
    ///
    /// Panics if this engine was built with [`Direction::Inverse`] or the
    /// buffer lengths are wrong.
    pub fn transform_forward(&self, input: &[T], output: &mut [Complex<T>]) {
        assert_eq!(self.direction, Direction::Forward);
        assert_eq!(input.len(), self.size);
        assert_eq!(output.len(), self.size / 2 + 1);

        let pairs: &[Complex<T>] = cast_slice(input);
        let half = self.size / 2;
        self.half_fft.transform(pairs, &mut output[..half]);
        self.repack(output);
    }

    /// Inverse transform of `size/2 + 1` spectrum bins into `size` real
    /// samples.
    ///
    /// The input buffer is consumed as scratch: the conjugate-symmetric
    /// reconstruction happens in place before the half-size engine runs.
    ///
    /// # Panics
    ///
    /// Panics if this engine was built with [`Direction::Forward`] or the
    /// buffer lengths are wrong.
    pub fn transform_inverse(&self, input: &mut [Complex<T>], output: &mut [T]) {
        assert_eq!(self.direction, Direction::Inverse);
        assert_eq!(input.len(), self.size / 2 + 1);
        assert_eq!(output.len(), self.size);

        self.repack(input);
        let half = self.size / 2;
        let pairs: &mut [Complex<T>] = cast_slice_mut(output);
        self.half_fft.transform(&input[..half], pairs);
    }

    /// Converts between the half-engine's packed layout and the Hermitian
    /// spectrum, in place.
    ///
    /// Forward unfolds the DC/Nyquist pair out of bin 0 and halves the
    /// recombined bins; inverse refolds bin 0 as
    /// `(DC + Nyquist, DC - Nyquist)` and leaves the doubling in place for
    /// the unnormalized half-size engine. At `i == size/4` the two slots
    /// coincide and the update degenerates to a conjugation.
    fn repack(&self, data: &mut [Complex<T>]) {
        let n = self.size;
        let half = T::from(0.5).unwrap();

        match self.direction {
            Direction::Forward => {
                data[n / 2] = Complex::new(data[0].re - data[0].im, T::zero());
                data[0] = Complex::new(data[0].re + data[0].im, T::zero());
            }
            Direction::Inverse => {
                data[0] = Complex::new(
                    data[0].re + data[n / 2].re,
                    data[0].re - data[n / 2].re,
                );
            }
        }

        for i in 1..=n / 4 {
            let z = data[n / 2 - i].conj();
            let w = data[i] + z;
            let z = (data[i] - z) * self.twiddles[i];

            match self.direction {
                Direction::Forward => {
                    data[i] = (w + z) * half;
                    data[n / 2 - i] = ((w - z) * half).conj();
                }
                Direction::Inverse => {
                    data[i] = w + z;
                    data[n / 2 - i] = (w - z).conj();
                }
            }
        }
    }
}
