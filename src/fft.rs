//! Recursive mixed-radix complex FFT.

use num_complex::Complex;
use num_traits::{Float, FloatConst};

use crate::butterflies::{bit_reverse, butterfly_radix2, butterfly_radix4, butterfly_radix8};
use crate::twiddles::{generate_twiddles, Direction};

/// Branching factor of one decomposition step: a pure function of the
/// sub-problem size.
#[inline(always)]
fn radix(n_out: usize) -> usize {
    if n_out % 8 == 0 {
        8
    } else if n_out % 4 == 0 {
        4
    } else {
        2
    }
}

/// Complex Fourier transform of a fixed power-of-two size.
///
/// The engine is constructed once per `(size, direction)` pair, the only
/// point where the O(N) twiddle table is built, and can then be invoked any
/// number of times. It holds no mutable state, so a shared reference may be
/// used from multiple threads concurrently.
///
/// No `1/N` scaling is applied in either direction: transforming forward and
/// then inverse yields the input multiplied by `size`.
pub struct Fft<T> {
    size: usize,
    direction: Direction,
    twiddles: Box<[Complex<T>]>,
}

impl<T: Float + FloatConst> Fft<T> {
    /// Creates an engine for transforms of length `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or not a power of two.
    pub fn new(size: usize, direction: Direction) -> Self {
        assert!(size > 0 && size.is_power_of_two());
        Self {
            size,
            direction,
            twiddles: generate_twiddles(size, direction),
        }
    }

    /// Transform length this engine was built for.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Runs the transform of `input` into `output`.
    ///
    /// # Panics
    ///
    /// Panics if either slice length differs from [`Fft::len`].
    pub fn transform(&self, input: &[Complex<T>], output: &mut [Complex<T>]) {
        assert_eq!(input.len(), self.size);
        assert_eq!(output.len(), self.size);
        if self.size == 1 {
            output[0] = input[0];
            return;
        }
        self.step(input, 0, output);
    }

    /// One decimation-in-time level producing `out.len()` values from the
    /// input subsequence starting at `offset` with stride `size / out.len()`.
    fn step(&self, input: &[Complex<T>], offset: usize, out: &mut [Complex<T>]) {
        let n_out = out.len();
        let r = radix(n_out);
        let stride = self.size / n_out;

        if n_out == r {
            // Base case: gather the strided input in bit-reversed order so
            // the butterfly's block layout matches the recursive case.
            let bits = r.trailing_zeros();
            for (j, slot) in out.iter_mut().enumerate() {
                *slot = input[offset + bit_reverse(j, bits) * stride];
            }
        } else {
            let m = n_out / r;
            let bits = r.trailing_zeros();
            for (j, block) in out.chunks_exact_mut(m).enumerate() {
                self.step(input, offset + bit_reverse(j, bits) * stride, block);
            }
        }

        match r {
            8 => butterfly_radix8(out, &self.twiddles, stride, self.direction),
            4 => butterfly_radix4(out, &self.twiddles, stride, self.direction),
            _ => butterfly_radix2(out, &self.twiddles, stride),
        }
    }
}

#[cfg(test)]
mod tests {
    use rustfft::num_complex::Complex64;
    use rustfft::FftPlanner;

    use super::*;
    use crate::test_utils::{assert_float_closeness, gen_random_spectrum};

    #[test]
    fn impulse_spreads_to_all_bins() {
        for size in [2, 4, 8, 16, 64, 1024] {
            let fft = Fft::<f64>::new(size, Direction::Forward);
            let mut input = vec![Complex::new(0.0, 0.0); size];
            input[0] = Complex::new(1.0, 0.0);
            let mut output = vec![Complex::new(0.0, 0.0); size];
            fft.transform(&input, &mut output);

            for bin in &output {
                assert_float_closeness(bin.re, 1.0, 1e-9);
                assert_float_closeness(bin.im, 0.0, 1e-9);
            }
        }
    }

    #[test]
    fn constant_concentrates_in_dc() {
        for size in [8, 16, 64, 1024] {
            let fft = Fft::<f64>::new(size, Direction::Forward);
            let input = vec![Complex::new(1.0, 0.0); size];
            let mut output = vec![Complex::new(0.0, 0.0); size];
            fft.transform(&input, &mut output);

            assert_float_closeness(output[0].re, size as f64, 1e-8);
            assert_float_closeness(output[0].im, 0.0, 1e-8);
            for bin in &output[1..] {
                assert_float_closeness(bin.re, 0.0, 1e-8);
                assert_float_closeness(bin.im, 0.0, 1e-8);
            }
        }
    }

    #[test]
    fn round_trip_scales_by_size() {
        for size in [8, 16, 64, 1024] {
            let forward = Fft::<f64>::new(size, Direction::Forward);
            let inverse = Fft::<f64>::new(size, Direction::Inverse);

            let input = gen_random_spectrum(size);
            let mut spectrum = vec![Complex::new(0.0, 0.0); size];
            let mut restored = vec![Complex::new(0.0, 0.0); size];
            forward.transform(&input, &mut spectrum);
            inverse.transform(&spectrum, &mut restored);

            for (x, y) in input.iter().zip(restored.iter()) {
                assert_float_closeness(y.re, x.re * size as f64, 1e-7 * size as f64);
                assert_float_closeness(y.im, x.im * size as f64, 1e-7 * size as f64);
            }
        }
    }

    #[test]
    fn forward_is_linear() {
        let size = 256;
        let (a, b) = (0.7_f64, -1.9_f64);
        let fft = Fft::<f64>::new(size, Direction::Forward);

        let x = gen_random_spectrum(size);
        let y = gen_random_spectrum(size);
        let combined: Vec<_> = x
            .iter()
            .zip(y.iter())
            .map(|(xv, yv)| *xv * a + *yv * b)
            .collect();

        let mut fx = vec![Complex::new(0.0, 0.0); size];
        let mut fy = vec![Complex::new(0.0, 0.0); size];
        let mut fc = vec![Complex::new(0.0, 0.0); size];
        fft.transform(&x, &mut fx);
        fft.transform(&y, &mut fy);
        fft.transform(&combined, &mut fc);

        for ((u, v), w) in fx.iter().zip(fy.iter()).zip(fc.iter()) {
            let expected = *u * a + *v * b;
            assert_float_closeness(w.re, expected.re, 1e-7);
            assert_float_closeness(w.im, expected.im, 1e-7);
        }
    }

    #[test]
    fn matches_rustfft() {
        for k in 1..=12 {
            let size = 1 << k;
            let fft = Fft::<f64>::new(size, Direction::Forward);

            let input = gen_random_spectrum(size);
            let mut output = vec![Complex::new(0.0, 0.0); size];
            fft.transform(&input, &mut output);

            let mut buffer: Vec<Complex64> =
                input.iter().map(|z| Complex64::new(z.re, z.im)).collect();
            let mut planner = FftPlanner::new();
            planner.plan_fft_forward(size).process(&mut buffer);

            for (ours, theirs) in output.iter().zip(buffer.iter()) {
                assert_float_closeness(ours.re, theirs.re, 1e-6);
                assert_float_closeness(ours.im, theirs.im, 1e-6);
            }
        }
    }

    #[test]
    fn inverse_matches_rustfft() {
        let size = 128;
        let fft = Fft::<f64>::new(size, Direction::Inverse);

        let input = gen_random_spectrum(size);
        let mut output = vec![Complex::new(0.0, 0.0); size];
        fft.transform(&input, &mut output);

        let mut buffer: Vec<Complex64> =
            input.iter().map(|z| Complex64::new(z.re, z.im)).collect();
        let mut planner = FftPlanner::new();
        planner.plan_fft_inverse(size).process(&mut buffer);

        for (ours, theirs) in output.iter().zip(buffer.iter()) {
            assert_float_closeness(ours.re, theirs.re, 1e-6);
            assert_float_closeness(ours.im, theirs.im, 1e-6);
        }
    }

    #[test]
    #[should_panic]
    fn rejects_non_power_of_two() {
        let _ = Fft::<f64>::new(12, Direction::Forward);
    }

    #[test]
    #[should_panic]
    fn rejects_mismatched_buffers() {
        let fft = Fft::<f64>::new(8, Direction::Forward);
        let input = vec![Complex::new(0.0, 0.0); 8];
        let mut output = vec![Complex::new(0.0, 0.0); 4];
        fft.transform(&input, &mut output);
    }
}
