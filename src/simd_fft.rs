//! Iterative radix-2 FFT vectorized over complex lanes.
//!
//! An alternative to the recursive engine in [`crate::fft`] for sizes of at
//! least twice the hardware lane width: a bit-reversed gather followed by
//! `log2(N)` whole-buffer stages. Stage 0 and stage 1 have twiddles of
//! exactly 1 and ∓i, so they run as scalar sign/swap passes; every later
//! stage loads its twiddle lane once per aligned offset and sweeps the
//! buffer with lane-wide multiply/add/subtract.

use num_complex::Complex;

use crate::butterflies::{bit_reverse, flip};
use crate::lane::{C32Lane, ComplexLane};
use crate::twiddles::Direction;

/// Vectorized complex Fourier transform over `Complex<f32>`.
///
/// All per-stage twiddle lanes are precomputed at construction, so transform
/// calls touch no mutable state and a shared engine may be used from multiple
/// threads. Like [`crate::Fft`], no `1/N` scaling is applied.
pub struct SimdFft {
    size: usize,
    direction: Direction,
    /// One table per stage at index `stage - 2`; stage `k` holds the `2^k`
    /// factors `e^(i * step * j * (size/2 >> k))`.
    stage_twiddles: Vec<Box<[Complex<f32>]>>,
}

impl SimdFft {
    /// Creates an engine for transforms of length `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a power of two or is smaller than twice the
    /// complex lane width.
    pub fn new(size: usize, direction: Direction) -> Self {
        assert!(size.is_power_of_two());
        assert!(size >= 2 * C32Lane::WIDTH);

        let step = direction.step::<f32>(size);
        let half = size / 2;
        let stages = size.trailing_zeros() as usize;
        let stage_twiddles = (2..stages)
            .map(|k| {
                (0..(1usize << k))
                    .map(|j| Complex::from_polar(1.0, step * (j * (half >> k)) as f32))
                    .collect()
            })
            .collect();

        Self {
            size,
            direction,
            stage_twiddles,
        }
    }

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
    /// Panics if either slice length differs from [`SimdFft::len`].
    pub fn transform(&self, input: &[Complex<f32>], output: &mut [Complex<f32>]) {
        assert_eq!(input.len(), self.size);
        assert_eq!(output.len(), self.size);

        let bits = self.size.trailing_zeros();
        for (j, slot) in output.iter_mut().enumerate() {
            *slot = input[bit_reverse(j, bits)];
        }
        self.run_stages(output);
    }

    /// Runs the transform in place.
    pub fn transform_in_place(&self, data: &mut [Complex<f32>]) {
        assert_eq!(data.len(), self.size);

        let bits = self.size.trailing_zeros();
        for i in 0..self.size {
            let j = bit_reverse(i, bits);
            if i < j {
                data.swap(i, j);
            }
        }
        self.run_stages(data);
    }

    fn run_stages(&self, out: &mut [Complex<f32>]) {
        let stages = self.size.trailing_zeros() as usize;
        stage0(out);
        if stages > 1 {
            stage1(out, self.direction);
        }
        for k in 2..stages {
            self.vector_stage(out, k);
        }
    }

    /// Stage `k`: for each lane-aligned offset within the stride, load the
    /// twiddle lane once, then for every block of `2 * stride` combine the
    /// lower and upper half-lanes in place.
    fn vector_stage(&self, out: &mut [Complex<f32>], k: usize) {
        let stride = 1 << k;
        let twiddles = &self.stage_twiddles[k - 2];
        debug_assert!(stride >= C32Lane::WIDTH);

        let mut j = 0;
        while j < stride {
            let w = C32Lane::load(&twiddles[j..]);
            let mut i = 0;
            while i < self.size {
                let lower = C32Lane::load(&out[i + j..]);
                let upper = C32Lane::load(&out[i + j + stride..]);
                let rotated = upper.mul(w);
                lower.add(rotated).store(&mut out[i + j..]);
                lower.sub(rotated).store(&mut out[i + j + stride..]);
                i += 2 * stride;
            }
            j += C32Lane::WIDTH;
        }
    }
}

/// Stage 0: twiddle is 1; plain sum/difference over adjacent pairs.
fn stage0(out: &mut [Complex<f32>]) {
    for pair in out.chunks_exact_mut(2) {
        let t = pair[1];
        pair[1] = pair[0] - t;
        pair[0] = pair[0] + t;
    }
}

/// Stage 1: twiddles are 1 and ∓i; the multiplication degenerates to a flip.
fn stage1(out: &mut [Complex<f32>], direction: Direction) {
    for block in out.chunks_exact_mut(4) {
        let a = block[0];
        let b = block[1];
        let c = block[2];
        let d = flip(block[3], direction);

        block[0] = a + c;
        block[1] = b + d;
        block[2] = a - c;
        block[3] = b - d;
    }
}
