//! Hann window.

use num_traits::{Float, FloatConst};

/// Hann window of a fixed length, with the coefficient cache built once at
/// construction.
pub struct HannWindow<T> {
    cache: Box<[T]>,
}

impl<T: Float + FloatConst> HannWindow<T> {
    pub fn new(size: usize) -> Self {
        let tau = T::PI() + T::PI();
        let n = T::from(size).unwrap();
        let two = T::from(2.0).unwrap();
        let cache = (0..size)
            .map(|i| {
                let position = T::from(i).unwrap() / n;
                (T::one() - (position * tau).cos()) / two
            })
            .collect();
        Self { cache }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Multiplies `input` by the window into `output`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer length differs from the window length.
    pub fn apply(&self, input: &[T], output: &mut [T]) {
        assert_eq!(input.len(), self.cache.len());
        assert_eq!(output.len(), self.cache.len());
        apply_window(&self.cache, input, output);
    }

    /// Energy correction factor for spectra of windowed frames.
    pub fn norm_correction() -> T {
        T::from(0.5).unwrap()
    }
}

#[multiversion::multiversion(targets(
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    "aarch64+neon",
))]
#[inline]
fn apply_window<T: Float>(cache: &[T], input: &[T], output: &mut [T]) {
    for ((o, w), v) in output.iter_mut().zip(cache.iter()).zip(input.iter()) {
        *o = *w * *v;
    }
}
