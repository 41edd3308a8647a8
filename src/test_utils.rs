//! Helpers shared by the inline test modules.

use num_complex::Complex;
use num_traits::Float;
use rand::distributions::Uniform;
use rand::prelude::*;

/// Asserts that two fp numbers are approximately equal.
///
/// # Panics
///
/// Panics if `actual` and `expected` are too far from each other.
#[track_caller]
pub fn assert_float_closeness<T: Float + std::fmt::Display>(actual: T, expected: T, epsilon: T) {
    if (actual - expected).abs() >= epsilon {
        panic!(
            "Assertion failed: {actual} too far from expected value {expected} (with epsilon {epsilon})",
        );
    }
}

/// Uniform random real samples in `[-1, 1)`.
pub fn gen_random_signal(size: usize) -> Vec<f64> {
    let mut rng = thread_rng();
    let uniform = Uniform::new(-1.0, 1.0);
    (0..size).map(|_| uniform.sample(&mut rng)).collect()
}

/// Uniform random complex samples with both parts in `[-1, 1)`.
pub fn gen_random_spectrum(size: usize) -> Vec<Complex<f64>> {
    let mut rng = thread_rng();
    let uniform = Uniform::new(-1.0, 1.0);
    (0..size)
        .map(|_| Complex::new(uniform.sample(&mut rng), uniform.sample(&mut rng)))
        .collect()
}
