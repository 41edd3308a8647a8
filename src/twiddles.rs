//! Twiddle-factor tables.
//!
//! Every engine owns one immutable table of unit-modulus rotation factors,
//! built once at construction and shared read-only across any number of
//! transform calls.

use num_complex::Complex;
use num_traits::{Float, FloatConst};

/// Transform direction.
///
/// `Forward` rotates twiddles clockwise (negative angles), `Inverse`
/// counter-clockwise. Neither direction applies any `1/N` scaling, so
/// `inverse(forward(x)) == N * x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Angle step of a table spanning `n` points.
    pub(crate) fn step<T: Float + FloatConst>(self, n: usize) -> T {
        let tau = T::PI() + T::PI();
        let step = tau / T::from(n).unwrap();
        match self {
            Direction::Forward => -step,
            Direction::Inverse => step,
        }
    }
}

/// Builds the `n/2` rotation factors `e^(i * step * k)` for an engine of
/// size `n`.
pub(crate) fn generate_twiddles<T: Float + FloatConst>(
    n: usize,
    direction: Direction,
) -> Box<[Complex<T>]> {
    let step = direction.step::<T>(n);
    (0..n / 2)
        .map(|k| Complex::from_polar(T::one(), step * T::from(k).unwrap()))
        .collect()
}

/// Builds the real-wrapper table: the same `n/2` factors advanced by `n/4`
/// steps, so entry `k` is `e^(i * step * (k + n/4))`.
pub(crate) fn generate_packed_twiddles<T: Float + FloatConst>(
    n: usize,
    direction: Direction,
) -> Box<[Complex<T>]> {
    let step = direction.step::<T>(n);
    (0..n / 2)
        .map(|k| Complex::from_polar(T::one(), step * T::from(k + n / 4).unwrap()))
        .collect()
}
