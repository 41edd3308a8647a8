//! Lane-accelerated reductions and small spectral utilities.
//!
//! The reductions walk the bulk of the data a lane at a time and fold the
//! remainder in scalar code; everything is a pure function of its inputs.

use num_complex::Complex;
use num_traits::Float;

use crate::lane::{Lane, LaneScalar};

/// Sum of all elements.
pub fn sum<T: LaneScalar>(data: &[T]) -> T {
    let mut chunks = data.chunks_exact(T::Lane::WIDTH);
    let mut acc = T::Lane::zero();
    for chunk in chunks.by_ref() {
        acc = acc.add(T::Lane::load(chunk));
    }
    let mut total = acc.reduce_add();
    for v in chunks.remainder() {
        total = total + *v;
    }
    total
}

/// Sum of squared elements.
pub fn sum_of_squares<T: LaneScalar>(data: &[T]) -> T {
    let mut chunks = data.chunks_exact(T::Lane::WIDTH);
    let mut acc = T::Lane::zero();
    for chunk in chunks.by_ref() {
        acc = acc.add(T::Lane::load(chunk).sqr());
    }
    let mut total = acc.reduce_add();
    for v in chunks.remainder() {
        total = total + *v * *v;
    }
    total
}

/// Arithmetic mean.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn mean<T: LaneScalar>(data: &[T]) -> T {
    assert!(!data.is_empty());
    sum(data) / T::from(data.len()).unwrap()
}

/// True if any element exceeds `limit`.
pub fn any_above<T: LaneScalar>(data: &[T], limit: T) -> bool {
    let limit_lane = T::Lane::splat(limit);
    let mut chunks = data.chunks_exact(T::Lane::WIDTH);
    for chunk in chunks.by_ref() {
        if T::Lane::load(chunk).any_greater_than(limit_lane) {
            return true;
        }
    }
    chunks.remainder().iter().any(|v| *v > limit)
}

/// Replaces every bin with its squared magnitude (imaginary part zeroed).
pub fn power_spectrum_in_place<T: Float>(spectrum: &mut [Complex<T>]) {
    for bin in spectrum.iter_mut() {
        *bin = Complex::new(bin.norm_sqr(), T::zero());
    }
}

/// Magnitudes of a complex spectrum: squared magnitudes first, then a
/// lane-wide square-root pass.
///
/// # Panics
///
/// Panics if the buffer lengths differ.
pub fn magnitudes<T: LaneScalar>(spectrum: &[Complex<T>], out: &mut [T]) {
    assert_eq!(spectrum.len(), out.len());
    for (v, bin) in out.iter_mut().zip(spectrum.iter()) {
        *v = bin.norm_sqr();
    }
    let mut chunks = out.chunks_exact_mut(T::Lane::WIDTH);
    for chunk in chunks.by_ref() {
        T::Lane::load(chunk).sqrt().store(chunk);
    }
    for v in chunks.into_remainder() {
        *v = v.sqrt();
    }
}

/// Scales so the positive parts sum to one.
///
/// # Panics
///
/// Panics if the buffer lengths differ.
pub fn normalize<T: Float>(input: &[T], output: &mut [T]) {
    assert_eq!(input.len(), output.len());
    let total = input
        .iter()
        .fold(T::zero(), |acc, v| acc + v.max(T::zero()));
    for (o, v) in output.iter_mut().zip(input.iter()) {
        *o = *v / total;
    }
}

/// Subtracts a sliding-window mean and clamps at zero:
/// `out[i] = max(in[i] - mean(window_i), 0)`, with the window spanning
/// `radius` elements on either side, clipped at the edges.
///
/// # Panics
///
/// Panics if the buffer lengths differ or `radius` is zero.
pub fn adaptive_threshold<T: LaneScalar>(input: &[T], output: &mut [T], radius: usize) {
    assert_eq!(input.len(), output.len());
    assert!(radius > 0);
    let n = input.len();

    for i in 0..n {
        let offset = i.saturating_sub(radius);
        let count = (n - offset).min(2 * radius).min(i + radius);
        let threshold = mean(&input[offset..offset + count]);
        output[i] = (input[i] - threshold).max(T::zero());
    }
}

/// Multi-stage comb filter: accumulates windowed means of every
/// whole-multiple downsampling of the input into the output.
///
/// # Panics
///
/// Panics if `input.len()` is not a non-zero multiple of `output.len()`.
pub fn comb_filter<T: LaneScalar>(input: &[T], output: &mut [T]) {
    assert!(!output.is_empty());
    assert!(input.len() >= output.len());
    assert_eq!(input.len() % output.len(), 0);
    let stage = input.len() / output.len();

    if stage > 1 {
        comb_filter(&input[..input.len() - output.len()], output);
    } else {
        for v in output.iter_mut() {
            *v = T::zero();
        }
    }

    for i in 1..output.len() {
        let start = stage * (i - 1) + 1;
        let window = &input[start..start + 2 * stage - 1];
        output[i] = output[i] + mean(window);
    }
}
