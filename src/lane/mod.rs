//! Portable SIMD lane abstraction.
//!
//! A lane is a fixed-width register of scalar elements, manipulated only
//! through the operation set below; it carries no identity beyond its bit
//! contents. Exactly one backend is active per build, selected here by
//! compile-time feature detection with the widest instruction-set family
//! first; the scalar-array fallback satisfies the identical contract and is
//! always compiled, serving as the conformance reference for the others.
//!
//! Backends are not required to be bit-identical across architectures, only
//! to agree within floating-point reduction-order differences. In particular
//! the element *order* of [`Lane::hadd`]'s partial sums is backend-defined
//! (AVX interleaves its 128-bit halves); the value multiset and
//! [`Lane::reduce_add`] are not.

use num_complex::Complex;
use num_traits::Float;

pub mod fallback;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx"
))]
mod avx;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse3",
    not(target_feature = "avx")
))]
mod sse3;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
mod neon;

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "avx"
))]
pub use avx::{C32Lane, F32Lane, F64Lane};

#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse3",
    not(target_feature = "avx")
))]
pub use sse3::{C32Lane, F32Lane, F64Lane};

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use neon::{C32Lane, F32Lane, F64Lane};

#[cfg(not(any(
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse3"
    ),
    all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "avx"
    ),
    all(target_arch = "aarch64", target_feature = "neon")
)))]
pub use fallback::{C32Lane, F32Lane, F64Lane};

/// Arithmetic over a register of `WIDTH` scalar elements.
pub trait Lane: Copy {
    type Scalar: Copy;

    /// Number of scalar elements per register.
    const WIDTH: usize;

    fn zero() -> Self;

    /// Broadcasts one scalar into every element.
    fn splat(value: Self::Scalar) -> Self;

    /// Loads the first `WIDTH` elements of `src`. Panics if `src` is shorter.
    fn load(src: &[Self::Scalar]) -> Self;

    /// Stores into the first `WIDTH` elements of `dst`. Panics if `dst` is
    /// shorter.
    fn store(self, dst: &mut [Self::Scalar]);

    fn add(self, rhs: Self) -> Self;

    fn sub(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;

    /// Elementwise square.
    fn sqr(self) -> Self;

    /// Elementwise square root.
    fn sqrt(self) -> Self;

    /// Pairwise-sum fold: a lane holding the partial sums of adjacent
    /// element pairs of `self` and `rhs`. Element order is backend-defined.
    fn hadd(self, rhs: Self) -> Self;

    /// Full horizontal sum to a scalar.
    fn reduce_add(self) -> Self::Scalar;

    /// True if any element of `self` exceeds the matching element of `rhs`.
    fn any_greater_than(self, rhs: Self) -> bool;
}

/// Arithmetic over a register of `WIDTH` complex single-precision elements.
///
/// `mul` is complex multiplication: the SIMD backends implement it with a
/// real/imaginary shuffle-and-combine, not elementwise scalar products.
pub trait ComplexLane: Copy {
    const WIDTH: usize;

    fn zero() -> Self;

    fn splat(value: Complex<f32>) -> Self;

    fn load(src: &[Complex<f32>]) -> Self;

    fn store(self, dst: &mut [Complex<f32>]);

    fn add(self, rhs: Self) -> Self;

    fn sub(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;
}

/// Maps a scalar type to the active backend's lane type, for generic
/// consumers.
pub trait LaneScalar: Float {
    type Lane: Lane<Scalar = Self>;
}

impl LaneScalar for f32 {
    type Lane = F32Lane;
}

impl LaneScalar for f64 {
    type Lane = F64Lane;
}

#[cfg(test)]
mod tests {
    use super::fallback::{ScalarComplexLane, ScalarLane};
    use super::*;
    use crate::test_utils::assert_float_closeness;

    macro_rules! lane_conformance {
        ($name:ident, $lane:ty, $scalar:ty) => {
            #[test]
            fn $name() {
                const W: usize = <$lane as Lane>::WIDTH;
                let a: Vec<$scalar> = (0..W).map(|i| i as $scalar + 1.5).collect();
                let b: Vec<$scalar> = (0..W).map(|i| (i as $scalar) * 0.25 + 0.5).collect();

                let la = <$lane>::load(&a);
                let lb = <$lane>::load(&b);

                let mut out = vec![0.0 as $scalar; W];
                la.store(&mut out);
                assert_eq!(out, a);

                la.add(lb).store(&mut out);
                for i in 0..W {
                    assert_float_closeness(out[i], a[i] + b[i], 1e-6);
                }

                la.sub(lb).store(&mut out);
                for i in 0..W {
                    assert_float_closeness(out[i], a[i] - b[i], 1e-6);
                }

                la.mul(lb).store(&mut out);
                for i in 0..W {
                    assert_float_closeness(out[i], a[i] * b[i], 1e-6);
                }

                la.sqr().store(&mut out);
                for i in 0..W {
                    assert_float_closeness(out[i], a[i] * a[i], 1e-6);
                }

                la.sqrt().store(&mut out);
                for i in 0..W {
                    assert_float_closeness(out[i], a[i].sqrt(), 1e-6);
                }

                // hadd: the partial-sum multiset is fixed even though the
                // element order is backend-defined.
                la.hadd(lb).store(&mut out);
                let mut got = out.clone();
                let mut expected: Vec<$scalar> = a
                    .chunks_exact(2)
                    .map(|p| p[0] + p[1])
                    .chain(b.chunks_exact(2).map(|p| p[0] + p[1]))
                    .collect();
                got.sort_by(|x, y| x.partial_cmp(y).unwrap());
                expected.sort_by(|x, y| x.partial_cmp(y).unwrap());
                for (g, e) in got.iter().zip(expected.iter()) {
                    assert_float_closeness(*g, *e, 1e-6);
                }

                let naive: $scalar = a.iter().sum();
                assert_float_closeness(la.reduce_add(), naive, 1e-5);

                <$lane>::zero().store(&mut out);
                assert!(out.iter().all(|v| *v == 0.0));

                <$lane>::splat(3.25).store(&mut out);
                assert!(out.iter().all(|v| *v == 3.25));

                assert!(la.any_greater_than(lb));
                assert!(!lb.any_greater_than(la));
                assert!(!la.any_greater_than(la));
            }
        };
    }

    lane_conformance!(active_f32_lane, F32Lane, f32);
    lane_conformance!(active_f64_lane, F64Lane, f64);
    lane_conformance!(fallback_f32_lane, ScalarLane<f32, 4>, f32);
    lane_conformance!(fallback_f64_lane, ScalarLane<f64, 2>, f64);

    macro_rules! complex_lane_conformance {
        ($name:ident, $lane:ty) => {
            #[test]
            fn $name() {
                const W: usize = <$lane as ComplexLane>::WIDTH;
                let a: Vec<Complex<f32>> = (0..W)
                    .map(|i| Complex::new(i as f32 + 1.0, -(i as f32) - 0.5))
                    .collect();
                let b: Vec<Complex<f32>> = (0..W)
                    .map(|i| Complex::new(0.5 - i as f32, i as f32 * 2.0))
                    .collect();

                let la = <$lane>::load(&a);
                let lb = <$lane>::load(&b);

                let mut out = vec![Complex::new(0.0_f32, 0.0); W];
                la.store(&mut out);
                assert_eq!(out, a);

                la.add(lb).store(&mut out);
                for i in 0..W {
                    let expected = a[i] + b[i];
                    assert_float_closeness(out[i].re, expected.re, 1e-6);
                    assert_float_closeness(out[i].im, expected.im, 1e-6);
                }

                la.sub(lb).store(&mut out);
                for i in 0..W {
                    let expected = a[i] - b[i];
                    assert_float_closeness(out[i].re, expected.re, 1e-6);
                    assert_float_closeness(out[i].im, expected.im, 1e-6);
                }

                la.mul(lb).store(&mut out);
                for i in 0..W {
                    let expected = a[i] * b[i];
                    assert_float_closeness(out[i].re, expected.re, 1e-5);
                    assert_float_closeness(out[i].im, expected.im, 1e-5);
                }

                let z = Complex::new(1.5_f32, -2.5);
                <$lane>::splat(z).store(&mut out);
                assert!(out.iter().all(|v| *v == z));

                <$lane>::zero().store(&mut out);
                assert!(out.iter().all(|v| v.re == 0.0 && v.im == 0.0));
            }
        };
    }

    complex_lane_conformance!(active_c32_lane, C32Lane);
    complex_lane_conformance!(fallback_c32_lane, ScalarComplexLane<2>);
}
