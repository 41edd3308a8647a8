//! Radix-2/4/8 butterfly kernels.
//!
//! A butterfly combines `radix` interleaved sub-transform blocks in place.
//! Block position `p` is expected to hold the sub-transform of the input
//! subsequence at offset `bit_reverse(p)`, which is the order both the
//! base-case gather and the recursion in [`crate::fft`] produce; the twiddle
//! exponent patterns below (2,1,3 and 4,2,6,1,5,3,7) assume it.
//!
//! Twiddle multiplications are skipped at butterfly index 0 (the factor is 1),
//! and every twiddle that is exactly `±i` is applied as a [`flip`] instead of
//! a general complex multiplication.

use num_complex::Complex;
use num_traits::Float;

use crate::twiddles::Direction;

/// Rotation by ±90 degrees: forward maps `z` to `-i*z`, inverse to `i*z`.
#[inline(always)]
pub(crate) fn flip<T: Float>(value: Complex<T>, direction: Direction) -> Complex<T> {
    match direction {
        Direction::Forward => Complex::new(value.im, -value.re),
        Direction::Inverse => Complex::new(-value.im, value.re),
    }
}

/// Reverses the low `bits` bits of `value`.
#[inline(always)]
pub(crate) fn bit_reverse(value: usize, bits: u32) -> usize {
    debug_assert!(bits > 0);
    value.reverse_bits() >> (usize::BITS - bits)
}

/// Sum/difference of two slots: `(a, b) <- (a + b, a - b)`.
#[inline(always)]
fn scissors<T: Float>(out: &mut [Complex<T>], a: usize, b: usize) {
    let (x, y) = (out[a], out[b]);
    out[a] = x + y;
    out[b] = x - y;
}

/// Table lookup with the exponent folded into the table's half period:
/// entry `k + N/2` is the negation of entry `k`.
#[inline(always)]
fn twiddle<T: Float>(twiddles: &[Complex<T>], index: usize) -> Complex<T> {
    if index < twiddles.len() {
        twiddles[index]
    } else {
        -twiddles[index - twiddles.len()]
    }
}

/// Radix-2 butterfly over a block of `2m` values with stride `s`.
#[inline]
pub(crate) fn butterfly_radix2<T: Float>(
    out: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    stride: usize,
) {
    let m = out.len() / 2;
    scissors(out, 0, m);
    for i in 1..m {
        out[i + m] = out[i + m] * twiddles[i * stride];
        scissors(out, i, i + m);
    }
}

/// Radix-4 butterfly: two sum/difference rounds with the `±i` twiddle applied
/// as a flip.
#[inline]
pub(crate) fn butterfly_radix4<T: Float>(
    out: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    stride: usize,
    direction: Direction,
) {
    let m = out.len() / 4;
    for i in 0..m {
        if i > 0 {
            out[i + m] = out[i + m] * twiddle(twiddles, 2 * i * stride);
            out[i + 2 * m] = out[i + 2 * m] * twiddle(twiddles, i * stride);
            out[i + 3 * m] = out[i + 3 * m] * twiddle(twiddles, 3 * i * stride);
        }
        scissors(out, i, i + m);
        scissors(out, i + 2 * m, i + 3 * m);
        scissors(out, i, i + 2 * m);
        out[i + 3 * m] = flip(out[i + 3 * m], direction);
        scissors(out, i + m, i + 3 * m);
    }
}

/// Radix-8 butterfly: three sum/difference rounds exploiting the 0, 45 and
/// 90 degree special angles, so only the 45 degree factor `twiddles[m*s]`
/// needs a general multiplication on the special lanes.
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
pub(crate) fn butterfly_radix8<T: Float>(
    out: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    stride: usize,
    direction: Direction,
) {
    let m = out.len() / 8;
    let eighth = twiddles[m * stride];
    for i in 0..m {
        if i > 0 {
            out[i + m] = out[i + m] * twiddle(twiddles, 4 * i * stride);
            out[i + 2 * m] = out[i + 2 * m] * twiddle(twiddles, 2 * i * stride);
            out[i + 3 * m] = out[i + 3 * m] * twiddle(twiddles, 6 * i * stride);
            out[i + 4 * m] = out[i + 4 * m] * twiddle(twiddles, i * stride);
            out[i + 5 * m] = out[i + 5 * m] * twiddle(twiddles, 5 * i * stride);
            out[i + 6 * m] = out[i + 6 * m] * twiddle(twiddles, 3 * i * stride);
            out[i + 7 * m] = out[i + 7 * m] * twiddle(twiddles, 7 * i * stride);
        }

        scissors(out, i, i + m);
        scissors(out, i + 2 * m, i + 3 * m);
        scissors(out, i + 4 * m, i + 5 * m);
        scissors(out, i + 6 * m, i + 7 * m);

        out[i + 3 * m] = flip(out[i + 3 * m], direction);
        out[i + 5 * m] = out[i + 5 * m] * eighth;
        out[i + 7 * m] = out[i + 7 * m] * eighth;
        out[i + 7 * m] = flip(out[i + 7 * m], direction);

        scissors(out, i, i + 2 * m);
        scissors(out, i + m, i + 3 * m);
        scissors(out, i + 4 * m, i + 6 * m);
        scissors(out, i + 5 * m, i + 7 * m);

        out[i + 6 * m] = flip(out[i + 6 * m], direction);
        out[i + 7 * m] = flip(out[i + 7 * m], direction);

        scissors(out, i, i + 4 * m);
        scissors(out, i + m, i + 5 * m);
        scissors(out, i + 2 * m, i + 6 * m);
        scissors(out, i + 3 * m, i + 7 * m);
    }
}
