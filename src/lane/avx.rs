//! AVX backend: 256-bit registers, 8×f32 / 4×f64 / 4×Complex<f32>.
//!
//! Only compiled when `avx` is statically enabled for the target. The
//! horizontal reductions drop to 128-bit halves first; every AVX machine has
//! the SSE3 horizontal adds used there.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use num_complex::Complex;

use super::{ComplexLane, Lane};

#[derive(Copy, Clone)]
pub struct F32Lane(__m256);

#[derive(Copy, Clone)]
pub struct F64Lane(__m256d);

#[derive(Copy, Clone)]
pub struct C32Lane(__m256);

impl Lane for F32Lane {
    type Scalar = f32;

    const WIDTH: usize = 8;

    #[inline]
    fn zero() -> Self {
        // SAFETY: the module is only compiled with avx statically enabled.
        Self(unsafe { _mm256_setzero_ps() })
    }

    #[inline]
    fn splat(value: f32) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_set1_ps(value) })
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned load.
        Self(unsafe { _mm256_loadu_ps(src.as_ptr()) })
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned store.
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_add_ps(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_sub_ps(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_mul_ps(self.0, rhs.0) })
    }

    #[inline]
    fn sqr(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_mul_ps(self.0, self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_sqrt_ps(self.0) })
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_hadd_ps(self.0, rhs.0) })
    }

    #[inline]
    fn reduce_add(self) -> f32 {
        // SAFETY: as above.
        unsafe {
            let halves = _mm_add_ps(
                _mm256_castps256_ps128(self.0),
                _mm256_extractf128_ps::<1>(self.0),
            );
            let sums = _mm_hadd_ps(halves, halves);
            _mm_cvtss_f32(_mm_hadd_ps(sums, sums))
        }
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        // SAFETY: as above.
        unsafe { _mm256_movemask_ps(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) != 0 }
    }
}

impl Lane for F64Lane {
    type Scalar = f64;

    const WIDTH: usize = 4;

    #[inline]
    fn zero() -> Self {
        // SAFETY: the module is only compiled with avx statically enabled.
        Self(unsafe { _mm256_setzero_pd() })
    }

    #[inline]
    fn splat(value: f64) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_set1_pd(value) })
    }

    #[inline]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned load.
        Self(unsafe { _mm256_loadu_pd(src.as_ptr()) })
    }

    #[inline]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned store.
        unsafe { _mm256_storeu_pd(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_add_pd(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_sub_pd(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_mul_pd(self.0, rhs.0) })
    }

    #[inline]
    fn sqr(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_mul_pd(self.0, self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_sqrt_pd(self.0) })
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_hadd_pd(self.0, rhs.0) })
    }

    #[inline]
    fn reduce_add(self) -> f64 {
        // SAFETY: as above.
        unsafe {
            let halves = _mm_add_pd(
                _mm256_castpd256_pd128(self.0),
                _mm256_extractf128_pd::<1>(self.0),
            );
            _mm_cvtsd_f64(_mm_hadd_pd(halves, halves))
        }
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        // SAFETY: as above.
        unsafe { _mm256_movemask_pd(_mm256_cmp_pd::<_CMP_GT_OQ>(self.0, rhs.0)) != 0 }
    }
}

impl ComplexLane for C32Lane {
    const WIDTH: usize = 4;

    #[inline]
    fn zero() -> Self {
        // SAFETY: the module is only compiled with avx statically enabled.
        Self(unsafe { _mm256_setzero_ps() })
    }

    #[inline]
    fn splat(value: Complex<f32>) -> Self {
        // SAFETY: as above.
        Self(unsafe {
            _mm256_set_ps(
                value.im, value.re, value.im, value.re, value.im, value.re, value.im, value.re,
            )
        })
    }

    #[inline]
    fn load(src: &[Complex<f32>]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; Complex<f32> is a repr(C) pair of f32.
        Self(unsafe { _mm256_loadu_ps(src.as_ptr().cast::<f32>()) })
    }

    #[inline]
    fn store(self, dst: &mut [Complex<f32>]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: as for load.
        unsafe { _mm256_storeu_ps(dst.as_mut_ptr().cast::<f32>(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_add_ps(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm256_sub_ps(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Same shuffle-and-combine as the 128-bit backend; the in-lane
        // permute keeps every re/im pair inside its half.
        // SAFETY: as above.
        unsafe {
            let b_re = _mm256_moveldup_ps(rhs.0);
            let b_im = _mm256_movehdup_ps(rhs.0);
            let direct = _mm256_mul_ps(self.0, b_re);
            let swapped = _mm256_permute_ps::<0b10_11_00_01>(self.0);
            let crossed = _mm256_mul_ps(swapped, b_im);
            Self(_mm256_addsub_ps(direct, crossed))
        }
    }
}
