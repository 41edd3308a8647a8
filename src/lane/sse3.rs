//! SSE3 backend: 128-bit registers, 4×f32 / 2×f64 / 2×Complex<f32>.
//!
//! Only compiled when `sse3` is statically enabled for the target, so every
//! intrinsic call is sound.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use num_complex::Complex;

use super::{ComplexLane, Lane};

#[derive(Copy, Clone)]
pub struct F32Lane(__m128);

#[derive(Copy, Clone)]
pub struct F64Lane(__m128d);

#[derive(Copy, Clone)]
pub struct C32Lane(__m128);

impl Lane for F32Lane {
    type Scalar = f32;

    const WIDTH: usize = 4;

    #[inline]
    fn zero() -> Self {
        // SAFETY: the module is only compiled with sse3 statically enabled.
        Self(unsafe { _mm_setzero_ps() })
    }

    #[inline]
    fn splat(value: f32) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_set1_ps(value) })
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned load.
        Self(unsafe { _mm_loadu_ps(src.as_ptr()) })
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned store.
        unsafe { _mm_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_mul_ps(self.0, rhs.0) })
    }

    #[inline]
    fn sqr(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_mul_ps(self.0, self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_sqrt_ps(self.0) })
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_hadd_ps(self.0, rhs.0) })
    }

    #[inline]
    fn reduce_add(self) -> f32 {
        // SAFETY: as above.
        unsafe {
            let sums = _mm_hadd_ps(self.0, self.0);
            _mm_cvtss_f32(_mm_hadd_ps(sums, sums))
        }
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        // SAFETY: as above.
        unsafe { _mm_movemask_ps(_mm_cmpgt_ps(self.0, rhs.0)) != 0 }
    }
}

impl Lane for F64Lane {
    type Scalar = f64;

    const WIDTH: usize = 2;

    #[inline]
    fn zero() -> Self {
        // SAFETY: the module is only compiled with sse3 statically enabled.
        Self(unsafe { _mm_setzero_pd() })
    }

    #[inline]
    fn splat(value: f64) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_set1_pd(value) })
    }

    #[inline]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned load.
        Self(unsafe { _mm_loadu_pd(src.as_ptr()) })
    }

    #[inline]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: length checked; unaligned store.
        unsafe { _mm_storeu_pd(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_add_pd(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_sub_pd(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_mul_pd(self.0, rhs.0) })
    }

    #[inline]
    fn sqr(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_mul_pd(self.0, self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_sqrt_pd(self.0) })
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_hadd_pd(self.0, rhs.0) })
    }

    #[inline]
    fn reduce_add(self) -> f64 {
        // SAFETY: as above.
        unsafe { _mm_cvtsd_f64(_mm_hadd_pd(self.0, self.0)) }
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        // SAFETY: as above.
        unsafe { _mm_movemask_pd(_mm_cmpgt_pd(self.0, rhs.0)) != 0 }
    }
}

impl ComplexLane for C32Lane {
    const WIDTH: usize = 2;

    #[inline]
    fn zero() -> Self {
        // SAFETY: the module is only compiled with sse3 statically enabled.
        Self(unsafe { _mm_setzero_ps() })
    }

    #[inline]
    fn splat(value: Complex<f32>) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_set_ps(value.im, value.re, value.im, value.re) })
    }

    #[inline]
    fn load(src: &[Complex<f32>]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; Complex<f32> is a repr(C) pair of f32.
        Self(unsafe { _mm_loadu_ps(src.as_ptr().cast::<f32>()) })
    }

    #[inline]
    fn store(self, dst: &mut [Complex<f32>]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: as for load.
        unsafe { _mm_storeu_ps(dst.as_mut_ptr().cast::<f32>(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_add_ps(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { _mm_sub_ps(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Duplicate the real and imaginary parts of rhs, multiply against
        // self and its re/im-swapped form, then fuse with addsub:
        // [ar*br - ai*bi, ai*br + ar*bi].
        // SAFETY: as above.
        unsafe {
            let b_re = _mm_moveldup_ps(rhs.0);
            let b_im = _mm_movehdup_ps(rhs.0);
            let direct = _mm_mul_ps(self.0, b_re);
            let swapped = _mm_shuffle_ps::<0b10_11_00_01>(self.0, self.0);
            let crossed = _mm_mul_ps(swapped, b_im);
            Self(_mm_addsub_ps(direct, crossed))
        }
    }
}
