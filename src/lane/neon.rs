//! NEON backend (aarch64): 128-bit registers, 4×f32 / 2×f64 / 2×Complex<f32>.
//!
//! NEON is baseline on aarch64, so this backend is active whenever the crate
//! is built for that architecture.

use core::arch::aarch64::*;

use num_complex::Complex;

use super::{ComplexLane, Lane};

#[derive(Copy, Clone)]
pub struct F32Lane(float32x4_t);

#[derive(Copy, Clone)]
pub struct F64Lane(float64x2_t);

#[derive(Copy, Clone)]
pub struct C32Lane(float32x4_t);

impl Lane for F32Lane {
    type Scalar = f32;

    const WIDTH: usize = 4;

    #[inline]
    fn zero() -> Self {
        // SAFETY: neon is baseline on aarch64.
        Self(unsafe { vdupq_n_f32(0.0) })
    }

    #[inline]
    fn splat(value: f32) -> Self {
        // SAFETY: as above.
        Self(unsafe { vdupq_n_f32(value) })
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked.
        Self(unsafe { vld1q_f32(src.as_ptr()) })
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: length checked.
        unsafe { vst1q_f32(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vmulq_f32(self.0, rhs.0) })
    }

    #[inline]
    fn sqr(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vmulq_f32(self.0, self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vsqrtq_f32(self.0) })
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vpaddq_f32(self.0, rhs.0) })
    }

    #[inline]
    fn reduce_add(self) -> f32 {
        // SAFETY: as above.
        unsafe { vaddvq_f32(self.0) }
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        // SAFETY: as above.
        unsafe { vmaxvq_u32(vcgtq_f32(self.0, rhs.0)) != 0 }
    }
}

impl Lane for F64Lane {
    type Scalar = f64;

    const WIDTH: usize = 2;

    #[inline]
    fn zero() -> Self {
        // SAFETY: neon is baseline on aarch64.
        Self(unsafe { vdupq_n_f64(0.0) })
    }

    #[inline]
    fn splat(value: f64) -> Self {
        // SAFETY: as above.
        Self(unsafe { vdupq_n_f64(value) })
    }

    #[inline]
    fn load(src: &[f64]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked.
        Self(unsafe { vld1q_f64(src.as_ptr()) })
    }

    #[inline]
    fn store(self, dst: &mut [f64]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: length checked.
        unsafe { vst1q_f64(dst.as_mut_ptr(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vaddq_f64(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vsubq_f64(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vmulq_f64(self.0, rhs.0) })
    }

    #[inline]
    fn sqr(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vmulq_f64(self.0, self.0) })
    }

    #[inline]
    fn sqrt(self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vsqrtq_f64(self.0) })
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vpaddq_f64(self.0, rhs.0) })
    }

    #[inline]
    fn reduce_add(self) -> f64 {
        // SAFETY: as above.
        unsafe { vaddvq_f64(self.0) }
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        // SAFETY: as above.
        unsafe {
            let mask = vcgtq_f64(self.0, rhs.0);
            (vgetq_lane_u64::<0>(mask) | vgetq_lane_u64::<1>(mask)) != 0
        }
    }
}

impl ComplexLane for C32Lane {
    const WIDTH: usize = 2;

    #[inline]
    fn zero() -> Self {
        // SAFETY: neon is baseline on aarch64.
        Self(unsafe { vdupq_n_f32(0.0) })
    }

    #[inline]
    fn splat(value: Complex<f32>) -> Self {
        let pair = [value.re, value.im, value.re, value.im];
        // SAFETY: as above.
        Self(unsafe { vld1q_f32(pair.as_ptr()) })
    }

    #[inline]
    fn load(src: &[Complex<f32>]) -> Self {
        assert!(src.len() >= Self::WIDTH);
        // SAFETY: length checked; Complex<f32> is a repr(C) pair of f32.
        Self(unsafe { vld1q_f32(src.as_ptr().cast::<f32>()) })
    }

    #[inline]
    fn store(self, dst: &mut [Complex<f32>]) {
        assert!(dst.len() >= Self::WIDTH);
        // SAFETY: as for load.
        unsafe { vst1q_f32(dst.as_mut_ptr().cast::<f32>(), self.0) }
    }

    #[inline]
    fn add(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vaddq_f32(self.0, rhs.0) })
    }

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        // SAFETY: as above.
        Self(unsafe { vsubq_f32(self.0, rhs.0) })
    }

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        const SIGN: [f32; 4] = [-1.0, 1.0, -1.0, 1.0];
        // Duplicate rhs real/imaginary parts, multiply against self and its
        // re/im-swapped form, then recombine with alternating signs:
        // [ar*br - ai*bi, ai*br + ar*bi].
        // SAFETY: as above.
        unsafe {
            let b_re = vtrn1q_f32(rhs.0, rhs.0);
            let b_im = vtrn2q_f32(rhs.0, rhs.0);
            let direct = vmulq_f32(self.0, b_re);
            let swapped = vrev64q_f32(self.0);
            let crossed = vmulq_f32(swapped, b_im);
            Self(vfmaq_f32(direct, crossed, vld1q_f32(SIGN.as_ptr())))
        }
    }
}
