//! Portable scalar-array backend.
//!
//! Always compiled; active when no instruction-set backend applies. The
//! widths mirror a 128-bit register so the vectorized transform path stays
//! exercised on every target.

use num_complex::Complex;
use num_traits::Float;

use super::{ComplexLane, Lane};

pub type F32Lane = ScalarLane<f32, 4>;
pub type F64Lane = ScalarLane<f64, 2>;
pub type C32Lane = ScalarComplexLane<2>;

#[derive(Copy, Clone, Debug)]
pub struct ScalarLane<T, const W: usize>([T; W]);

impl<T: Float, const W: usize> Lane for ScalarLane<T, W> {
    type Scalar = T;

    const WIDTH: usize = W;

    #[inline]
    fn zero() -> Self {
        Self([T::zero(); W])
    }

    #[inline]
    fn splat(value: T) -> Self {
        Self([value; W])
    }

    #[inline]
    fn load(src: &[T]) -> Self {
        let mut lane = [T::zero(); W];
        lane.copy_from_slice(&src[..W]);
        Self(lane)
    }

    #[inline]
    fn store(self, dst: &mut [T]) {
        dst[..W].copy_from_slice(&self.0);
    }

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a + *b;
        }
        self
    }

    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a - *b;
        }
        self
    }

    #[inline]
    fn mul(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a * *b;
        }
        self
    }

    #[inline]
    fn sqr(mut self) -> Self {
        for a in self.0.iter_mut() {
            *a = *a * *a;
        }
        self
    }

    #[inline]
    fn sqrt(mut self) -> Self {
        for a in self.0.iter_mut() {
            *a = a.sqrt();
        }
        self
    }

    #[inline]
    fn hadd(self, rhs: Self) -> Self {
        let mut out = [T::zero(); W];
        for i in 0..W / 2 {
            out[i] = self.0[2 * i] + self.0[2 * i + 1];
            out[i + W / 2] = rhs.0[2 * i] + rhs.0[2 * i + 1];
        }
        Self(out)
    }

    #[inline]
    fn reduce_add(self) -> T {
        self.0.iter().fold(T::zero(), |acc, v| acc + *v)
    }

    #[inline]
    fn any_greater_than(self, rhs: Self) -> bool {
        self.0.iter().zip(rhs.0.iter()).any(|(a, b)| *a > *b)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct ScalarComplexLane<const W: usize>([Complex<f32>; W]);

impl<const W: usize> ComplexLane for ScalarComplexLane<W> {
    const WIDTH: usize = W;

    #[inline]
    fn zero() -> Self {
        Self([Complex::new(0.0, 0.0); W])
    }

    #[inline]
    fn splat(value: Complex<f32>) -> Self {
        Self([value; W])
    }

    #[inline]
    fn load(src: &[Complex<f32>]) -> Self {
        let mut lane = [Complex::new(0.0, 0.0); W];
        lane.copy_from_slice(&src[..W]);
        Self(lane)
    }

    #[inline]
    fn store(self, dst: &mut [Complex<f32>]) {
        dst[..W].copy_from_slice(&self.0);
    }

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a + *b;
        }
        self
    }

    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a - *b;
        }
        self
    }

    #[inline]
    fn mul(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = *a * *b;
        }
        self
    }
}
