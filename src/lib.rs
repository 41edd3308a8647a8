//! Fixed-size Fourier-transform primitives with a portable SIMD lane
//! abstraction.
//!
//! The crate provides three transform engines and the pieces they are built
//! from:
//!
//! - [`Fft`]: a recursive mixed-radix (8/4/2) complex FFT for power-of-two
//!   sizes, driven by a twiddle table built once per engine.
//! - [`RealFft`]: a length-N real transform over the half-size complex
//!   engine, storing only the `N/2 + 1` unique Hermitian bins.
//! - [`SimdFft`]: an iterative radix-2 alternative that sweeps the whole
//!   buffer stage by stage through the [`lane`] abstraction.
//!
//! All engines are immutable after construction, allocation-free during a
//! transform call, and unnormalized: a forward/inverse round trip scales the
//! input by the transform length. Precondition violations (wrong sizes,
//! mismatched buffer lengths, wrong direction) panic.
//!
//! [`Autocorrelation`], [`HannWindow`] and the [`math`] utilities are small
//! consumers of the engines for spectral analysis pipelines.

mod acf;
mod butterflies;
mod fft;
pub mod lane;
pub mod math;
mod real;
mod simd_fft;
#[cfg(test)]
pub(crate) mod test_utils;
mod twiddles;
mod window;

pub use acf::Autocorrelation;
pub use fft::Fft;
pub use real::RealFft;
pub use simd_fft::SimdFft;
pub use twiddles::Direction;
pub use window::HannWindow;
