//! # Chebyshev and kernel machinery for fast multipole methods (ChebFMM)
//!
//! Building blocks for FMM style solvers that precompute their interaction
//! operators on tensor product Chebyshev grids. The crate provides:
//!
//! * A family of analytic kernels (Laplace, Stokes, Biot-Savart, Helmholtz)
//!   behind a common evaluation trait, together with a string keyed registry
//!   for selecting them at runtime.
//! * Chebyshev polynomial evaluation, interpolation nodes and quadrature
//!   rules, and the singular integration operator that integrates a kernel
//!   against every tensor product basis function over a box.
//! * A cache for precomputed translation and interpolation operator matrices
//!   keyed by operator class, octree level and interaction index, with an
//!   optional scale invariant storage mode.
//!
//! With the `python` feature enabled the crate also builds as a Python
//! extension module exposing the Chebyshev utilities and the operator cache
//! over numpy arrays.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod cheb;
pub mod kernel;
pub mod precomp;
#[cfg(feature = "python")]
pub mod python;
pub mod traits;

// Public API
#[doc(inline)]
pub use cheb::integ::integ;
#[doc(inline)]
pub use cheb::polynomial::cheb_poly;
#[doc(inline)]
pub use kernel::registry::kernel_from_desc;
#[doc(inline)]
pub use kernel::registry::KernelKind;
#[doc(inline)]
pub use precomp::PrecompMat;
