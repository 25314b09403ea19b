//! Chebyshev polynomial utilities, quadrature rules and the singular
//! integration operator used to precompute near field interaction matrices.
pub mod integ;
pub mod polynomial;
pub mod quadrature;
