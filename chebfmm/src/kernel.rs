//! Analytic kernel implementations and the string keyed kernel registry.
pub mod biot_savart;
pub mod helmholtz;
pub mod laplace;
pub mod registry;
pub mod stokes;
