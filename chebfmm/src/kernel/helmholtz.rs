//! Implementation of the Helmholtz kernel in a paired real representation
use num::traits::FloatConst;
use num::Float;
use num_complex::Complex;
use rlst::RlstScalar;

use crate::traits::kernel::{HomogenousKernel, Kernel};

/// Wavenumber assigned to Helmholtz kernels constructed through the kernel
/// registry, `20 pi`.
pub const DEFAULT_WAVENUMBER: f64 = 20.0 * std::f64::consts::PI;

/// Helmholtz potential kernel, `exp(i k rho) / (4 pi rho)`.
///
/// Source densities and target values carry paired (real, imaginary)
/// components, so the interaction block is the 2x2 real matrix
/// `[[Re g, Im g], [-Im g, Re g]]` of the complex multiplication by the
/// Green's function value `g`.
#[derive(Clone, Debug)]
pub struct HelmholtzKernel<T: RlstScalar> {
    wavenumber: T,
}

impl<T: RlstScalar> HelmholtzKernel<T> {
    /// Create a new kernel object for the given wavenumber.
    pub fn new(wavenumber: T) -> Self {
        Self { wavenumber }
    }

    /// Wavenumber of this kernel.
    pub fn wavenumber(&self) -> T {
        self.wavenumber
    }
}

impl<T> Kernel for HelmholtzKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "helmholtz_potential"
    }

    fn domain_component_count(&self) -> usize {
        2
    }

    fn range_component_count(&self) -> usize {
        2
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 4);
        let m_inv_4pi = T::from(0.25).unwrap() * T::FRAC_1_PI();

        let diff0 = target[0] - source[0];
        let diff1 = target[1] - source[1];
        let diff2 = target[2] - source[2];
        let diff_norm = Float::sqrt(diff0 * diff0 + diff1 * diff1 + diff2 * diff2);
        let inv_diff_norm = if diff_norm == T::zero() {
            T::zero()
        } else {
            T::one() / diff_norm
        };

        let g = Complex::from_polar(m_inv_4pi * inv_diff_norm, self.wavenumber * diff_norm);

        block[0] = g.re;
        block[1] = g.im;
        block[2] = -g.im;
        block[3] = g.re;
    }
}

impl<T> HomogenousKernel for HelmholtzKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        false
    }
}
