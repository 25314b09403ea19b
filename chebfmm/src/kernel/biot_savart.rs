//! Implementation of the Biot-Savart kernel
use std::marker::PhantomData;

use num::traits::FloatConst;
use num::Float;
use rlst::RlstScalar;

use crate::traits::kernel::{HomogenousKernel, Kernel};

/// Biot-Savart kernel, `(j x r) / (4 pi rho^3)` for a point current density.
///
/// `block[b * 3 + a]` is target field component `a` induced by a unit current
/// in direction `b`.
#[derive(Clone, Default, Debug)]
pub struct BiotSavartKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> BiotSavartKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for BiotSavartKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "biot_savart"
    }

    fn domain_component_count(&self) -> usize {
        3
    }

    fn range_component_count(&self) -> usize {
        3
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 9);
        let m_inv_4pi = T::from(0.25).unwrap() * T::FRAC_1_PI();

        let diff = [
            target[0] - source[0],
            target[1] - source[1],
            target[2] - source[2],
        ];
        let diff_norm = Float::sqrt(diff[0] * diff[0] + diff[1] * diff[1] + diff[2] * diff[2]);
        let inv = if diff_norm == T::zero() {
            T::zero()
        } else {
            T::one() / diff_norm
        };
        let scale = m_inv_4pi * inv * inv * inv;

        // Rows are e_b x r for each unit current direction b.
        block[0] = T::zero();
        block[1] = -diff[2] * scale;
        block[2] = diff[1] * scale;

        block[3] = diff[2] * scale;
        block[4] = T::zero();
        block[5] = -diff[0] * scale;

        block[6] = -diff[1] * scale;
        block[7] = diff[0] * scale;
        block[8] = T::zero();
    }
}

impl<T> HomogenousKernel for BiotSavartKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}
