//! Implementation of the Stokes kernels for a unit viscosity fluid
use std::marker::PhantomData;

use num::traits::FloatConst;
use num::Float;
use rlst::RlstScalar;

use crate::traits::kernel::{HomogenousKernel, Kernel};

/// Stokeslet velocity kernel, `(delta_ij / rho + r_i r_j / rho^3) / (8 pi)`.
#[derive(Clone, Default, Debug)]
pub struct StokesVelocityKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> StokesVelocityKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for StokesVelocityKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "stokes_velocity"
    }

    fn domain_component_count(&self) -> usize {
        3
    }

    fn range_component_count(&self) -> usize {
        3
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 9);
        let m_inv_8pi = T::from(0.125).unwrap() * T::FRAC_1_PI();

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
        let inv3 = inv * inv * inv;

        for i in 0..3 {
            for j in 0..3 {
                let delta = if i == j { T::one() } else { T::zero() };
                block[i * 3 + j] = m_inv_8pi * (delta * inv + diff[i] * diff[j] * inv3);
            }
        }
    }
}

impl<T> HomogenousKernel for StokesVelocityKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}

/// Stokeslet pressure kernel, `r_i / (4 pi rho^3)`.
#[derive(Clone, Default, Debug)]
pub struct StokesPressureKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> StokesPressureKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for StokesPressureKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "stokes_pressure"
    }

    fn domain_component_count(&self) -> usize {
        3
    }

    fn range_component_count(&self) -> usize {
        1
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 3);
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
        let inv3 = inv * inv * inv;

        for i in 0..3 {
            block[i] = m_inv_4pi * diff[i] * inv3;
        }
    }
}

impl<T> HomogenousKernel for StokesPressureKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}

/// Stokeslet stress kernel, `-3 r_i r_j r_k / (4 pi rho^5)`.
///
/// The nine target components per force component are the stress tensor in
/// row major order, `block[i * 9 + j * 3 + k]`.
#[derive(Clone, Default, Debug)]
pub struct StokesStressKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> StokesStressKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for StokesStressKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "stokes_stress"
    }

    fn domain_component_count(&self) -> usize {
        3
    }

    fn range_component_count(&self) -> usize {
        9
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 27);
        let coeff = T::from(-0.75).unwrap() * T::FRAC_1_PI();

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
        let inv5 = inv * inv * inv * inv * inv;

        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    block[i * 9 + j * 3 + k] = coeff * diff[i] * diff[j] * diff[k] * inv5;
                }
            }
        }
    }
}

impl<T> HomogenousKernel for StokesStressKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}

/// Target gradient of the Stokeslet velocity.
///
/// The nine target components per force component are `d u_j / d x_k` in row
/// major order, `block[i * 9 + j * 3 + k]`.
#[derive(Clone, Default, Debug)]
pub struct StokesVelGradKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> StokesVelGradKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for StokesVelGradKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "stokes_vel_grad"
    }

    fn domain_component_count(&self) -> usize {
        3
    }

    fn range_component_count(&self) -> usize {
        9
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 27);
        let m_inv_8pi = T::from(0.125).unwrap() * T::FRAC_1_PI();
        let three = T::from(3.0).unwrap();

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
        let inv3 = inv * inv * inv;
        let inv5 = inv3 * inv * inv;

        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    let d_ij = if i == j { T::one() } else { T::zero() };
                    let d_ik = if i == k { T::one() } else { T::zero() };
                    let d_jk = if j == k { T::one() } else { T::zero() };

                    block[i * 9 + j * 3 + k] = m_inv_8pi
                        * ((d_ik * diff[j] + d_jk * diff[i] - d_ij * diff[k]) * inv3
                            - three * diff[i] * diff[j] * diff[k] * inv5);
                }
            }
        }
    }
}

impl<T> HomogenousKernel for StokesVelGradKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}
