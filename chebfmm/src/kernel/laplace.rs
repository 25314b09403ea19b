//! Implementation of the Laplace kernels
use std::marker::PhantomData;

use num::traits::FloatConst;
use num::Float;
use rlst::RlstScalar;

use crate::traits::kernel::{HomogenousKernel, Kernel};

/// Single layer Laplace potential kernel, `1 / (4 pi |target - source|)`.
#[derive(Clone, Default, Debug)]
pub struct LaplacePotentialKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> LaplacePotentialKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for LaplacePotentialKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "laplace_potential"
    }

    fn domain_component_count(&self) -> usize {
        1
    }

    fn range_component_count(&self) -> usize {
        1
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 1);
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

        block[0] = m_inv_4pi * inv_diff_norm;
    }
}

impl<T> HomogenousKernel for LaplacePotentialKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}

/// Target gradient of the Laplace potential, `-(target - source) / (4 pi rho^3)`.
#[derive(Clone, Default, Debug)]
pub struct LaplaceGradientKernel<T: RlstScalar> {
    _phantom_t: PhantomData<T>,
}

impl<T: RlstScalar> LaplaceGradientKernel<T> {
    /// Create a new kernel object.
    pub fn new() -> Self {
        Self {
            _phantom_t: PhantomData,
        }
    }
}

impl<T> Kernel for LaplaceGradientKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    type T = T;

    fn name(&self) -> &'static str {
        "laplace_gradient"
    }

    fn domain_component_count(&self) -> usize {
        1
    }

    fn range_component_count(&self) -> usize {
        3
    }

    fn greens_fn(&self, source: &[T; 3], target: &[T; 3], block: &mut [T]) {
        debug_assert_eq!(block.len(), 3);
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
        let inv_diff_norm_cubed = inv_diff_norm * inv_diff_norm * inv_diff_norm;

        block[0] = -m_inv_4pi * diff0 * inv_diff_norm_cubed;
        block[1] = -m_inv_4pi * diff1 * inv_diff_norm_cubed;
        block[2] = -m_inv_4pi * diff2 * inv_diff_norm_cubed;
    }
}

impl<T> HomogenousKernel for LaplaceGradientKernel<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    fn is_homogenous(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_potential_value() {
        let kernel = LaplacePotentialKernel::<f64>::new();
        let mut block = [0.0];
        kernel.greens_fn(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &mut block);
        assert_relative_eq!(
            block[0],
            0.25 * std::f64::consts::FRAC_1_PI,
            epsilon = 1e-15
        );

        // Doubling the separation halves the potential
        let mut far = [0.0];
        kernel.greens_fn(&[0.0, 0.0, 0.0], &[2.0, 0.0, 0.0], &mut far);
        assert_relative_eq!(far[0], 0.5 * block[0], epsilon = 1e-15);
    }

    #[test]
    fn test_coincident_points_are_zero() {
        let kernel = LaplacePotentialKernel::<f64>::new();
        let mut block = [1.0];
        kernel.greens_fn(&[0.3, 0.4, 0.5], &[0.3, 0.4, 0.5], &mut block);
        assert_eq!(block[0], 0.0);

        let kernel = LaplaceGradientKernel::<f64>::new();
        let mut block = [1.0; 3];
        kernel.greens_fn(&[0.3, 0.4, 0.5], &[0.3, 0.4, 0.5], &mut block);
        assert_eq!(block, [0.0; 3]);
    }

    #[test]
    fn test_evaluate_matches_assembled_matrix() {
        use rand::prelude::*;

        let kernel = LaplacePotentialKernel::<f64>::new();
        let mut rng = StdRng::seed_from_u64(0);
        let nsources = 7;
        let ntargets = 5;
        let sources: Vec<f64> = (0..3 * nsources).map(|_| rng.gen::<f64>()).collect();
        let targets: Vec<f64> = (0..3 * ntargets).map(|_| rng.gen::<f64>() + 2.0).collect();
        let charges: Vec<f64> = (0..nsources).map(|_| rng.gen::<f64>() - 0.5).collect();

        let mut dense = vec![0.0; nsources * ntargets];
        kernel.assemble_st(&sources, &targets, &mut dense);

        let mut st = vec![0.0; ntargets];
        kernel.evaluate_st(&sources, &targets, &charges, &mut st);
        let mut mt = vec![0.0; ntargets];
        kernel.evaluate_mt(&sources, &targets, &charges, &mut mt);

        for t in 0..ntargets {
            let expected: f64 = (0..nsources)
                .map(|s| dense[t * nsources + s] * charges[s])
                .sum();
            assert_relative_eq!(st[t], expected, epsilon = 1e-13);
            assert_relative_eq!(mt[t], expected, epsilon = 1e-13);
        }
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let potential = LaplacePotentialKernel::<f64>::new();
        let gradient = LaplaceGradientKernel::<f64>::new();

        let source = [0.1, 0.2, 0.3];
        let target = [0.7, -0.3, 0.4];
        let h = 1e-5;

        let mut block = [0.0; 3];
        gradient.greens_fn(&source, &target, &mut block);

        for axis in 0..3 {
            let mut up = target;
            let mut down = target;
            up[axis] += h;
            down[axis] -= h;

            let mut p_up = [0.0];
            let mut p_down = [0.0];
            potential.greens_fn(&source, &up, &mut p_up);
            potential.greens_fn(&source, &down, &mut p_down);

            let estimate = (p_up[0] - p_down[0]) / (2.0 * h);
            assert_relative_eq!(block[axis], estimate, max_relative = 1e-6);
        }
    }
}
