//! Integration of kernels against the tensor product Chebyshev basis.
use num::Float;
use rayon::prelude::*;
use rlst::RlstScalar;

use crate::cheb::polynomial::cheb_recurrence;
use crate::cheb::quadrature::quad_rule;
use crate::traits::kernel::Kernel;

/// Integrals of every tensor product Chebyshev basis function against a
/// kernel over the source box `[0, radius]^3`.
///
/// For Chebyshev indices `(i, j, k)` up to `order` along each axis and kernel
/// block component `c`, the entry
/// `[((i * (order + 1) + j) * (order + 1) + k) * block_len + c]` holds the
/// integral of `K(y, target) T_i(y_x) T_j(y_y) T_k(y_z)` over the box, with
/// each coordinate mapped from `[0, radius]` to `[-1, 1]` for the basis
/// evaluation. `block_len` is the kernel block size and `c` is laid out as in
/// [Kernel::greens_fn].
///
/// The target point may lie inside, on the boundary of, or outside the box.
/// The box is decomposed into six signed cones with apex at the target, one
/// per face; the cone Jacobian absorbs up to two powers of the kernel
/// singularity, and each cone is integrated with a tensor Gauss-Legendre rule
/// of `nquad` points per direction. For exterior targets the signed
/// contributions of overshooting cones cancel.
pub fn integ<T, K>(order: usize, target: &[T; 3], radius: T, nquad: usize, kernel: &K) -> Vec<T>
where
    T: RlstScalar<Real = T> + Float,
    K: Kernel<T = T> + ?Sized,
{
    debug_assert!(radius > T::zero());

    let m1 = order + 1;
    let block_len = kernel.domain_component_count() * kernel.range_component_count();
    let n_entries = m1 * m1 * m1 * block_len;

    let two = T::one() + T::one();

    // Apex in the reference frame of the box, [-1, 1]^3.
    let apex = [
        two * target[0] / radius - T::one(),
        two * target[1] / radius - T::one(),
        two * target[2] / radius - T::one(),
    ];

    // Axial rule on [0, 1], transverse rule mapped to [-1, 1].
    let (t_nodes, t_weights) = quad_rule::<T>(nquad);
    let uv_nodes: Vec<T> = t_nodes.iter().map(|&x| two * x - T::one()).collect();
    let uv_weights: Vec<T> = t_weights.iter().map(|&w| two * w).collect();

    let faces: Vec<(usize, T)> = (0..3)
        .flat_map(|axis| [(axis, -T::one()), (axis, T::one())])
        .collect();

    faces
        .par_iter()
        .map(|&(axis, face)| {
            integ_cone(
                order,
                target,
                radius,
                &apex,
                axis,
                face,
                &t_nodes,
                &t_weights,
                &uv_nodes,
                &uv_weights,
                kernel,
            )
        })
        .reduce(
            || vec![T::zero(); n_entries],
            |mut acc, partial| {
                for (a, &p) in acc.iter_mut().zip(partial.iter()) {
                    *a = *a + p;
                }
                acc
            },
        )
}

/// Signed contribution of the cone joining the apex to one face of the box,
/// in the reference frame `[-1, 1]^3`.
///
/// Along the ray `y = apex + t (b - apex)` to a face point `b` the volume
/// element is `t^2 h` with `h` the signed height of the apex over the face
/// plane, so integrands as singular as `1 / rho^2` stay bounded.
#[allow(clippy::too_many_arguments)]
fn integ_cone<T, K>(
    order: usize,
    target: &[T; 3],
    radius: T,
    apex: &[T; 3],
    axis: usize,
    face: T,
    t_nodes: &[T],
    t_weights: &[T],
    uv_nodes: &[T],
    uv_weights: &[T],
    kernel: &K,
) -> Vec<T>
where
    T: RlstScalar<Real = T> + Float,
    K: Kernel<T = T> + ?Sized,
{
    let m1 = order + 1;
    let block_len = kernel.domain_component_count() * kernel.range_component_count();
    let mut acc = vec![T::zero(); m1 * m1 * m1 * block_len];

    let height = T::one() - face * apex[axis];
    if height == T::zero() {
        // Degenerate cone, the apex lies in the face plane.
        return acc;
    }

    let u_axis = (axis + 1) % 3;
    let v_axis = (axis + 2) % 3;

    let half = T::from(0.5).unwrap();
    let jac = half * radius;
    let vol_jac = jac * jac * jac;

    let mut block = vec![T::zero(); block_len];
    let mut tx = vec![T::zero(); m1];
    let mut ty = vec![T::zero(); m1];
    let mut tz = vec![T::zero(); m1];

    for (&t, &wt) in t_nodes.iter().zip(t_weights) {
        for (&u, &wu) in uv_nodes.iter().zip(uv_weights) {
            for (&v, &wv) in uv_nodes.iter().zip(uv_weights) {
                let mut b = [T::zero(); 3];
                b[axis] = face;
                b[u_axis] = u;
                b[v_axis] = v;

                let y = [
                    apex[0] + t * (b[0] - apex[0]),
                    apex[1] + t * (b[1] - apex[1]),
                    apex[2] + t * (b[2] - apex[2]),
                ];

                // Back to physical coordinates for the kernel evaluation.
                let y_phys = [
                    jac * (y[0] + T::one()),
                    jac * (y[1] + T::one()),
                    jac * (y[2] + T::one()),
                ];

                kernel.greens_fn(&y_phys, target, &mut block);

                cheb_recurrence(order, y[0], &mut tx);
                cheb_recurrence(order, y[1], &mut ty);
                cheb_recurrence(order, y[2], &mut tz);

                let w = wt * wu * wv * t * t * height * vol_jac;

                let mut idx = 0;
                for &txi in tx.iter() {
                    for &tyj in ty.iter() {
                        let tij = w * txi * tyj;
                        for &tzk in tz.iter() {
                            let tijk = tij * tzk;
                            for &bc in block.iter() {
                                acc[idx] = acc[idx] + tijk * bc;
                                idx += 1;
                            }
                        }
                    }
                }
            }
        }
    }

    acc
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kernel::laplace::{LaplaceGradientKernel, LaplacePotentialKernel};
    use crate::kernel::stokes::StokesVelocityKernel;
    use approx::assert_relative_eq;

    /// Plain tensor product quadrature over the box, valid for targets away
    /// from the source region.
    fn tensor_reference<K: Kernel<T = f64> + ?Sized>(
        order: usize,
        target: &[f64; 3],
        radius: f64,
        nquad: usize,
        kernel: &K,
    ) -> Vec<f64> {
        let m1 = order + 1;
        let block_len = kernel.domain_component_count() * kernel.range_component_count();
        let mut result = vec![0.0; m1 * m1 * m1 * block_len];

        let (nodes, weights) = quad_rule::<f64>(nquad);
        let mut block = vec![0.0; block_len];
        let mut tx = vec![0.0; m1];
        let mut ty = vec![0.0; m1];
        let mut tz = vec![0.0; m1];

        for (&x, &wx) in nodes.iter().zip(weights.iter()) {
            for (&y, &wy) in nodes.iter().zip(weights.iter()) {
                for (&z, &wz) in nodes.iter().zip(weights.iter()) {
                    let point = [radius * x, radius * y, radius * z];
                    kernel.greens_fn(&point, target, &mut block);

                    cheb_recurrence(order, 2.0 * x - 1.0, &mut tx);
                    cheb_recurrence(order, 2.0 * y - 1.0, &mut ty);
                    cheb_recurrence(order, 2.0 * z - 1.0, &mut tz);

                    let w = wx * wy * wz * radius * radius * radius;
                    let mut idx = 0;
                    for &txi in tx.iter() {
                        for &tyj in ty.iter() {
                            for &tzk in tz.iter() {
                                for &bc in block.iter() {
                                    result[idx] += w * txi * tyj * tzk * bc;
                                    idx += 1;
                                }
                            }
                        }
                    }
                }
            }
        }
        result
    }

    #[test]
    fn test_far_target_matches_tensor_quadrature() {
        let kernel = LaplacePotentialKernel::<f64>::new();
        let order = 3;
        let radius = 1.5;
        let target = [2.5, 2.2, 2.8];

        let cone = integ(order, &target, radius, 20, &kernel);
        let tensor = tensor_reference(order, &target, radius, 20, &kernel);

        assert_eq!(cone.len(), tensor.len());
        for (a, b) in cone.iter().zip(tensor.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_far_target_matches_for_vector_kernels() {
        let kernel = LaplaceGradientKernel::<f64>::new();
        let order = 2;
        let radius = 1.0;
        let target = [-1.0, 1.5, 0.8];

        let cone = integ(order, &target, radius, 18, &kernel);
        let tensor = tensor_reference(order, &target, radius, 18, &kernel);

        for (a, b) in cone.iter().zip(tensor.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_singular_target_converges() {
        let kernel = LaplacePotentialKernel::<f64>::new();
        let order = 2;
        let radius = 1.0;
        let target = [0.5, 0.5, 0.5];

        let coarse = integ(order, &target, radius, 20, &kernel);
        let fine = integ(order, &target, radius, 30, &kernel);

        for (a, b) in coarse.iter().zip(fine.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-8, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_singular_self_interaction_magnitude() {
        // The constant basis entry is the potential of a uniform unit density
        // over the cube, evaluated at its center. Geometric bounds: the
        // inscribed ball contributes 2 pi (1/2)^2 / (4 pi), the remaining
        // volume lies between the inscribed and circumscribed radii.
        let kernel = LaplacePotentialKernel::<f64>::new();
        let u = integ(2, &[0.5, 0.5, 0.5], 1.0, 24, &kernel);
        assert!(u[0] > 0.15 && u[0] < 0.22, "u[0] = {}", u[0]);
    }

    #[test]
    fn test_odd_basis_functions_vanish_at_the_center() {
        let kernel = LaplacePotentialKernel::<f64>::new();
        let order = 1;
        let u = integ(order, &[0.5, 0.5, 0.5], 1.0, 16, &kernel);

        // Entries with any odd Chebyshev index integrate an odd function of
        // that coordinate against an even kernel.
        let m1 = order + 1;
        for i in 0..m1 {
            for j in 0..m1 {
                for k in 0..m1 {
                    if i + j + k > 0 {
                        let idx = (i * m1 + j) * m1 + k;
                        assert!(u[idx].abs() < 1e-10, "u[{}] = {}", idx, u[idx]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_boundary_target_is_well_defined() {
        let kernel = LaplacePotentialKernel::<f64>::new();
        // Corner and face targets degenerate some of the cones.
        let corner = integ(2, &[0.0, 0.0, 0.0], 1.0, 20, &kernel);
        let face = integ(2, &[0.5, 0.5, 0.0], 1.0, 20, &kernel);

        assert!(corner[0].is_finite() && corner[0] > 0.0);
        assert!(face[0].is_finite() && face[0] > 0.0);
        // The corner sees an eighth of the solid angle the center sees, so
        // its self interaction must be smaller.
        let center = integ(2, &[0.5, 0.5, 0.5], 1.0, 20, &kernel);
        assert!(corner[0] < center[0]);
    }

    #[test]
    fn test_multi_component_layout_and_symmetry() {
        let kernel = StokesVelocityKernel::<f64>::new();
        let order = 1;
        let u = integ(order, &[0.5, 0.5, 0.5], 1.0, 16, &kernel);

        let m1 = order + 1;
        assert_eq!(u.len(), m1 * m1 * m1 * 9);

        // At the center of the box the three diagonal velocity components of
        // the constant basis entry agree by symmetry.
        assert_relative_eq!(u[0], u[4], max_relative = 1e-8);
        assert_relative_eq!(u[0], u[8], max_relative = 1e-8);
    }

    #[test]
    fn test_scales_with_radius_for_homogenous_kernels() {
        // The Laplace potential integral over a box of twice the size, with
        // the target scaled along, picks up a factor 2^2 (volume 2^3 times
        // kernel decay 2^-1).
        let kernel = LaplacePotentialKernel::<f64>::new();
        let small = integ(1, &[0.5, 0.5, 0.5], 1.0, 20, &kernel);
        let large = integ(1, &[1.0, 1.0, 1.0], 2.0, 20, &kernel);

        for (a, b) in small.iter().zip(large.iter()) {
            assert_relative_eq!(4.0 * a, b, epsilon = 1e-10, max_relative = 1e-6);
        }
    }
}
