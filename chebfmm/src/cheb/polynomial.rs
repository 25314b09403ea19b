//! Chebyshev polynomial evaluation and interpolation nodes.
use itertools::Itertools;
use num::traits::FloatConst;
use num::Float;
use rlst::RlstScalar;

/// Evaluate Chebyshev polynomials of the first kind up to a given degree.
///
/// Writes `T_i(x_j)` to `output[i * n + j]` for `i` in `0..=degree` over the
/// `n = points.len()` evaluation points. Points outside `[-1, 1]` produce
/// zero columns.
///
/// # Panics
/// If `output.len() != (degree + 1) * points.len()`.
pub fn cheb_poly<T>(degree: usize, points: &[T], output: &mut [T])
where
    T: RlstScalar<Real = T> + Float,
{
    let n = points.len();
    assert_eq!(output.len(), (degree + 1) * n);

    let mut values = vec![T::zero(); degree + 1];
    for (j, &x) in points.iter().enumerate() {
        if Float::abs(x) <= T::one() {
            cheb_recurrence(degree, x, &mut values);
            for (i, &value) in values.iter().enumerate() {
                output[i * n + j] = value;
            }
        } else {
            for i in 0..=degree {
                output[i * n + j] = T::zero();
            }
        }
    }
}

/// Three term recurrence `T_{i+1} = 2 x T_i - T_{i-1}`, without the domain
/// clamp. The polynomial extension outside `[-1, 1]` is what the signed cone
/// quadrature in [crate::cheb::integ] relies on.
pub(crate) fn cheb_recurrence<T>(degree: usize, x: T, values: &mut [T])
where
    T: RlstScalar<Real = T> + Float,
{
    let two = T::one() + T::one();
    values[0] = T::one();
    if degree == 0 {
        return;
    }
    values[1] = x;
    for i in 2..=degree {
        values[i] = two * x * values[i - 1] - values[i - 2];
    }
}

/// First kind Chebyshev interpolation nodes on the unit box `[0, 1]^dim`.
///
/// Returns the tensor grid of `(order + 1)^dim` points in column major
/// coordinate layout with the first axis varying fastest.
pub fn cheb_nodes<T>(order: usize, dim: usize) -> Vec<T>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    let m1 = order + 1;
    let half = T::from(0.5).unwrap();
    let nodes_1d = (0..m1)
        .map(|i| {
            let theta = T::PI() * T::from(2 * i + 1).unwrap() / T::from(2 * m1).unwrap();
            half * (T::one() - Float::cos(theta))
        })
        .collect_vec();

    let n_points = m1.pow(dim as u32);
    let mut points = vec![T::zero(); n_points * dim];
    for p in 0..n_points {
        let mut rem = p;
        for axis in 0..dim {
            points[axis * n_points + p] = nodes_1d[rem % m1];
            rem /= m1;
        }
    }
    points
}
