//! Quadrature rules used by the integration operators.
use gauss_quad::GaussLegendre;
use itertools::Itertools;
use num::Float;
use rlst::RlstScalar;

/// Gauss-Legendre quadrature rule with `order` points, scaled to `[0, 1]`.
///
/// Nodes are synthesized in double precision and cast to the requested
/// scalar type.
pub fn quad_rule<T>(order: usize) -> (Vec<T>, Vec<T>)
where
    T: RlstScalar<Real = T> + Float,
{
    let GaussLegendre { nodes, weights } = GaussLegendre::init(order);

    let nodes = nodes
        .iter()
        .map(|&x| T::from(0.5 * (x + 1.0)).unwrap())
        .collect_vec();
    let weights = weights
        .iter()
        .map(|&w| T::from(0.5 * w).unwrap())
        .collect_vec();
    (nodes, weights)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_sum_to_interval_length() {
        let (_, weights) = quad_rule::<f64>(12);
        let total: f64 = weights.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-13);
    }

    #[test]
    fn test_rule_is_exact_for_polynomials() {
        // An n point rule integrates degree 2n - 1 exactly.
        let (nodes, weights) = quad_rule::<f64>(4);
        let integral: f64 = nodes
            .iter()
            .zip(weights.iter())
            .map(|(&x, &w)| w * x.powi(7))
            .sum();
        assert_relative_eq!(integral, 1.0 / 8.0, epsilon = 1e-13);
    }

    #[test]
    fn test_nodes_lie_in_unit_interval() {
        let (nodes, _) = quad_rule::<f32>(9);
        assert!(nodes.iter().all(|&x| x > 0.0 && x < 1.0));
    }
}
