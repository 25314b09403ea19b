use chebfmm::cheb::polynomial::cheb_nodes;
use chebfmm::kernel::registry::kernel_from_desc;
use chebfmm::precomp::{assemble_integ_operator, OperatorKind, PrecompMat};
use rlst::Shape;

fn main() {
    // Precompute the near field operator of the Laplace potential for the
    // Chebyshev target grid of the unit box.
    let order = 4;
    let radius = 1.0;
    let nquad = 24;

    let kernel = kernel_from_desc::<f64>("LaplaceKernel, potential").unwrap();
    let targets = cheb_nodes::<f64>(order, 3);

    let mut cache = PrecompMat::<f64>::new(true);
    cache.get_or_compute(OperatorKind::Near, 0, 0, || {
        assemble_integ_operator(order, &targets, radius, nquad, kernel.as_ref()).unwrap()
    });

    let mat = cache.get(OperatorKind::Near, 0, 0).unwrap();
    println!(
        "near field operator of {} has shape {:?}",
        kernel.name(),
        mat.shape()
    );

    // The scale invariant cache serves every level from the same entry.
    assert!(cache.contains(OperatorKind::Near, 5, 0));
}
