//! Cache of precomputed translation and interpolation operator matrices.
use std::collections::HashMap;

use log::debug;
use num::Float;
use rayon::prelude::*;
use rlst::{rlst_dynamic_array2, Array, BaseArray, RlstScalar, VectorContainer};

use crate::cheb::integ::integ;
use crate::traits::kernel::Kernel;
use crate::traits::types::ChebFmmError;

/// Dense operator matrix stored by the cache.
pub type OperatorMatrix<T> = Array<T, BaseArray<T, VectorContainer<T>, 2>, 2>;

/// Classes of operators held by a [PrecompMat] cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Multipole to multipole translation
    M2m,
    /// Multipole to local translation
    M2l,
    /// Local to local translation
    L2l,
    /// Near field integration operator
    Near,
}

/// Cache of precomputed operator matrices keyed by operator class, octree
/// level and interaction index.
///
/// A cache constructed with `scale_invar` set stores a single level and
/// serves lookups for every level from it. Operators of homogenous kernels
/// are then rescaled on use, see [homogenous_kernel_scale].
pub struct PrecompMat<T: RlstScalar> {
    scale_invar: bool,
    mats: HashMap<(OperatorKind, u64, usize), OperatorMatrix<T>>,
}

impl<T: RlstScalar> PrecompMat<T> {
    /// Create an empty cache.
    pub fn new(scale_invar: bool) -> Self {
        Self {
            scale_invar,
            mats: HashMap::new(),
        }
    }

    /// Whether lookups collapse octree levels onto a single stored level.
    pub fn scale_invariant(&self) -> bool {
        self.scale_invar
    }

    fn storage_level(&self, level: u64) -> u64 {
        if self.scale_invar {
            0
        } else {
            level
        }
    }

    /// Retrieve a cached operator matrix.
    pub fn get(&self, kind: OperatorKind, level: u64, index: usize) -> Option<&OperatorMatrix<T>> {
        self.mats.get(&(kind, self.storage_level(level), index))
    }

    /// Whether an operator is cached.
    pub fn contains(&self, kind: OperatorKind, level: u64, index: usize) -> bool {
        self.mats
            .contains_key(&(kind, self.storage_level(level), index))
    }

    /// Store an operator matrix, replacing any previous entry under the same
    /// key.
    pub fn insert(&mut self, kind: OperatorKind, level: u64, index: usize, mat: OperatorMatrix<T>) {
        self.mats
            .insert((kind, self.storage_level(level), index), mat);
    }

    /// Retrieve an operator, computing and caching it on first use.
    pub fn get_or_compute<F>(
        &mut self,
        kind: OperatorKind,
        level: u64,
        index: usize,
        compute: F,
    ) -> &OperatorMatrix<T>
    where
        F: FnOnce() -> OperatorMatrix<T>,
    {
        self.mats
            .entry((kind, self.storage_level(level), index))
            .or_insert_with(compute)
    }

    /// Number of cached operators.
    pub fn len(&self) -> usize {
        self.mats.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.mats.is_empty()
    }
}

/// Scaling to apply to level-0 operators of homogenous scale invariant
/// kernels at a given octree level.
pub fn homogenous_kernel_scale<T: RlstScalar>(level: u64) -> T {
    let numerator = T::from(1).unwrap();
    let denominator = T::from(2.).unwrap();
    let power = T::from(level).unwrap().re();
    let denominator = <T as RlstScalar>::powf(denominator, power);
    numerator / denominator
}

/// Assemble the near field integration operator for a set of target points
/// against the Chebyshev basis on the box `[0, radius]^3`.
///
/// Targets are given in column major coordinate layout. Row `i` of the
/// result is the [integ] vector of target `i`; rows are computed in
/// parallel. The result is suitable for insertion into a [PrecompMat] under
/// [OperatorKind::Near].
pub fn assemble_integ_operator<T, K>(
    order: usize,
    targets: &[T],
    radius: T,
    nquad: usize,
    kernel: &K,
) -> Result<OperatorMatrix<T>, ChebFmmError>
where
    T: RlstScalar<Real = T> + Float,
    K: Kernel<T = T> + ?Sized,
{
    let dim = kernel.space_dimension();
    if targets.len() % dim != 0 {
        return Err(ChebFmmError::DimensionMismatch(format!(
            "target coordinates have length {}, not a multiple of {}",
            targets.len(),
            dim
        )));
    }

    let n_targets = targets.len() / dim;
    let m1 = order + 1;
    let n_cols = m1 * m1 * m1 * kernel.domain_component_count() * kernel.range_component_count();

    debug!(
        "assembling near field operator, {} targets, order {}, {} quadrature points",
        n_targets, order, nquad
    );

    let rows: Vec<Vec<T>> = (0..n_targets)
        .into_par_iter()
        .map(|i| {
            let target = [targets[i], targets[n_targets + i], targets[2 * n_targets + i]];
            integ(order, &target, radius, nquad, kernel)
        })
        .collect();

    let mut mat = rlst_dynamic_array2!(T, [n_targets, n_cols]);
    for (i, row) in rows.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            mat[[i, j]] = value;
        }
    }
    Ok(mat)
}
