//! Traits for Green's function kernel evaluation.
use num::Float;
use num::Zero;
use rayon::prelude::*;
use rlst::RlstScalar;

/// Interface to evaluating Green's functions for given sources and targets.
///
/// Coordinate slices are expected in column major order,
/// `[x_1, x_2, ..., x_N, y_1, y_2, ..., y_N, z_1, z_2, ..., z_N]`, that is
/// the values for each dimension must be contiguous in the slice.
pub trait Kernel: Send + Sync + std::fmt::Debug {
    /// Scalar element type. Kernels are evaluated in real arithmetic; complex
    /// valued kernels are represented by paired real components.
    type T: RlstScalar<Real = Self::T> + Float;

    /// Name of the kernel.
    fn name(&self) -> &'static str;

    /// Number of source density components.
    fn domain_component_count(&self) -> usize;

    /// Number of target value components.
    fn range_component_count(&self) -> usize;

    /// Dimension of the underlying space.
    fn space_dimension(&self) -> usize {
        3
    }

    /// Evaluate the interaction block for a single source/target pair.
    ///
    /// `block` must hold `domain_component_count * range_component_count`
    /// entries and is written in source component major order, i.e.
    /// `block[i * range + j]` is the response in target component `j` to a
    /// unit density in source component `i`. A coincident source and target
    /// produce a zero block.
    fn greens_fn(&self, source: &[Self::T; 3], target: &[Self::T; 3], block: &mut [Self::T]);

    /// Single threaded assembly of the dense interaction matrix between many
    /// sources and targets.
    ///
    /// The interaction block of target `t` and source `s` starts at
    /// `result[(t * nsources + s) * domain * range]`, laid out as in
    /// [Kernel::greens_fn].
    ///
    /// # Panics
    /// If the coordinate slices are not multiples of the space dimension, or
    /// `result` does not hold one block per source/target pair.
    fn assemble_st(&self, sources: &[Self::T], targets: &[Self::T], result: &mut [Self::T]) {
        let dim = self.space_dimension();
        assert_eq!(sources.len() % dim, 0);
        assert_eq!(targets.len() % dim, 0);

        let nsources = sources.len() / dim;
        let ntargets = targets.len() / dim;
        let block_len = self.domain_component_count() * self.range_component_count();
        assert_eq!(result.len(), nsources * ntargets * block_len);

        for t in 0..ntargets {
            let target = [targets[t], targets[ntargets + t], targets[2 * ntargets + t]];
            for s in 0..nsources {
                let source = [sources[s], sources[nsources + s], sources[2 * nsources + s]];
                let offset = (t * nsources + s) * block_len;
                self.greens_fn(&source, &target, &mut result[offset..offset + block_len]);
            }
        }
    }

    /// Single threaded evaluation of the field induced by a set of source
    /// densities.
    ///
    /// Densities are contiguous per source, `charges[s * domain + i]`, and the
    /// result is contiguous per target, `result[t * range + j]`. Existing
    /// contents of `result` are overwritten.
    ///
    /// # Panics
    /// If slice lengths are inconsistent with the coordinate counts and the
    /// kernel dimensions.
    fn evaluate_st(
        &self,
        sources: &[Self::T],
        targets: &[Self::T],
        charges: &[Self::T],
        result: &mut [Self::T],
    ) {
        let dim = self.space_dimension();
        assert_eq!(sources.len() % dim, 0);
        assert_eq!(targets.len() % dim, 0);

        let nsources = sources.len() / dim;
        let ntargets = targets.len() / dim;
        let domain = self.domain_component_count();
        let range = self.range_component_count();
        assert_eq!(charges.len(), nsources * domain);
        assert_eq!(result.len(), ntargets * range);

        let mut block = vec![Self::T::zero(); domain * range];
        for t in 0..ntargets {
            let target = [targets[t], targets[ntargets + t], targets[2 * ntargets + t]];
            let chunk = &mut result[t * range..(t + 1) * range];
            chunk.fill(Self::T::zero());

            for s in 0..nsources {
                let source = [sources[s], sources[nsources + s], sources[2 * nsources + s]];
                self.greens_fn(&source, &target, &mut block);
                for i in 0..domain {
                    let q = charges[s * domain + i];
                    for j in 0..range {
                        chunk[j] = chunk[j] + q * block[i * range + j];
                    }
                }
            }
        }
    }

    /// Multithreaded version of [Kernel::evaluate_st], parallel over targets.
    fn evaluate_mt(
        &self,
        sources: &[Self::T],
        targets: &[Self::T],
        charges: &[Self::T],
        result: &mut [Self::T],
    ) {
        let dim = self.space_dimension();
        assert_eq!(sources.len() % dim, 0);
        assert_eq!(targets.len() % dim, 0);

        let nsources = sources.len() / dim;
        let ntargets = targets.len() / dim;
        let domain = self.domain_component_count();
        let range = self.range_component_count();
        assert_eq!(charges.len(), nsources * domain);
        assert_eq!(result.len(), ntargets * range);

        result
            .par_chunks_exact_mut(range)
            .enumerate()
            .for_each(|(t, chunk)| {
                let target = [targets[t], targets[ntargets + t], targets[2 * ntargets + t]];
                chunk.fill(Self::T::zero());

                let mut block = vec![Self::T::zero(); domain * range];
                for s in 0..nsources {
                    let source = [sources[s], sources[nsources + s], sources[2 * nsources + s]];
                    self.greens_fn(&source, &target, &mut block);
                    for i in 0..domain {
                        let q = charges[s * domain + i];
                        for j in 0..range {
                            chunk[j] = chunk[j] + q * block[i * range + j];
                        }
                    }
                }
            });
    }
}

/// Marker interface for kernels that are homogenous under uniform scaling of
/// the geometry.
///
/// Precomputed operators of homogenous kernels can be stored at a single
/// octree level and rescaled on lookup, see [crate::precomp::PrecompMat].
pub trait HomogenousKernel: Kernel {
    /// Whether the kernel is homogenous.
    fn is_homogenous(&self) -> bool;

    /// Scaling to apply to level-0 precomputed operators at a given octree
    /// level.
    fn homogeneity_scale(&self, level: u64) -> Self::T {
        crate::precomp::homogenous_kernel_scale::<Self::T>(level)
    }
}
