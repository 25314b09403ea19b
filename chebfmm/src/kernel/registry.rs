//! String keyed kernel registry and dispatch.
use std::collections::HashMap;

use lazy_static::lazy_static;
use num::traits::FloatConst;
use num::Float;
use rlst::RlstScalar;

use crate::kernel::biot_savart::BiotSavartKernel;
use crate::kernel::helmholtz::{HelmholtzKernel, DEFAULT_WAVENUMBER};
use crate::kernel::laplace::{LaplaceGradientKernel, LaplacePotentialKernel};
use crate::kernel::stokes::{
    StokesPressureKernel, StokesStressKernel, StokesVelGradKernel, StokesVelocityKernel,
};
use crate::traits::kernel::Kernel;
use crate::traits::types::ChebFmmError;

/// Internal tag for each kernel the registry can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Laplace single layer potential
    LaplacePotential,
    /// Laplace potential gradient
    LaplaceGradient,

    /// Stokeslet velocity
    StokesVelocity,
    /// Stokeslet pressure
    StokesPressure,
    /// Stokeslet stress
    StokesStress,
    /// Stokeslet velocity gradient
    StokesVelGrad,

    /// Biot-Savart field
    BiotSavartPotential,

    /// Helmholtz potential
    HelmholtzPotential,
}

lazy_static! {
    static ref KERNEL_TABLE: HashMap<&'static str, KernelKind> = {
        let mut table = HashMap::new();
        table.insert("LaplaceKernel, potential", KernelKind::LaplacePotential);
        table.insert("LapKnl3D", KernelKind::LaplacePotential);
        table.insert("LaplaceKernel, gradient", KernelKind::LaplaceGradient);

        table.insert("StokesKernel, velocity", KernelKind::StokesVelocity);
        table.insert("StokesKernel, pressure", KernelKind::StokesPressure);
        table.insert("StokesKernel, stress", KernelKind::StokesStress);
        table.insert("StokesKernel, vel_grad", KernelKind::StokesVelGrad);

        table.insert("BiotSavartKernel, potential", KernelKind::BiotSavartPotential);

        table.insert("HelmholtzKernel, potential", KernelKind::HelmholtzPotential);
        table.insert("HelmKnl3D(k)", KernelKind::HelmholtzPotential);
        table
    };
}

impl KernelKind {
    /// Resolve a human readable kernel description string.
    pub fn from_desc(desc: &str) -> Result<Self, ChebFmmError> {
        KERNEL_TABLE
            .get(desc)
            .copied()
            .ok_or_else(|| ChebFmmError::InvalidKernelDesc(desc.to_string()))
    }

    /// Description strings understood by [KernelKind::from_desc].
    pub fn descriptions() -> impl Iterator<Item = &'static str> {
        KERNEL_TABLE.keys().copied()
    }
}

/// Construct the kernel object selected by a description string,
/// parameterized over the numeric element type.
///
/// Helmholtz kernels are constructed with [DEFAULT_WAVENUMBER]; use
/// [HelmholtzKernel::new] directly for other wavenumbers.
pub fn kernel_from_desc<T>(desc: &str) -> Result<Box<dyn Kernel<T = T>>, ChebFmmError>
where
    T: RlstScalar<Real = T> + Float + FloatConst,
{
    let kind = KernelKind::from_desc(desc)?;
    let kernel: Box<dyn Kernel<T = T>> = match kind {
        KernelKind::LaplacePotential => Box::new(LaplacePotentialKernel::new()),
        KernelKind::LaplaceGradient => Box::new(LaplaceGradientKernel::new()),

        KernelKind::StokesVelocity => Box::new(StokesVelocityKernel::new()),
        KernelKind::StokesPressure => Box::new(StokesPressureKernel::new()),
        KernelKind::StokesStress => Box::new(StokesStressKernel::new()),
        KernelKind::StokesVelGrad => Box::new(StokesVelGradKernel::new()),

        KernelKind::BiotSavartPotential => Box::new(BiotSavartKernel::new()),

        KernelKind::HelmholtzPotential => Box::new(HelmholtzKernel::new(
            T::from(DEFAULT_WAVENUMBER).unwrap(),
        )),
    };
    Ok(kernel)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_every_description_resolves() {
        for desc in KernelKind::descriptions() {
            let kernel = kernel_from_desc::<f64>(desc).unwrap();
            assert!(kernel.domain_component_count() > 0);
            assert!(kernel.range_component_count() > 0);
        }
    }

    #[test]
    fn test_aliases_agree() {
        assert_eq!(
            KernelKind::from_desc("LapKnl3D").unwrap(),
            KernelKind::from_desc("LaplaceKernel, potential").unwrap()
        );
        assert_eq!(
            KernelKind::from_desc("HelmKnl3D(k)").unwrap(),
            KernelKind::from_desc("HelmholtzKernel, potential").unwrap()
        );
    }

    #[test]
    fn test_block_dimensions() {
        let cases = [
            ("LaplaceKernel, potential", 1, 1),
            ("LaplaceKernel, gradient", 1, 3),
            ("StokesKernel, velocity", 3, 3),
            ("StokesKernel, pressure", 3, 1),
            ("StokesKernel, stress", 3, 9),
            ("StokesKernel, vel_grad", 3, 9),
            ("BiotSavartKernel, potential", 3, 3),
            ("HelmholtzKernel, potential", 2, 2),
        ];
        for (desc, domain, range) in cases {
            let kernel = kernel_from_desc::<f32>(desc).unwrap();
            assert_eq!(kernel.domain_component_count(), domain, "{}", desc);
            assert_eq!(kernel.range_component_count(), range, "{}", desc);
        }
    }

    #[test]
    fn test_unknown_description_is_an_error() {
        let err = kernel_from_desc::<f64>("YukawaKernel, potential").unwrap_err();
        assert!(err.to_string().contains("Invalid kernel_desc"));
    }
}
