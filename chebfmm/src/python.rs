//! Python bindings for the Chebyshev utilities, the kernel registry and the
//! precomputed operator cache
use numpy::{
    ndarray::Dim, PyArray, PyReadonlyArrayDyn, PyReadwriteArrayDyn, PyUntypedArrayMethods,
    ToPyArray,
};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::{pymodule, types::PyModule, Bound, PyResult};

use crate::cheb;
use crate::kernel::registry;
use crate::precomp::PrecompMat;

macro_rules! define_cheb_functions {
    ($cheb_poly: ident, $integ: ident, $type: ty) => {
        /// Evaluate Chebyshev polynomials of the first kind up to degree `d`
        /// over the first `n` entries of a 1-D array, writing `(d + 1) * n`
        /// values into `out`.
        #[pyfunction]
        fn $cheb_poly(
            d: usize,
            input: PyReadonlyArrayDyn<'_, $type>,
            n: usize,
            mut out: PyReadwriteArrayDyn<'_, $type>,
        ) -> PyResult<()> {
            if input.ndim() != 1 {
                return Err(PyErr::new::<PyTypeError, _>("in should be 1-D NumPy array"));
            }
            if out.ndim() != 1 {
                return Err(PyErr::new::<PyTypeError, _>("out should be 1-D NumPy array"));
            }

            let input = input.as_slice()?;
            let out = out.as_slice_mut()?;

            if n > input.len() {
                return Err(PyErr::new::<PyValueError, _>(
                    "in holds fewer than n evaluation points",
                ));
            }
            if out.len() < (d + 1) * n {
                return Err(PyErr::new::<PyValueError, _>(
                    "out must hold at least (d + 1) * n values",
                ));
            }

            cheb::polynomial::cheb_poly(d, &input[..n], &mut out[..(d + 1) * n]);
            Ok(())
        }

        /// Integrals of the tensor product Chebyshev basis of degree `m`
        /// against the selected kernel over the source box `[0, r]^3`,
        /// evaluated at the singular (target) point `s` with an `n` point
        /// quadrature rule.
        #[pyfunction]
        fn $integ<'py>(
            py: Python<'py>,
            m: usize,
            s: PyReadonlyArrayDyn<'py, $type>,
            r: $type,
            n: usize,
            kernel_desc: String,
        ) -> PyResult<Bound<'py, PyArray<$type, Dim<[usize; 1]>>>> {
            if s.ndim() != 1 {
                return Err(PyErr::new::<PyTypeError, _>("s should be 1-D NumPy array"));
            }

            let s = s.as_slice()?;
            if s.len() != 3 {
                return Err(PyErr::new::<PyValueError, _>(
                    "s should hold exactly 3 coordinates",
                ));
            }

            let kernel = registry::kernel_from_desc::<$type>(&kernel_desc)
                .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;

            let target = [s[0], s[1], s[2]];
            let u = cheb::integ::integ(m, &target, r, n, kernel.as_ref());
            Ok(u.as_slice().to_pyarray_bound(py))
        }
    };
}

define_cheb_functions!(cheb_poly_f32, integ_f32, f32);
define_cheb_functions!(cheb_poly_f64, integ_f64, f64);

macro_rules! define_precomp_mat {
    ($name: ident, $type: ty) => {
        /// Python interface to the precomputed operator cache
        #[pyclass]
        pub struct $name {
            mat: PrecompMat<$type>,
        }

        #[pymethods]
        impl $name {
            /// Constructor
            #[new]
            pub fn new(scale_invar: bool) -> Self {
                Self {
                    mat: PrecompMat::new(scale_invar),
                }
            }

            #[getter]
            fn scale_invar(&self) -> PyResult<bool> {
                Ok(self.mat.scale_invariant())
            }

            #[getter]
            fn n_mats(&self) -> PyResult<usize> {
                Ok(self.mat.len())
            }
        }
    };
}

define_precomp_mat!(PrecompMatF32, f32);
define_precomp_mat!(PrecompMatF64, f64);

/// Python bindings to ChebFMM
#[pymodule]
pub fn chebfmm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(cheb_poly_f32, m)?)?;
    m.add_function(wrap_pyfunction!(cheb_poly_f64, m)?)?;
    m.add_function(wrap_pyfunction!(integ_f32, m)?)?;
    m.add_function(wrap_pyfunction!(integ_f64, m)?)?;
    m.add_class::<PrecompMatF32>()?;
    m.add_class::<PrecompMatF64>()?;
    Ok(())
}
