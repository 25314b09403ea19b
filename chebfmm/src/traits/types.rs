//! Utility types for trait definitions.
use thiserror::Error;

/// Type to handle kernel and operator related errors
#[derive(Error, Debug)]
pub enum ChebFmmError {
    /// Kernel description string not known to the registry
    #[error("Invalid kernel_desc: {0}")]
    InvalidKernelDesc(String),

    /// Input array shapes inconsistent with the requested operation
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),
}
