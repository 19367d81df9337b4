//! Error type shared by all scattering kernels.

use thiserror::Error;

/// Errors that can occur during a Mie evaluation.
#[derive(Debug, Error)]
pub enum MieError {
    #[error("Continued fraction for order {order} failed to converge after {iterations} iterations")]
    Convergence { order: usize, iterations: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Sample {index}: {source}")]
    Sample {
        index: usize,
        #[source]
        source: Box<MieError>,
    },

    #[error("Compute backend error: {0}")]
    Compute(#[from] miescat_compute::ComputeError),
}

impl MieError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// The underlying error for a failure inside a batch, or `self` otherwise.
    pub fn root(&self) -> &MieError {
        match self {
            Self::Sample { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MieError>;
