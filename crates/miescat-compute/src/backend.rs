//! Compute backend trait and device abstraction.
//!
//! Every sample of a wavelength sweep is independent, so the only operation a
//! backend has to provide is an indexed fill of a real-valued array.

use ndarray::Array1;
use thiserror::Error;

/// Errors originating from compute backends.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Describes the capabilities of a compute backend.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub name: String,
    pub backend_type: BackendType,
    pub threads: usize,
}

/// The type of compute backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Serial,
    Cpu,
}

/// Abstraction over compute backends.
pub trait ComputeBackend: Send + Sync {
    /// Return information about the device.
    fn device_info(&self) -> DeviceInfo;

    /// Fill an array of length `len` with `fill_fn(i)` for every index.
    ///
    /// Implementations may evaluate indices in any order and on any thread;
    /// `fill_fn` must therefore be free of cross-sample side effects.
    fn parallel_fill(
        &self,
        len: usize,
        fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync),
    ) -> Result<Array1<f64>, ComputeError>;
}

/// Single-threaded backend. Useful for debugging and deterministic profiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialBackend;

impl ComputeBackend for SerialBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: "Serial".into(),
            backend_type: BackendType::Serial,
            threads: 1,
        }
    }

    fn parallel_fill(
        &self,
        len: usize,
        fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync),
    ) -> Result<Array1<f64>, ComputeError> {
        Ok(Array1::from_iter((0..len).map(fill_fn)))
    }
}
