//! CPU compute backend using Rayon for shared-memory parallelism.

use ndarray::Array1;
use rayon::prelude::*;

use crate::backend::{BackendType, ComputeBackend, ComputeError, DeviceInfo};

/// CPU backend that parallelises work across threads via Rayon.
///
/// [`CpuBackend::new`] runs on Rayon's global pool; [`CpuBackend::with_threads`]
/// owns a dedicated pool of the requested size.
pub struct CpuBackend {
    num_threads: usize,
    pool: Option<rayon::ThreadPool>,
}

impl CpuBackend {
    /// Create a new CPU backend using all available threads.
    pub fn new() -> Self {
        Self {
            num_threads: rayon::current_num_threads(),
            pool: None,
        }
    }

    /// Create a CPU backend with a dedicated pool of `num_threads` workers.
    pub fn with_threads(num_threads: usize) -> Result<Self, ComputeError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("miescat-worker-{i}"))
            .build()
            .map_err(|e| ComputeError::ThreadPool(e.to_string()))?;
        Ok(Self {
            num_threads: pool.current_num_threads(),
            pool: Some(pool),
        })
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeBackend for CpuBackend {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: format!("CPU ({} threads)", self.num_threads),
            backend_type: BackendType::Cpu,
            threads: self.num_threads,
        }
    }

    fn parallel_fill(
        &self,
        len: usize,
        fill_fn: &(dyn Fn(usize) -> f64 + Send + Sync),
    ) -> Result<Array1<f64>, ComputeError> {
        let fill = || -> Vec<f64> { (0..len).into_par_iter().map(fill_fn).collect() };
        let data = match &self.pool {
            Some(pool) => pool.install(fill),
            None => fill(),
        };
        log::trace!("parallel_fill: {} samples on {} threads", len, self.num_threads);
        Ok(Array1::from_vec(data))
    }
}
