//! # miescat Compute
//!
//! Compute backend abstraction for batched Mie evaluation. The
//! [`ComputeBackend`](backend::ComputeBackend) trait keeps the scattering
//! kernels in `miescat-core` independent of how a wavelength sweep is spread
//! across threads.
//!
//! ## Available backends
//!
//! | Backend | Feature flag | Status |
//! |---------|-------------|--------|
//! | CPU (Rayon) | `cpu` (default) | Implemented |
//! | Serial | always | Implemented |

pub mod backend;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use backend::{BackendType, ComputeBackend, ComputeError, DeviceInfo, SerialBackend};

#[cfg(feature = "cpu")]
pub use cpu::CpuBackend;
