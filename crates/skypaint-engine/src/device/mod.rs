//! GPU device and surface management.
//!
//! [`Gpu`] owns the wgpu device, queue and the window surface; it hands out
//! one [`GpuFrame`] per presented frame.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
