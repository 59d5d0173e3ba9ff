//! GPU device + surface management.
//!
//! - creates the wgpu Instance/Adapter/Device/Queue
//! - creates and configures the Surface (swapchain)
//! - acquires frames and maps surface errors to runtime actions

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
