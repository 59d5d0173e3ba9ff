//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single program window, and wires them
//! to the GPU layer.

mod runtime;

pub use runtime::{Lifecycle, Runtime, RuntimeConfig, RuntimeCtx};
