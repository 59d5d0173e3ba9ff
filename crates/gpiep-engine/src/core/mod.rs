//! Contract between the runtime loop and the programs built on it.
//!
//! The runtime owns the window and GPU; an [`App`] receives setup, per-frame
//! and teardown callbacks.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InitCtx, WindowCtx};
