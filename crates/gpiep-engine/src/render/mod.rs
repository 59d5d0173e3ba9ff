//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources and records its own render pass on
//! top of whatever the frame already contains (`LoadOp::Load`).
//!
//! - `cube`: indexed 3D mesh in clip space, transform uniform at group 0.
//! - `shapes`: 2D overlay in logical pixels, converted to NDC in the shader.

mod ctx;
pub mod cube;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use cube::{CubeBindings, CubeRenderer};
