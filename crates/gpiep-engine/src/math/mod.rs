//! Minimal linear algebra for the transform uniform.

mod mat4;

pub use mat4::Mat4;
