//! Image decoding and GPU texture upload.

mod decoded;
mod gpu;

pub use decoded::{TextureError, TextureImage};
pub use gpu::GpuTexture;
