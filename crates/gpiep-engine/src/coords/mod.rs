//! Screen-space geometry shared by the overlay renderers and the UI.
//!
//! Logical pixels, origin top-left, +X right, +Y down. The cube itself draws
//! in clip space and only needs the [`PixelViewport`].

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::{PixelViewport, Viewport};
