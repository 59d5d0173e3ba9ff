//! Engine for the rotating-cube programs.
//!
//! Owns the window runtime, GPU device layer, shader compile/link helper,
//! cube mesh and renderer, textures, and the 2D overlay renderers used by
//! the immediate-mode UI.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod logging;

pub mod coords;
pub mod math;
pub mod mesh;
pub mod motion;
pub mod paint;
pub mod render;
pub mod scene;
pub mod shader;
pub mod text;
pub mod texture;
