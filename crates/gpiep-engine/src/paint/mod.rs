//! Colors for the overlay renderers.

pub mod color;

pub use color::Color;
