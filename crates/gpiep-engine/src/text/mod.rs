//! Font loading and measurement.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, SYSTEM_FONT_PATHS};
