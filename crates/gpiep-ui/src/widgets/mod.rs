//! Widgets available inside a [`crate::WindowUi`].

mod checkbox;
mod label;
