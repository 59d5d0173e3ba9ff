//! Immediate-mode overlay on top of `gpiep-engine`.
//!
//! Each frame: feed input with [`Ui::begin_frame`], declare windows and
//! widgets, then hand the [`Ui`] to a [`UiRenderer`] after the scene is drawn.
//!
//! ```rust,ignore
//! ui.begin_frame(UiInput::from_engine(ctx.input, ctx.input_frame));
//! ui.window("Settings", |w| {
//!     w.text("Rotation");
//!     w.checkbox("Paused", &mut paused);
//! });
//! ```

mod context;
mod painter;
mod render;
mod style;
mod widgets;

pub use context::{Ui, UiInput, WindowUi};
pub use painter::Painter;
pub use render::UiRenderer;
pub use style::UiStyle;
