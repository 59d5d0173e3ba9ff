use winit::event::WindowEvent;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract.
pub trait App {
    /// Called once after the window and GPU exist, before the first frame.
    fn on_init(&mut self, ctx: &InitCtx<'_>) {
        let _ = ctx;
    }

    /// Called for every window event, before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called exactly once when the loop shuts down, while GPU objects are still alive.
    fn on_exit(&mut self) {}
}
