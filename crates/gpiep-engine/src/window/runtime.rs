use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, InitCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{ButtonState, InputEvent, InputFrame, InputState, MouseButton};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gpiep".to_string(),
            initial_size: LogicalSize::new(800.0, 800.0),
            resizable: true,
        }
    }
}

/// Commands an app can issue during a frame; applied after the callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    exit_requested: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }
}

/// Loop state: `Running` until the first close signal, then `Closing` for good.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Running,
    Closing,
}

impl Lifecycle {
    /// Moves to `Closing`. Returns `true` only on the transition, so teardown runs once.
    pub fn begin_close(&mut self) -> bool {
        let was_running = *self == Lifecycle::Running;
        *self = Lifecycle::Closing;
        was_running
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == Lifecycle::Running
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, drives `app` until it closes, then tears everything down.
    ///
    /// Window or GPU creation failure ends the loop and is returned as `Err`.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    lifecycle: Lifecycle,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            lifecycle: Lifecycle::Running,
            fatal: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        self.shutdown(event_loop);
    }

    /// Runs teardown on the first call only: app hook, then GPU, then window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.begin_close() {
            log::info!("shutting down");
            if self.entry.is_some() {
                self.app.on_exit();
            }
            self.entry = None;
        }
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || !self.lifecycle.is_running() {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => return self.fail(event_loop, e),
        };

        let app = &mut self.app;
        entry.with(|fields| {
            let ctx = InitCtx {
                device: fields.gpu.device(),
                queue: fields.gpu.queue(),
                surface_format: fields.gpu.surface_format(),
                scale_factor: fields.window.scale_factor() as f32,
            };
            app.on_init(&ctx);
            fields.window.request_redraw();
        });

        log::info!("window `{}` ready", self.config.title);
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.lifecycle.is_running() {
            event_loop.exit();
            return;
        }

        // Continuous redraw.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.lifecycle.is_running() {
            return;
        }

        // Split borrows so the ouroboros closures do not capture `self`.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else { return };

        let mut exit = false;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_input_event(fields.window, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            exit = app.on_window_event(&event) == AppControl::Exit;
        });

        if exit {
            return self.shutdown(event_loop);
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let mut runtime_ctx = RuntimeCtx::default();
                let mut control = AppControl::Continue;

                entry.with_mut(|fields| {
                    let time = fields.clock.tick();
                    {
                        let mut ctx = FrameCtx {
                            window: WindowCtx { window: fields.window },
                            gpu: fields.gpu,
                            input: fields.input_state,
                            input_frame: fields.input_frame,
                            time,
                            runtime: &mut runtime_ctx,
                        };
                        control = app.on_frame(&mut ctx);
                    }
                    // Per-frame transitions are consumed by exactly one frame.
                    fields.input_frame.clear();
                });

                if control == AppControl::Exit || runtime_ctx.exit_requested {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }
}

fn translate_input_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: match state {
                ElementState::Pressed => ButtonState::Pressed,
                ElementState::Released => ButtonState::Released,
            },
        }),

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_transitions_once() {
        let mut lifecycle = Lifecycle::Running;
        assert!(lifecycle.begin_close());
        assert_eq!(lifecycle, Lifecycle::Closing);
        assert!(!lifecycle.begin_close());
        assert!(!lifecycle.begin_close());
        assert!(!lifecycle.is_running());
    }

    #[test]
    fn default_window_is_800_square() {
        let config = RuntimeConfig::default();
        assert_eq!(config.initial_size, LogicalSize::new(800.0, 800.0));
        assert!(config.resizable);
    }

    #[test]
    fn mouse_buttons_map() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(9)), MouseButton::Other(9));
    }

    #[test]
    fn runtime_ctx_records_exit() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.exit_requested);
        ctx.exit();
        assert!(ctx.exit_requested);
    }
}
