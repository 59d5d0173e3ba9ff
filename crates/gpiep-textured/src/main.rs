//! Textured rotating cube with a pause overlay.

use gpiep_engine::core::{App, AppControl, FrameCtx, InitCtx};
use gpiep_engine::device::GpuInit;
use gpiep_engine::logging::{init_logging, LoggingConfig};
use gpiep_engine::mesh::textured_cube;
use gpiep_engine::motion::{Spin, SpinState};
use gpiep_engine::paint::Color;
use gpiep_engine::render::{CubeBindings, CubeRenderer};
use gpiep_engine::shader::compile_program;
use gpiep_engine::texture::{GpuTexture, TextureImage};
use gpiep_engine::window::{Runtime, RuntimeConfig};
use gpiep_ui::{Ui, UiInput, UiRenderer, UiStyle};

const VERTEX_SHADER: &str = include_str!("shaders/textured.vert.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/textured.frag.wgsl");

const TEXTURE_PATH: &str = "plano.png";

const CLEAR: Color = Color::from_premul(0.2, 0.3, 0.3, 1.0);

const OVERLAY_TITLE: &str = "UI DEL JUEGO";
const OVERLAY_LABEL: &str = "Cubo texturizado girando";
const PAUSE_LABEL: &str = "DETENER";

/// GPU objects created once the device exists.
struct Scene {
    cube: CubeRenderer,
    _texture: GpuTexture,
    overlay: UiRenderer,
}

struct TexturedApp {
    spin: SpinState,
    ui: Ui,
    scene: Option<Scene>,
}

impl TexturedApp {
    fn new() -> Self {
        Self {
            // Rotation starts frozen; the checkbox reads "DETENER" and starts checked.
            spin: SpinState::new(Spin::default(), true),
            ui: Ui::new(UiStyle::default()),
            scene: None,
        }
    }
}

/// Declares the overlay; returns `true` if the pause flag changed.
fn build_overlay(ui: &mut Ui, paused: &mut bool) -> bool {
    ui.window(OVERLAY_TITLE, |w| {
        w.text(OVERLAY_LABEL);
        w.checkbox(PAUSE_LABEL, paused)
    })
}

fn load_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> GpuTexture {
    let loaded = TextureImage::load(TEXTURE_PATH)
        .and_then(|image| GpuTexture::upload(device, queue, &image, TEXTURE_PATH));
    match loaded {
        Ok(texture) => texture,
        Err(e) => {
            log::error!("{e}; using fallback texture");
            GpuTexture::fallback(device, queue)
        }
    }
}

impl App for TexturedApp {
    fn on_init(&mut self, ctx: &InitCtx<'_>) {
        let program = match compile_program("textured cube", VERTEX_SHADER, FRAGMENT_SHADER) {
            Ok(program) => Some(program),
            Err(e) => {
                for err in &e.errors {
                    log::error!("{err}");
                }
                None
            }
        };

        let texture = load_texture(ctx.device, ctx.queue);
        let cube = CubeRenderer::new(
            ctx.device,
            ctx.surface_format,
            &textured_cube(),
            program.as_ref(),
            CubeBindings::Textured(&texture),
        );

        self.scene = Some(Scene {
            cube,
            _texture: texture,
            overlay: UiRenderer::new(ctx.device, ctx.surface_format),
        });
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        if let Some(transform) = self.spin.advance(ctx.time.elapsed) {
            scene.cube.upload_transform(ctx.gpu.queue(), &transform);
        }

        self.ui.begin_frame(UiInput::from_engine(ctx.input, ctx.input_frame));
        if build_overlay(&mut self.ui, &mut self.spin.paused) {
            log::info!("rotation {}", if self.spin.paused { "paused" } else { "resumed" });
        }

        let ui = &self.ui;
        ctx.render(CLEAR, |rctx, target| {
            scene.cube.draw(rctx, target);
            scene.overlay.render(rctx, target, ui);
        })
    }

    fn on_exit(&mut self) {
        self.scene = None;
        log::info!("textured cube resources released");
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "VENTANA JUEGO".to_string(),
        ..Default::default()
    };
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..Default::default()
    };

    if let Err(e) = Runtime::run(config, gpu_init, TexturedApp::new()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use gpiep_engine::shader::UniformBinding;
    use gpiep_engine::text::FontSystem;

    use super::*;

    #[test]
    fn shaders_link_with_texture_slots() {
        let program = compile_program("textured cube", VERTEX_SHADER, FRAGMENT_SHADER)
            .expect("valid shaders");
        assert_eq!(
            program.uniform_binding("transform"),
            Some(UniformBinding { group: 0, binding: 0 })
        );
        assert_eq!(
            program.uniform_binding("texture1"),
            Some(UniformBinding { group: 1, binding: 0 })
        );
        assert_eq!(
            program.uniform_binding("texture1_sampler"),
            Some(UniformBinding { group: 1, binding: 1 })
        );
    }

    #[test]
    fn starts_paused() {
        let app = TexturedApp::new();
        assert!(app.spin.paused);
        assert_eq!(app.spin.current(), gpiep_engine::math::Mat4::IDENTITY);
    }

    #[test]
    fn clicking_detener_resumes_rotation() {
        let mut ui = Ui::with_fonts(UiStyle::default(), FontSystem::new(), None);
        let mut spin = SpinState::new(Spin::default(), true);

        ui.begin_frame(UiInput::default());
        build_overlay(&mut ui, &mut spin.paused);
        assert_eq!(spin.advance(1.0), None);

        // The checkbox is the second row, just under the label.
        let window = ui.window_rect(OVERLAY_TITLE).expect("overlay laid out");
        let style = UiStyle::default();
        let label_h = style.font_size * 1.2;
        let row_y = window.origin.y + style.title_height + style.padding + label_h + style.spacing;
        let press = UiInput {
            pointer: Some(gpiep_engine::coords::Vec2::new(
                window.origin.x + style.padding + 2.0,
                row_y + 2.0,
            )),
            primary_down: true,
            primary_pressed: true,
        };

        ui.begin_frame(press);
        assert!(build_overlay(&mut ui, &mut spin.paused));
        assert!(!spin.paused);
        assert!(spin.advance(2.0).is_some());
    }

    #[test]
    fn missing_texture_is_an_error() {
        let err = TextureImage::load("definitely-missing/plano.png").expect_err("no such file");
        assert!(err.to_string().contains("plano.png"));
    }
}
