//! Rotating cube with per-vertex colors.

use gpiep_engine::core::{App, AppControl, FrameCtx, InitCtx};
use gpiep_engine::device::GpuInit;
use gpiep_engine::logging::{init_logging, LoggingConfig};
use gpiep_engine::mesh::color_cube;
use gpiep_engine::motion::Spin;
use gpiep_engine::paint::Color;
use gpiep_engine::render::{CubeBindings, CubeRenderer};
use gpiep_engine::shader::compile_program;
use gpiep_engine::window::{Runtime, RuntimeConfig};

const VERTEX_SHADER: &str = include_str!("shaders/color.vert.wgsl");
const FRAGMENT_SHADER: &str = include_str!("shaders/color.frag.wgsl");

const CLEAR: Color = Color::from_premul(0.2, 0.3, 0.3, 1.0);

#[derive(Default)]
struct CubeApp {
    spin: Spin,
    cube: Option<CubeRenderer>,
}

impl App for CubeApp {
    fn on_init(&mut self, ctx: &InitCtx<'_>) {
        let program = match compile_program("color cube", VERTEX_SHADER, FRAGMENT_SHADER) {
            Ok(program) => Some(program),
            Err(e) => {
                for err in &e.errors {
                    log::error!("{err}");
                }
                None
            }
        };

        self.cube = Some(CubeRenderer::new(
            ctx.device,
            ctx.surface_format,
            &color_cube(),
            program.as_ref(),
            CubeBindings::TransformOnly,
        ));
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(cube) = self.cube.as_ref() else {
            return AppControl::Continue;
        };

        let transform = self.spin.transform_at(ctx.time.elapsed);
        cube.upload_transform(ctx.gpu.queue(), &transform);

        ctx.render(CLEAR, |rctx, target| cube.draw(rctx, target))
    }

    fn on_exit(&mut self) {
        self.cube = None;
        log::info!("cube resources released");
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

    if let Err(e) = Runtime::run(config, gpu_init, CubeApp::default()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use gpiep_engine::shader::UniformBinding;

    use super::*;

    #[test]
    fn shaders_link() {
        let program =
            compile_program("color cube", VERTEX_SHADER, FRAGMENT_SHADER).expect("valid shaders");
        assert_eq!(
            program.uniform_binding("transform"),
            Some(UniformBinding { group: 0, binding: 0 })
        );
        assert_eq!(program.vertex().entry_point(), "vs_main");
        assert_eq!(program.fragment().entry_point(), "fs_main");
    }

    #[test]
    fn clear_color_is_opaque_teal() {
        let c = CLEAR.to_wgpu();
        assert!((c.r - 0.2).abs() < 1e-6);
        assert!((c.g - 0.3).abs() < 1e-6);
        assert!((c.b - 0.3).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
