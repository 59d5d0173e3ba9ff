use gpiep_engine::render::shapes::{RectRenderer, TextRenderer};
use gpiep_engine::render::{RenderCtx, RenderTarget};

use crate::context::Ui;

/// Draws a [`Ui`]'s commands on top of the current frame.
pub struct UiRenderer {
    rects: RectRenderer,
    text: TextRenderer,
}

impl UiRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            rects: RectRenderer::new(device, format),
            text: TextRenderer::new(device, format),
        }
    }

    /// Rectangles first, then text, so labels sit on their backgrounds.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, ui: &Ui) {
        let draw_list = ui.draw_list();
        if draw_list.is_empty() {
            return;
        }
        self.rects.render(ctx, target, draw_list);
        self.text.render(ctx, target, draw_list, ui.fonts());
    }
}
