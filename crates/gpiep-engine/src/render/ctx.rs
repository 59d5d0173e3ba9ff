use crate::coords::{PixelViewport, Viewport};

/// Renderer-facing context for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Surface size in logical pixels.
    pub viewport: Viewport,
    /// Surface size in physical pixels; applied to every pass.
    pub pixel_viewport: PixelViewport,
    pub scale_factor: f32,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        pixel_viewport: PixelViewport,
        scale_factor: f32,
    ) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            device,
            queue,
            surface_format,
            viewport: logical_viewport(pixel_viewport, scale_factor),
            pixel_viewport,
            scale_factor,
        }
    }
}

fn logical_viewport(px: PixelViewport, scale_factor: f32) -> Viewport {
    Viewport::new(px.width as f32 / scale_factor, px.height as f32 / scale_factor)
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Begins a pass that keeps the existing color contents.
    pub fn load_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    /// Clears the color target.
    pub fn clear(&mut self, color: wgpu::Color) {
        let _pass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gpiep clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_viewport_divides_by_scale() {
        let px = PixelViewport::from_size(1600, 1200).expect("non-zero");
        assert_eq!(logical_viewport(px, 2.0), Viewport::new(800.0, 600.0));
        assert_eq!(logical_viewport(px, 1.0), Viewport::new(1600.0, 1200.0));
    }
}
