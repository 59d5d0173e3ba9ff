use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    create_overlay_pipeline, create_viewport_ubo, viewport_layout_entry, InstanceBuffer,
    OverlayPipelineDesc, UnitQuad, ViewportUniform, QUAD_INDEX_COUNT,
};

/// Solid rectangle renderer.
///
/// Geometry is in logical pixels and converted to NDC in the vertex shader.
/// Colors are linear premultiplied RGBA (`paint::Color`).
pub struct RectRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    quad: UnitQuad,
    instances: InstanceBuffer,
}

impl RectRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gpiep rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rect.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gpiep rect bgl"),
            entries: &[viewport_layout_entry()],
        });

        let pipeline = create_overlay_pipeline(
            device,
            OverlayPipelineDesc {
                label: "gpiep rect pipeline",
                shader: &shader,
                bind_group_layout: &bind_group_layout,
                instance_layout: RectInstance::layout(),
                format,
            },
        );

        let viewport_ubo = create_viewport_ubo(device, "gpiep rect viewport ubo");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gpiep rect bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            bind_group,
            viewport_ubo,
            quad: UnitQuad::new(device, "gpiep rect quad"),
            instances: InstanceBuffer::new(
                "gpiep rect instance vbo",
                std::mem::size_of::<RectInstance>(),
            ),
        }
    }

    /// Draws every `DrawCmd::Rect` in `draw_list`, in order, in one instanced call.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        let instances = collect_instances(draw_list);
        let count = instances.len() as u32;

        let Some(instance_vbo) = self.instances.write(ctx.device, ctx.queue, &instances) else {
            return;
        };
        ctx.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform::from_viewport(ctx.viewport)),
        );

        let mut rpass = target.load_pass("gpiep rect pass");
        ctx.pixel_viewport.apply(&mut rpass);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..count);
    }
}

fn collect_instances(draw_list: &DrawList) -> Vec<RectInstance> {
    draw_list
        .items()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCmd::Rect(r) => Some(RectInstance {
                origin: [r.rect.origin.x, r.rect.origin.y],
                size: [r.rect.size.x, r.rect.size.y],
                color: r.color.to_array(),
            }),
            DrawCmd::Text(_) => None,
        })
        .collect()
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::text::FontId;

    #[test]
    fn only_rect_commands_become_instances() {
        let mut list = DrawList::new();
        let c = Color::from_premul(0.5, 0.0, 0.0, 0.5);
        list.push_rect(Rect::new(1.0, 2.0, 3.0, 4.0), c);
        list.push_text("x", FontId(0), 12.0, c, Vec2::zero());

        let instances = collect_instances(&list);
        assert_eq!(
            instances,
            vec![RectInstance { origin: [1.0, 2.0], size: [3.0, 4.0], color: [0.5, 0.0, 0.0, 0.5] }]
        );
    }

    #[test]
    fn shader_matches_instance_layout() {
        let program = crate::shader::compile_program(
            "rect",
            include_str!("shaders/rect.wgsl"),
            include_str!("shaders/rect.wgsl"),
        )
        .expect("rect shader is valid");
        assert!(program.uniform_binding("u_viewport").is_some());
    }
}
