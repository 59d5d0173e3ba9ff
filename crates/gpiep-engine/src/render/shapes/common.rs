//! GPU types and pipeline setup shared by the overlay renderers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) const SIZE: wgpu::BufferSize =
        wgpu::BufferSize::new(std::mem::size_of::<ViewportUniform>() as u64).unwrap();

    pub(super) fn from_viewport(v: Viewport) -> Self {
        Self {
            viewport: [v.width.max(1.0), v.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

pub(super) fn viewport_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(ViewportUniform::SIZE),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: ViewportUniform::SIZE.get(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub(super) const QUAD_INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;

/// Unit quad shared by every instance.
pub(super) struct UnitQuad {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl UnitQuad {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        Self {
            vbo: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            ibo: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            }),
        }
    }
}

/// Growable instance buffer; capacity doubles, never shrinks.
pub(super) struct InstanceBuffer {
    label: &'static str,
    stride: usize,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    pub(super) fn new(label: &'static str, stride: usize) -> Self {
        Self { label, stride, buffer: None, capacity: 0 }
    }

    /// Uploads `data`, reallocating when it does not fit.
    pub(super) fn write<T: Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> Option<&wgpu::Buffer> {
        if data.is_empty() {
            return None;
        }
        if self.buffer.is_none() || data.len() > self.capacity {
            let capacity = grown_capacity(data.len());
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (capacity * self.stride) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }
        let buffer = self.buffer.as_ref()?;
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        Some(buffer)
    }
}

fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

pub(super) struct OverlayPipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a wgpu::ShaderModule,
    pub bind_group_layout: &'a wgpu::BindGroupLayout,
    pub instance_layout: wgpu::VertexBufferLayout<'static>,
    pub format: wgpu::TextureFormat,
}

/// Instanced quad pipeline with premultiplied alpha blending.
pub(super) fn create_overlay_pipeline(
    device: &wgpu::Device,
    desc: OverlayPipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[desc.bind_group_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), desc.instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(ViewportUniform::SIZE.get(), 16);
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let u = ViewportUniform::from_viewport(Viewport::new(0.0, 300.0));
        assert_eq!(u.viewport, [1.0, 300.0]);
    }

    #[test]
    fn instance_capacity_grows_in_powers_of_two() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }
}
