use wgpu::util::DeviceExt;

use crate::math::Mat4;
use crate::mesh::{Mesh, Vertex};
use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{LinkedProgram, UniformBinding};
use crate::texture::GpuTexture;

const TRANSFORM_SLOT: UniformBinding = UniformBinding { group: 0, binding: 0 };
const TEXTURE_SLOT: UniformBinding = UniformBinding { group: 1, binding: 0 };
const SAMPLER_SLOT: UniformBinding = UniformBinding { group: 1, binding: 1 };

/// Resources bound alongside the transform uniform.
#[derive(Copy, Clone)]
pub enum CubeBindings<'a> {
    TransformOnly,
    /// `texture1` / `texture1_sampler` at group 1.
    Textured(&'a GpuTexture),
}

/// Draws one static indexed mesh with a 4x4 transform uniform.
///
/// Without a pipeline (shader failed to build) `draw` records nothing and the
/// frame shows only the clear color.
///
/// Field order is drop order: buffers, then bind groups, then the pipeline.
pub struct CubeRenderer {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    transform_ubo: wgpu::Buffer,
    index_count: u32,

    transform_bind_group: wgpu::BindGroup,
    texture_bind_group: Option<wgpu::BindGroup>,

    pipeline: Option<wgpu::RenderPipeline>,
}

impl CubeRenderer {
    pub fn new<V: Vertex>(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        mesh: &Mesh<V>,
        program: Option<&LinkedProgram>,
        bindings: CubeBindings<'_>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gpiep cube vbo"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gpiep cube ibo"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Identity until the first upload, so a paused cube is still visible.
        let transform_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gpiep cube transform ubo"),
            contents: bytemuck::bytes_of(&Mat4::IDENTITY),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gpiep cube transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: TRANSFORM_SLOT.binding,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Mat4>() as u64),
                },
                count: None,
            }],
        });
        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gpiep cube transform bind group"),
            layout: &transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: TRANSFORM_SLOT.binding,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        let texture = match bindings {
            CubeBindings::TransformOnly => None,
            CubeBindings::Textured(texture) => {
                let layout = texture_bind_group_layout(device);
                let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("gpiep cube texture bind group"),
                    layout: &layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: TEXTURE_SLOT.binding,
                            resource: wgpu::BindingResource::TextureView(&texture.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: SAMPLER_SLOT.binding,
                            resource: wgpu::BindingResource::Sampler(&texture.sampler),
                        },
                    ],
                });
                Some((layout, group))
            }
        };

        let pipeline = program.and_then(|program| {
            if !bindings_match(program, texture.is_some()) {
                log::error!(
                    "shader program `{}` does not declare the expected resource bindings; cube disabled",
                    program.label()
                );
                return None;
            }

            let mut layouts = vec![&transform_layout];
            if let Some((layout, _)) = &texture {
                layouts.push(layout);
            }
            Some(create_pipeline::<V>(device, format, program, &layouts))
        });

        if pipeline.is_some() {
            log::info!("cube renderer ready ({} indices)", mesh.index_count());
        }

        Self {
            vertex_buffer,
            index_buffer,
            transform_ubo,
            index_count: mesh.index_count(),
            transform_bind_group,
            texture_bind_group: texture.map(|(_, group)| group),
            pipeline,
        }
    }

    /// Writes `transform` into the uniform read by the next draw.
    pub fn upload_transform(&self, queue: &wgpu::Queue, transform: &Mat4) {
        queue.write_buffer(&self.transform_ubo, 0, bytemuck::bytes_of(transform));
    }

    /// Draws all indices on top of the current frame contents.
    pub fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass = target.load_pass("gpiep cube pass");
        ctx.pixel_viewport.apply(&mut rpass);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(TRANSFORM_SLOT.group, &self.transform_bind_group, &[]);
        if let Some(group) = &self.texture_bind_group {
            rpass.set_bind_group(TEXTURE_SLOT.group, group, &[]);
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("gpiep cube texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: TEXTURE_SLOT.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: SAMPLER_SLOT.binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Checks the program's named resources against the fixed bind group slots.
fn bindings_match(program: &LinkedProgram, textured: bool) -> bool {
    let transform_ok = program.uniform_binding("transform") == Some(TRANSFORM_SLOT);
    if !textured {
        return transform_ok;
    }
    transform_ok
        && program.uniform_binding("texture1") == Some(TEXTURE_SLOT)
        && program.uniform_binding("texture1_sampler") == Some(SAMPLER_SLOT)
}

fn create_pipeline<V: Vertex>(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    program: &LinkedProgram,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let modules = program.create_modules(device);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("gpiep cube pipeline layout"),
        bind_group_layouts,
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(program.label()),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &modules.vertex,
            entry_point: Some(modules.vertex_entry.as_str()),
            compilation_options: Default::default(),
            buffers: &[V::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &modules.fragment,
            entry_point: Some(modules.fragment_entry.as_str()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        // No culling and no depth test: all 12 triangles are rasterized in index order.
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
    use crate::shader::compile_program;

    const VS: &str = r#"
@group(0) @binding(0) var<uniform> transform: mat4x4<f32>;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return transform * vec4<f32>(position, 1.0);
}
"#;

    const FS: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#;

    const FS_TEXTURED: &str = r#"
@group(1) @binding(0) var texture1: texture_2d<f32>;
@group(1) @binding(1) var texture1_sampler: sampler;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return textureSample(texture1, texture1_sampler, vec2<f32>(0.5));
}
"#;

    const VS_WRONG_SLOT: &str = r#"
@group(2) @binding(3) var<uniform> transform: mat4x4<f32>;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return transform * vec4<f32>(position, 1.0);
}
"#;

    #[test]
    fn color_program_matches_transform_slot() {
        let program = compile_program("plain", VS, FS).expect("valid");
        assert!(bindings_match(&program, false));
        assert!(!bindings_match(&program, true));
    }

    #[test]
    fn textured_program_matches_all_slots() {
        let program = compile_program("textured", VS, FS_TEXTURED).expect("valid");
        assert!(bindings_match(&program, true));
    }

    #[test]
    fn misplaced_transform_is_rejected() {
        let program = compile_program("wrong", VS_WRONG_SLOT, FS).expect("valid");
        assert!(!bindings_match(&program, false));
    }
}
