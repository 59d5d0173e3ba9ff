use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::DrawList;
use crate::text::FontSystem;

use super::common::{
    create_overlay_pipeline, create_viewport_ubo, viewport_layout_entry, InstanceBuffer,
    OverlayPipelineDesc, UnitQuad, ViewportUniform, QUAD_INDEX_COUNT,
};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Shelf allocator for the glyph atlas.
///
/// Glyphs fill rows left to right; a glyph that does not fit starts a new row
/// under the tallest glyph of the current one.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Top-left corner reserved for a `w`×`h` glyph.
    ///
    /// `None` once the atlas is full, or for a glyph that could never fit;
    /// the latter leaves the atlas open for smaller glyphs.
    fn allocate(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size || h + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let pos = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(pos)
    }
}

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue on first use and cached in an R8 atlas
/// for the renderer's lifetime, keyed by `GlyphRasterConfig` (font, glyph, size).
pub struct TextRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    atlas: wgpu::Texture,
    packer: ShelfPacker,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    quad: UnitQuad,
    instances: InstanceBuffer,
    layout: Layout<()>,
    warned_full: bool,
}

impl TextRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gpiep text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("gpiep text bgl"),
            entries: &[
                viewport_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_overlay_pipeline(
            device,
            OverlayPipelineDesc {
                label: "gpiep text pipeline",
                shader: &shader,
                bind_group_layout: &bind_group_layout,
                instance_layout: GlyphInstance::layout(),
                format,
            },
        );

        let atlas = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gpiep text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("gpiep text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = create_viewport_ubo(device, "gpiep text viewport ubo");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gpiep text bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            pipeline,
            bind_group,
            viewport_ubo,
            atlas,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyph_cache: HashMap::new(),
            quad: UnitQuad::new(device, "gpiep text quad"),
            instances: InstanceBuffer::new(
                "gpiep text instance vbo",
                std::mem::size_of::<GlyphInstance>(),
            ),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            warned_full: false,
        }
    }

    /// Draws every `DrawCmd::Text` in `draw_list`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        fonts: &FontSystem,
    ) {
        let mut instances: Vec<GlyphInstance> = Vec::new();

        for cmd in draw_list.texts() {
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x,
                y: cmd.origin.y,
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

            // Copy positions out so the layout borrow ends before `&mut self` calls.
            let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
                .layout
                .glyphs()
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, g.x, g.y, g.width, g.height))
                .collect();

            for (key, x, y, w, h) in glyphs {
                if !self.glyph_cache.contains_key(&key) {
                    let (metrics, bitmap) = font.rasterize_config(key);
                    if metrics.width == 0 || metrics.height == 0 {
                        continue;
                    }
                    let (w, h) = (metrics.width as u32, metrics.height as u32);
                    match self.upload_glyph(ctx, &bitmap, w, h) {
                        Some(entry) => {
                            self.glyph_cache.insert(key, entry);
                        }
                        None => continue,
                    }
                }

                let Some(cached) = self.glyph_cache.get(&key) else { continue };
                instances.push(GlyphInstance {
                    dst_min: [x, y],
                    dst_max: [x + w as f32, y + h as f32],
                    uv_min: cached.uv_min,
                    uv_max: cached.uv_max,
                    color: cmd.color.to_array(),
                });
            }
        }

        let count = instances.len() as u32;
        let Some(instance_vbo) = self.instances.write(ctx.device, ctx.queue, &instances) else {
            return;
        };
        ctx.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform::from_viewport(ctx.viewport)),
        );

        let mut rpass = target.load_pass("gpiep text pass");
        ctx.pixel_viewport.apply(&mut rpass);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..count);
    }

    fn upload_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let Some((gx, gy)) = self.packer.allocate(w, h) else {
            if !self.packer.full {
                log::warn!("TextRenderer: {w}x{h} glyph exceeds the {ATLAS_SIZE}px atlas, skipped");
            } else if !self.warned_full {
                log::warn!("TextRenderer: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); some glyphs will not be drawn");
                self.warned_full = true;
            }
            return None;
        };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }
}

/// Per-glyph instance (48 bytes): destination rect, atlas UV rect, color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_fill_a_row_then_wrap() {
        let mut packer = ShelfPacker::new(32);
        assert_eq!(packer.allocate(10, 5), Some((1, 1)));
        assert_eq!(packer.allocate(10, 8), Some((12, 1)));
        // 23 + 10 + 1 > 32: next row starts below the tallest glyph (8).
        assert_eq!(packer.allocate(10, 4), Some((1, 10)));
    }

    #[test]
    fn full_atlas_rejects_everything_after() {
        let mut packer = ShelfPacker::new(16);
        assert!(packer.allocate(14, 14).is_some());
        assert_eq!(packer.allocate(4, 4), None);
        assert_eq!(packer.allocate(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut packer = ShelfPacker::new(16);
        assert_eq!(packer.allocate(20, 2), None);
        assert_eq!(packer.allocate(2, 20), None);
    }

    #[test]
    fn oversized_glyph_leaves_room_for_small_ones() {
        let mut packer = ShelfPacker::new(16);
        assert_eq!(packer.allocate(40, 3), None);
        assert!(!packer.full);
        assert_eq!(packer.allocate(4, 4), Some((1, 1)));
        assert_eq!(packer.allocate(4, 4), Some((6, 1)));
    }

    #[test]
    fn instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }

    #[test]
    fn shader_is_valid() {
        let program = crate::shader::compile_program(
            "text",
            include_str!("shaders/text.wgsl"),
            include_str!("shaders/text.wgsl"),
        )
        .expect("text shader is valid");
        assert!(program.uniform_binding("t_atlas").is_some());
    }
}
