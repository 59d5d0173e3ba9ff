use std::path::Path;

use super::{TextureError, TextureImage};

/// A sampled 2D texture ready to be bound to a shader.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Uploads an image decoded from `path`.
    ///
    /// Images larger than the device's 2D texture limit are rejected here
    /// instead of failing device validation.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        check_dimensions(image, device.limits().max_texture_dimension_2d).map_err(|message| {
            TextureError {
                path: path.to_path_buf(),
                message,
            }
        })?;

        Ok(Self::from_rgba(
            device,
            queue,
            image.width(),
            image.height(),
            &image.to_rgba(),
            &path.display().to_string(),
        ))
    }

    /// 1x1 opaque black texture, bound when an image could not be loaded.
    pub fn fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_rgba(device, queue, 1, 1, &[0, 0, 0, 255], "fallback texture")
    }

    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        rgba: &[u8],
        label: &str,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Linear filtering, repeat wrap on both axes.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

fn check_dimensions(image: &TextureImage, max_dimension: u32) -> Result<(), String> {
    let (w, h) = (image.width(), image.height());
    if w > max_dimension || h > max_dimension {
        return Err(format!("image is {w}x{h}, larger than the {max_dimension}px texture limit"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    fn decoded(width: u32, height: u32) -> TextureImage {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        TextureImage::decode(&bytes).expect("decode png")
    }

    #[test]
    fn image_wider_than_limit_is_rejected() {
        let max = wgpu::Limits::default().max_texture_dimension_2d;
        let err = check_dimensions(&decoded(max + 1, 1), max).unwrap_err();
        assert!(err.contains(&format!("{}x1", max + 1)));
    }

    #[test]
    fn image_taller_than_limit_is_rejected() {
        assert!(check_dimensions(&decoded(1, 65), 64).is_err());
    }

    #[test]
    fn image_at_limit_is_accepted() {
        assert_eq!(check_dimensions(&decoded(64, 64), 64), Ok(()));
    }
}
