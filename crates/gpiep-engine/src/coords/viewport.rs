/// Viewport size in logical pixels.
///
/// Overlay renderers use this as the basis for converting logical px positions
/// to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Render-pass viewport in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PixelViewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelViewport {
    /// Full-surface viewport `(0, 0, width, height)`; `None` for a zero-sized surface.
    pub fn from_size(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self {
            x: 0,
            y: 0,
            width,
            height,
        })
    }

    /// Applies the viewport to a render pass.
    pub fn apply(self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_viewport(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
            0.0,
            1.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_surface_viewport() {
        assert_eq!(
            PixelViewport::from_size(800, 600),
            Some(PixelViewport { x: 0, y: 0, width: 800, height: 600 })
        );
    }

    #[test]
    fn zero_sized_surface_has_no_viewport() {
        assert_eq!(PixelViewport::from_size(0, 600), None);
        assert_eq!(PixelViewport::from_size(800, 0), None);
    }
}
