/// Linear premultiplied RGBA color.
///
/// Invariant: `rgb` components are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplies straight-alpha components, clamping each to `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Straight-alpha bytes (`0`–`255`), as written in hex literals.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Same color with its alpha scaled by `factor`.
    #[inline]
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self { r: self.r * f, g: self.g * f, b: self.b * f, a: self.a * f }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Straight (non-premultiplied) components as a `wgpu::Color`, for clear ops.
    pub fn to_wgpu(self) -> wgpu::Color {
        if self.a <= 0.0 {
            return wgpu::Color::TRANSPARENT;
        }
        let inv = 1.0 / self.a as f64;
        wgpu::Color {
            r: self.r as f64 * inv,
            g: self.g as f64 * inv,
            b: self.b as f64 * inv,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_alpha_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn out_of_range_components_are_clamped() {
        let c = Color::from_straight(2.0, -1.0, 0.5, 3.0);
        assert_eq!(c, Color::from_premul(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn clear_color_round_trips_through_wgpu() {
        let c = Color::from_straight(0.2, 0.3, 0.3, 1.0).to_wgpu();
        assert!((c.r - 0.2).abs() < 1e-6);
        assert!((c.g - 0.3).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
        assert_eq!(Color::transparent().to_wgpu(), wgpu::Color::TRANSPARENT);
    }
}
