use std::fmt;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Fixed list of system fonts tried by [`FontSystem::load_first`].
pub const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts.
///
/// Fonts are immutable after loading; the text renderer borrows the system
/// each frame to rasterize glyphs on demand.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    /// Loads the first readable, parseable font among `paths`.
    pub fn load_first<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<FontId, FontLoadError> {
        let mut last_err = None;
        for path in paths {
            let path = path.as_ref();
            let Ok(bytes) = std::fs::read(path) else { continue };
            match self.load_font(&bytes) {
                Ok(id) => {
                    log::info!("loaded font {}", path.display());
                    return Ok(id);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| FontLoadError("no readable font found".to_string())))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Size of a single laid-out line in logical pixels.
    ///
    /// Unknown fonts measure as zero width and `size * 1.2` high.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, size * 1.2);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * 1.2);
        }

        // Pen position after the last glyph, not its bitmap edge.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(size);
        Vec2::new(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fonts = FontSystem::new();
        assert!(fonts.load_font(b"not a font").is_err());
    }

    #[test]
    fn missing_paths_fail_to_load() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_first(&["/nonexistent/a.ttf", "/nonexistent/b.ttf"]).unwrap_err();
        assert!(err.to_string().contains("no readable font"));
    }

    #[test]
    fn unknown_font_measures_empty() {
        let fonts = FontSystem::new();
        let size = fonts.measure_text("DETENER", FontId(3), 10.0);
        assert_eq!(size, Vec2::new(0.0, 12.0));
    }
}
