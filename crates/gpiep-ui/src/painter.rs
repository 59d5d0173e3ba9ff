use gpiep_engine::coords::{Rect, Vec2};
use gpiep_engine::paint::Color;
use gpiep_engine::scene::DrawList;
use gpiep_engine::text::{FontId, FontSystem};

/// Average advance used to lay out text when no font is loaded.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Drawing surface handed to widgets.
///
/// Wraps a `DrawList` with the current font and pointer so widgets can
/// express hover visuals directly while painting.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    fonts: &'a FontSystem,
    font: Option<FontId>,
    /// Pointer position in logical pixels, if over the window.
    pub pointer: Option<Vec2>,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(
        draw_list: &'a mut DrawList,
        fonts: &'a FontSystem,
        font: Option<FontId>,
        pointer: Option<Vec2>,
    ) -> Self {
        Self { draw_list, fonts, font, pointer }
    }

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Size of one line of `text`.
    ///
    /// Without a font the width is estimated so layout stays stable.
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        match self.font {
            Some(font) => self.fonts.measure_text(text, font, size),
            None => Vec2::new(text.chars().count() as f32 * size * FALLBACK_ADVANCE, size * 1.2),
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_list.push_rect(rect, color);
    }

    /// Rectangle outline of `width`, drawn inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        let w = width.min(rect.size.x * 0.5).min(rect.size.y * 0.5);
        let Rect { origin: o, size: s } = rect;
        self.fill_rect(Rect::new(o.x, o.y, s.x, w), color);
        self.fill_rect(Rect::new(o.x, o.y + s.y - w, s.x, w), color);
        self.fill_rect(Rect::new(o.x, o.y + w, w, s.y - 2.0 * w), color);
        self.fill_rect(Rect::new(o.x + s.x - w, o.y + w, w, s.y - 2.0 * w), color);
    }

    /// Text with its top-left at `origin`. Dropped when no font is loaded.
    pub fn text(&mut self, text: &str, size: f32, color: Color, origin: Vec2) {
        if let Some(font) = self.font {
            self.draw_list.push_text(text, font, size, color, origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_is_four_edges() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut p = Painter::new(&mut list, &fonts, None, None);
        p.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0, Color::from_premul(0.0, 0.0, 0.0, 1.0));

        let edges: Vec<Rect> = list.rects().map(|r| r.rect).collect();
        assert_eq!(
            edges,
            vec![
                Rect::new(0.0, 0.0, 10.0, 1.0),
                Rect::new(0.0, 9.0, 10.0, 1.0),
                Rect::new(0.0, 1.0, 1.0, 8.0),
                Rect::new(9.0, 1.0, 1.0, 8.0),
            ]
        );
    }

    #[test]
    fn text_without_font_is_measured_but_not_drawn() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let mut p = Painter::new(&mut list, &fonts, None, None);

        let size = p.measure_text("DETENER", 10.0);
        assert!(size.x > 0.0);
        p.text("DETENER", 10.0, Color::from_premul(1.0, 1.0, 1.0, 1.0), Vec2::zero());
        assert_eq!(list.texts().count(), 0);
    }

    #[test]
    fn hover_needs_a_pointer() {
        let mut list = DrawList::new();
        let fonts = FontSystem::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        let p = Painter::new(&mut list, &fonts, None, None);
        assert!(!p.is_hovered(rect));
        let p = Painter::new(&mut list, &fonts, None, Some(Vec2::new(5.0, 5.0)));
        assert!(p.is_hovered(rect));
    }
}
