//! Overlay draw stream.
//!
//! Commands are painted in insertion order; later commands land on top.

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::text::FontId;

/// Solid rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Single line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text block in logical pixels.
    pub origin: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Text(TextCmd),
}

/// Recorded draw stream for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded commands, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Moves every command of `other` to the end of this list, leaving `other` empty.
    pub fn append(&mut self, other: &mut DrawList) {
        self.items.append(&mut other.items);
    }

    /// Records a solid rectangle. Empty rectangles are dropped.
    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || color.a <= 0.0 {
            return;
        }
        self.items.push(DrawCmd::Rect(RectCmd { rect, color }));
    }

    /// Records a line of text.
    pub fn push_text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.items.push(DrawCmd::Text(TextCmd { text, font, size, color, origin }));
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectCmd> {
        self.items.iter().filter_map(|cmd| match cmd {
            DrawCmd::Rect(r) => Some(r),
            DrawCmd::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextCmd> {
        self.items.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text(t) => Some(t),
            DrawCmd::Rect(_) => None,
        })
    }
}
