use std::collections::HashMap;

use gpiep_engine::coords::{Rect, Vec2};
use gpiep_engine::input::{InputFrame, InputState, MouseButton};
use gpiep_engine::scene::DrawList;
use gpiep_engine::text::{FontId, FontSystem, SYSTEM_FONT_PATHS};

use crate::painter::Painter;
use crate::style::UiStyle;

/// Diagonal step between windows opened in the same session.
const CASCADE_STEP: f32 = 24.0;

/// Pointer snapshot for one UI frame, in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UiInput {
    pub pointer: Option<Vec2>,
    /// Primary button is held.
    pub primary_down: bool,
    /// Primary button went down since the previous frame.
    pub primary_pressed: bool,
}

impl UiInput {
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            pointer: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            primary_down: state.button_down(MouseButton::Left),
            primary_pressed: frame.pressed(MouseButton::Left),
        }
    }

    #[inline]
    fn pressed_in(&self, rect: Rect) -> bool {
        self.primary_pressed && self.pointer.is_some_and(|p| rect.contains(p))
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct WindowState {
    pos: Vec2,
    /// Size measured on the previous frame; used for hit-testing the title bar.
    size: Vec2,
}

struct Drag {
    title: String,
    /// Pointer position relative to the window origin when the drag began.
    grab: Vec2,
}

/// Immediate-mode overlay context.
///
/// Widgets are declared every frame inside [`Ui::window`]; the resulting
/// commands are read back with [`Ui::draw_list`]. Window positions persist
/// across frames, keyed by title.
pub struct Ui {
    fonts: FontSystem,
    font: Option<FontId>,
    style: UiStyle,
    input: UiInput,

    windows: HashMap<String, WindowState>,
    drag: Option<Drag>,

    draw_list: DrawList,
    /// Window contents, recorded before the window frame is known.
    scratch: DrawList,
}

impl Ui {
    /// Creates a context and loads the first available system font.
    ///
    /// Without a font the overlay still works; only text is left out.
    pub fn new(style: UiStyle) -> Self {
        let mut fonts = FontSystem::new();
        let font = match fonts.load_first(SYSTEM_FONT_PATHS) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("{e}; overlay text disabled");
                None
            }
        };
        Self::with_fonts(style, fonts, font)
    }

    pub fn with_fonts(style: UiStyle, fonts: FontSystem, font: Option<FontId>) -> Self {
        Self {
            fonts,
            font,
            style,
            input: UiInput::default(),
            windows: HashMap::new(),
            drag: None,
            draw_list: DrawList::new(),
            scratch: DrawList::new(),
        }
    }

    #[inline]
    pub fn style(&self) -> &UiStyle {
        &self.style
    }

    #[inline]
    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    /// Commands recorded since the last [`Ui::begin_frame`].
    #[inline]
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Screen rectangle of a window as of its last layout.
    pub fn window_rect(&self, title: &str) -> Option<Rect> {
        self.windows
            .get(title)
            .map(|w| Rect::from_origin_size(w.pos, w.size))
    }

    /// Starts a new frame: clears recorded commands and latches `input`.
    pub fn begin_frame(&mut self, input: UiInput) {
        self.input = input;
        self.draw_list.clear();
        self.scratch.clear();
        if !input.primary_down {
            self.drag = None;
        }
    }

    /// Declares a movable, auto-sized window and lays out its contents.
    pub fn window<R>(
        &mut self,
        title: &str,
        add_contents: impl FnOnce(&mut WindowUi<'_>) -> R,
    ) -> R {
        let style = &self.style;
        let opened = self.windows.len() as f32;
        let mut state = *self.windows.entry(title.to_string()).or_insert_with(|| WindowState {
            pos: style.first_window_pos + Vec2::new(opened * CASCADE_STEP, opened * CASCADE_STEP),
            size: Vec2::new(style.min_window_width, style.title_height),
        });

        let title_bar =
            Rect::from_origin_size(state.pos, Vec2::new(state.size.x, style.title_height));
        if self.drag.is_none() && self.input.pressed_in(title_bar) {
            if let Some(p) = self.input.pointer {
                self.drag = Some(Drag {
                    title: title.to_string(),
                    grab: p - state.pos,
                });
            }
        }

        let dragging = self.drag.as_ref().is_some_and(|d| d.title == title);
        if dragging {
            if let (Some(p), Some(drag)) = (self.input.pointer, self.drag.as_ref()) {
                state.pos = p - drag.grab;
            }
        }

        let content_origin =
            state.pos + Vec2::new(style.padding, style.title_height + style.padding);
        let (result, content) = {
            // The title bar press that started a drag must not reach widgets.
            let mut input = self.input;
            if dragging {
                input.primary_pressed = false;
            }
            let painter = Painter::new(&mut self.scratch, &self.fonts, self.font, input.pointer);
            let mut ui = WindowUi::new(painter, style, input, content_origin);
            let result = add_contents(&mut ui);
            (result, ui.content_size())
        };

        let mut painter =
            Painter::new(&mut self.draw_list, &self.fonts, self.font, self.input.pointer);
        let title_size = painter.measure_text(title, style.font_size);
        let width = (content.x.max(title_size.x) + 2.0 * style.padding).max(style.min_window_width);
        let height = style.title_height + content.y + 2.0 * style.padding;
        state.size = Vec2::new(width, height);

        let frame = Rect::from_origin_size(state.pos, state.size);
        let title_bar = Rect::from_origin_size(state.pos, Vec2::new(width, style.title_height));
        painter.fill_rect(frame, style.window_bg);
        let title_bg = if dragging || painter.is_hovered(title_bar) {
            style.title_bg_active
        } else {
            style.title_bg
        };
        painter.fill_rect(title_bar, title_bg);
        painter.text(
            title,
            style.font_size,
            style.text_color,
            state.pos + Vec2::new(style.padding, (style.title_height - title_size.y) * 0.5),
        );
        self.draw_list.append(&mut self.scratch);

        self.windows.insert(title.to_string(), state);
        result
    }
}

/// Vertical layout cursor inside one window.
pub struct WindowUi<'a> {
    pub(crate) painter: Painter<'a>,
    pub(crate) style: &'a UiStyle,
    pub(crate) input: UiInput,
    origin: Vec2,
    cursor: Vec2,
    extent: Vec2,
    last_item: Option<Rect>,
}

impl<'a> WindowUi<'a> {
    fn new(painter: Painter<'a>, style: &'a UiStyle, input: UiInput, origin: Vec2) -> Self {
        Self {
            painter,
            style,
            input,
            origin,
            cursor: origin,
            extent: Vec2::zero(),
            last_item: None,
        }
    }

    /// Rectangle taken by the most recent widget.
    #[inline]
    pub fn last_item_rect(&self) -> Option<Rect> {
        self.last_item
    }

    /// Reserves the next row of `size` and returns its rectangle.
    pub(crate) fn allocate(&mut self, size: Vec2) -> Rect {
        if self.last_item.is_some() {
            self.cursor.y += self.style.spacing;
        }
        let rect = Rect::from_origin_size(self.cursor, size);
        self.cursor.y += size.y;
        self.extent = self.extent.max(rect.max() - self.origin);
        self.last_item = Some(rect);
        rect
    }

    /// A press on `rect` this frame.
    #[inline]
    pub(crate) fn clicked(&self, rect: Rect) -> bool {
        self.input.pressed_in(rect)
    }

    fn content_size(&self) -> Vec2 {
        self.extent
    }
}
