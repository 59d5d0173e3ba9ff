use gpiep_engine::coords::{Rect, Vec2};
use gpiep_engine::paint::Color;

use crate::context::WindowUi;

/// Glyph drawn inside a checked box when a font is loaded.
const CHECK_MARK: &str = "✓";

impl WindowUi<'_> {
    /// A box followed by `label`, bound to `value`.
    ///
    /// A press anywhere on the row flips `value`. Returns `true` on the frame
    /// the value changed.
    pub fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let style = self.style;
        let text = self.painter.measure_text(label, style.font_size);
        let row = self.allocate(Vec2::new(
            style.box_size + style.box_gap + text.x,
            style.box_size.max(text.y),
        ));

        let changed = self.clicked(row);
        if changed {
            *value = !*value;
        }

        let hovered = self.painter.is_hovered(row);
        let box_rect = Rect::new(
            row.origin.x,
            row.origin.y + (row.size.y - style.box_size) * 0.5,
            style.box_size,
            style.box_size,
        );

        let bg = match (*value, hovered) {
            (true, true) => brighten(style.checked_color, 0.1),
            (true, false) => style.checked_color,
            (false, _) => style.box_bg,
        };
        let border = if hovered && !*value {
            style.box_border_hover
        } else {
            style.box_border
        };
        self.painter.fill_rect(box_rect, bg);
        self.painter.stroke_rect(box_rect, style.border_width, border);

        if *value {
            if self.painter.has_font() {
                let mark_size = style.box_size * 0.8;
                let mark = self.painter.measure_text(CHECK_MARK, mark_size);
                let origin = box_rect.origin
                    + Vec2::new((style.box_size - mark.x) * 0.5, (style.box_size - mark.y) * 0.5);
                self.painter.text(CHECK_MARK, mark_size, style.check_mark, origin);
            } else {
                self.painter.fill_rect(box_rect.inset(style.box_size * 0.25), style.check_mark);
            }
        }

        let label_origin = Vec2::new(
            box_rect.max().x + style.box_gap,
            row.origin.y + (row.size.y - text.y) * 0.5,
        );
        self.painter.text(label, style.font_size, style.text_color, label_origin);

        changed
    }
}

fn brighten(c: Color, amount: f32) -> Color {
    if c.a <= 0.0 {
        return c;
    }
    Color::from_straight(
        (c.r / c.a + amount).min(1.0),
        (c.g / c.a + amount).min(1.0),
        (c.b / c.a + amount).min(1.0),
        c.a,
    )
}

#[cfg(test)]
mod tests {
    use gpiep_engine::text::FontSystem;

    use crate::context::{Ui, UiInput};
    use crate::style::UiStyle;

    use super::*;

    fn ui() -> Ui {
        Ui::with_fonts(UiStyle::default(), FontSystem::new(), None)
    }

    /// Lays out one checkbox and returns its row.
    fn layout(ui: &mut Ui, input: UiInput, value: &mut bool) -> (bool, Rect) {
        ui.begin_frame(input);
        ui.window("UI DEL JUEGO", |w| {
            let changed = w.checkbox("DETENER", value);
            (changed, w.last_item_rect().expect("checkbox allocated"))
        })
    }

    #[test]
    fn press_inside_toggles() {
        let mut ui = ui();
        let mut paused = true;
        let (_, row) = layout(&mut ui, UiInput::default(), &mut paused);

        let press = UiInput {
            pointer: Some(row.origin + Vec2::new(2.0, 2.0)),
            primary_down: true,
            primary_pressed: true,
        };
        let (changed, _) = layout(&mut ui, press, &mut paused);
        assert!(changed);
        assert!(!paused);

        // Holding the button does not toggle again.
        let hold = UiInput { primary_pressed: false, ..press };
        let (changed, _) = layout(&mut ui, hold, &mut paused);
        assert!(!changed);
        assert!(!paused);
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut ui = ui();
        let mut paused = true;
        let (_, row) = layout(&mut ui, UiInput::default(), &mut paused);

        let press = UiInput {
            pointer: Some(row.max() + Vec2::new(200.0, 200.0)),
            primary_down: true,
            primary_pressed: true,
        };
        let (changed, _) = layout(&mut ui, press, &mut paused);
        assert!(!changed);
        assert!(paused);
    }

    #[test]
    fn checked_box_without_font_draws_a_square() {
        let mut ui = ui();
        let mut checked = true;
        layout(&mut ui, UiInput::default(), &mut checked);
        let with_mark = ui.draw_list().rects().count();

        let mut unchecked = false;
        layout(&mut ui, UiInput::default(), &mut unchecked);
        let without_mark = ui.draw_list().rects().count();

        assert_eq!(with_mark, without_mark + 1);
    }

    #[test]
    fn brighten_keeps_alpha_and_clamps() {
        let c = brighten(Color::from_straight(0.95, 0.5, 0.0, 1.0), 0.1);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.6).abs() < 1e-6);
    }
}
