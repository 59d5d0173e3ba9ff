use gpiep_engine::coords::Vec2;
use gpiep_engine::paint::Color;

/// Colors and metrics for the overlay, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct UiStyle {
    pub font_size: f32,
    pub title_height: f32,
    pub padding: f32,
    /// Vertical gap between widgets.
    pub spacing: f32,
    pub min_window_width: f32,
    /// Where the first window opens; later windows are offset diagonally.
    pub first_window_pos: Vec2,

    pub window_bg: Color,
    pub title_bg: Color,
    pub title_bg_active: Color,
    pub text_color: Color,

    pub box_size: f32,
    /// Gap between a checkbox and its label.
    pub box_gap: f32,
    pub box_bg: Color,
    pub box_border: Color,
    pub box_border_hover: Color,
    pub border_width: f32,
    pub checked_color: Color,
    pub check_mark: Color,
}

impl Default for UiStyle {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            title_height: 20.0,
            padding: 8.0,
            spacing: 4.0,
            min_window_width: 120.0,
            first_window_pos: Vec2::new(60.0, 60.0),

            window_bg: Color::from_straight(0.06, 0.06, 0.06, 0.94),
            title_bg: Color::from_straight(0.04, 0.04, 0.04, 1.0),
            title_bg_active: Color::from_straight(0.16, 0.29, 0.48, 1.0),
            text_color: Color::from_straight(1.0, 1.0, 1.0, 1.0),

            box_size: 16.0,
            box_gap: 8.0,
            box_bg: Color::from_straight(0.1, 0.12, 0.18, 1.0),
            box_border: Color::from_straight(0.35, 0.45, 0.6, 1.0),
            box_border_hover: Color::from_straight(0.6, 0.7, 0.9, 1.0),
            border_width: 1.5,
            checked_color: Color::from_straight(0.2, 0.65, 1.0, 1.0),
            check_mark: Color::from_straight(1.0, 1.0, 1.0, 1.0),
        }
    }
}
