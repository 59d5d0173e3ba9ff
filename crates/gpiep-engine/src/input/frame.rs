use std::collections::HashSet;

use super::types::MouseButton;

/// Button transitions since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    #[inline]
    pub fn pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }
}
