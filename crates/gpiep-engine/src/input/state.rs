use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, MouseButton};

/// Current pointer state for the window.
///
/// Transitions are also recorded into an [`InputFrame`].
#[derive(Debug, Default)]
pub struct InputState {
    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::PointerMoved { x, y } => self.pointer_pos = Some((x, y)),
            InputEvent::PointerLeft => self.pointer_pos = None,
            // Avoid stuck buttons when focus changes mid-press.
            InputEvent::Focused(false) => self.buttons_down.clear(),
            InputEvent::Focused(true) => {}
            InputEvent::PointerButton { button, state: ButtonState::Pressed } => {
                if self.buttons_down.insert(button) {
                    frame.buttons_pressed.insert(button);
                }
            }
            InputEvent::PointerButton { button, state: ButtonState::Released } => {
                if self.buttons_down.remove(&button) {
                    frame.buttons_released.insert(button);
                }
            }
        }
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}
