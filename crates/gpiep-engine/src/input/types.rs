/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input event. Positions are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
    PointerButton { button: MouseButton, state: ButtonState },
    Focused(bool),
}
