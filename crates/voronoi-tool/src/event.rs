//! Backend-independent tool events.

use voronoi_engine::coords::Viewport;
use voronoi_engine::input::{
    InputEvent, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Button {
    Primary,
    Secondary,
    Other,
}

/// Everything the tool reacts to. Coordinates are logical pixels, origin top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    PointerDown { button: Button, x: f64, y: f64 },
    PointerUp { button: Button, x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    Key(char),
    Resize { width: u32, height: u32 },
}

impl Event {
    /// Maps an engine input event; returns `None` for events the tool ignores
    /// (key releases, key repeat, keys without a character, modifier changes).
    pub fn from_input(ev: &InputEvent) -> Option<Self> {
        match ev {
            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. }) => {
                let (button, x, y) = (map_button(*button), *x as f64, *y as f64);
                Some(match state {
                    MouseButtonState::Pressed => Event::PointerDown { button, x, y },
                    MouseButtonState::Released => Event::PointerUp { button, x, y },
                })
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => Some(Event::PointerMove {
                x: *x as f64,
                y: *y as f64,
            }),

            InputEvent::Key { key, state: KeyState::Pressed, repeat: false, .. } => {
                key.to_char().map(Event::Key)
            }

            InputEvent::Resized { width, height } => {
                let (width, height) = Viewport::new(*width, *height).whole_pixels();
                Some(Event::Resize { width, height })
            }

            _ => None,
        }
    }
}

fn map_button(b: MouseButton) -> Button {
    match b {
        MouseButton::Left => Button::Primary,
        MouseButton::Right => Button::Secondary,
        _ => Button::Other,
    }
}
