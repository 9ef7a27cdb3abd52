use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers, PointerButtonEvent, PointerMoveEvent};

/// Input state carried between events.
///
/// Button and key events are stamped from it: the pointer position for
/// clicks, the modifier set for everything.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    /// Pointer position in logical pixels; `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Updates tracked state from `ev` and appends it to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
            InputEvent::PointerButton(PointerButtonEvent { x, y, modifiers, .. }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
            }
            InputEvent::Resized { .. } => {}
        }

        frame.push_event(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState};

    #[test]
    fn button_press_records_pointer_and_event() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 10.0,
                y: 20.0,
                modifiers: Modifiers::default(),
            }),
        );

        assert_eq!(state.pointer_pos, Some((10.0, 20.0)));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn pointer_leaving_forgets_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        state.apply_event(&mut frame, InputEvent::PointerLeft);

        assert_eq!(state.pointer_pos, None);
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn key_events_update_modifiers() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let shift = Modifiers { shift: true, ..Modifiers::default() };

        state.apply_event(
            &mut frame,
            InputEvent::Key {
                key: Key::R,
                state: KeyState::Pressed,
                modifiers: shift,
                code: 0,
                repeat: false,
            },
        );

        assert_eq!(state.modifiers, shift);
    }

    #[test]
    fn frame_clear_keeps_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        assert!(!frame.is_empty());

        frame.clear();
        assert!(frame.is_empty());
        assert_eq!(state.pointer_pos, Some((1.0, 2.0)));
    }
}
