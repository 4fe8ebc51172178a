use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers};

/// Held input state for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    /// Folds `ev` into the held state and records its deltas in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => self.focused = *f,

            InputEvent::PointerMoved { x, y } => {
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::PointerButton(b) => self.pointer_pos = Some((b.x, b.y)),

            InputEvent::Key { .. } => {}
        }

        frame.events.push(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent};

    fn key(k: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key: k, state, repeat }
    }

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn events_are_queued_in_order() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Char('m'), KeyState::Pressed, false));
        st.apply_event(&mut fr, InputEvent::Focused(true));
        st.apply_event(&mut fr, key(Key::Char('m'), KeyState::Pressed, true));

        assert!(st.focused);
        assert_eq!(fr.events.len(), 3);
        assert_eq!(fr.events[1], InputEvent::Focused(true));

        fr.clear();
        assert!(fr.events.is_empty());
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_delta_accumulates_within_frame() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        // First sample has nothing to diff against.
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        assert_eq!(fr.pointer_delta, (0.0, 0.0));

        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 13.0, y: 8.0 });
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 15.0, y: 9.0 });
        assert_eq!(fr.pointer_delta, (5.0, -1.0));

        fr.clear();
        assert_eq!(fr.pointer_delta, (0.0, 0.0));
    }

    #[test]
    fn leaving_resets_delta_origin() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 0.0, y: 0.0 });
        st.apply_event(&mut fr, InputEvent::PointerLeft);
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 500.0, y: 500.0 });
        assert_eq!(fr.pointer_delta, (0.0, 0.0));
        assert_eq!(st.pointer_pos, Some((500.0, 500.0)));
    }

    #[test]
    fn button_updates_pointer_position() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, button(MouseButtonState::Pressed, 4.0, 2.0));
        assert_eq!(st.pointer_pos, Some((4.0, 2.0)));

        // The button sample is the delta origin for the next move.
        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 7.0, y: 2.0 });
        assert_eq!(fr.pointer_delta, (3.0, 0.0));
    }
}
