use super::types::InputEvent;

/// Input deltas for one frame.
///
/// [`InputState`](super::InputState) holds the pointer position; this holds
/// what changed since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Summed pointer motion in logical pixels.
    pub pointer_delta: (f32, f32),
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.pointer_delta = (0.0, 0.0);
    }
}
