use glam::Vec2;

/// Latest raw pointer sample as seen by the painting session.
///
/// Written by device events, read once per frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    /// Screen position in logical pixels; `None` until the first event.
    pub position: Option<Vec2>,
    /// True between a painting pointer-down and the matching pointer-up.
    pub dragging: bool,
}

impl PointerState {
    #[inline]
    pub fn moved(&mut self, pos: Vec2) {
        self.position = Some(pos);
    }

    #[inline]
    pub fn pressed(&mut self, pos: Vec2) {
        self.position = Some(pos);
        self.dragging = true;
    }

    #[inline]
    pub fn released(&mut self) {
        self.dragging = false;
    }

    /// The pointer left the window; the drag, if any, stays armed.
    #[inline]
    pub fn left(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_records_position_and_drag() {
        let mut p = PointerState::default();
        assert_eq!(p.position, None);
        p.pressed(Vec2::new(3.0, 4.0));
        assert_eq!(p.position, Some(Vec2::new(3.0, 4.0)));
        assert!(p.dragging);
        p.released();
        assert!(!p.dragging);
        assert_eq!(p.position, Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn leaving_keeps_drag() {
        let mut p = PointerState::default();
        p.pressed(Vec2::ZERO);
        p.left();
        assert_eq!(p.position, None);
        assert!(p.dragging);
    }
}
