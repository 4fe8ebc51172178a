/// Integer pixel coordinate in bitmap space (top-left origin, +Y down).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`, in pixels.
    #[inline]
    pub fn distance(self, other: PixelPos) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Segment endpoints for the stroke currently being drawn.
///
/// Invariant: after every frame `previous == current`, so the next frame's
/// segment starts where the last one ended.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StrokeCursor {
    pub previous: PixelPos,
    pub current: PixelPos,
}

impl StrokeCursor {
    /// Places both endpoints on `p`. Used when a drag starts.
    #[inline]
    pub fn anchor(&mut self, p: PixelPos) {
        self.previous = p;
        self.current = p;
    }

    /// Length of the pending segment.
    #[inline]
    pub fn jump(&self) -> f32 {
        self.previous.distance(self.current)
    }

    /// True when the pending segment is short enough to be drawn.
    #[inline]
    pub fn within(&self, max_jump: f32) -> bool {
        self.jump() < max_jump
    }

    /// Ends the frame: the next segment starts at `current`.
    #[inline]
    pub fn commit(&mut self) {
        self.previous = self.current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(PixelPos::new(0, 0).distance(PixelPos::new(3, 4)), 5.0);
        assert_eq!(PixelPos::new(-2, 1).distance(PixelPos::new(-2, 1)), 0.0);
    }

    #[test]
    fn jump_gate_is_strict() {
        let mut c = StrokeCursor::default();
        c.current = PixelPos::new(32, 0);
        assert!(!c.within(32.0));
        c.current = PixelPos::new(31, 0);
        assert!(c.within(32.0));
    }

    #[test]
    fn commit_restores_invariant() {
        let mut c = StrokeCursor::default();
        c.anchor(PixelPos::new(5, 5));
        c.current = PixelPos::new(9, 7);
        c.commit();
        assert_eq!(c.previous, c.current);
    }
}
