use glam::Vec2;

use crate::camera::RayCaster;
use crate::ray::Ray;

/// On-screen rectangle of the rendered view, in the same units as pointer
/// positions (logical pixels, top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle at the origin covering a whole window.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// True for zero, negative or non-finite extents; such a viewport cannot
    /// be normalized against.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }

    /// Half-open containment: `[min, max)`.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }
}

/// Screen position → normalized device coordinates.
///
/// Screen Y grows downward, NDC Y grows upward, hence the flip.
#[inline]
pub fn to_ndc(screen: Vec2, rect: ViewportRect) -> Vec2 {
    let x = ((screen.x - rect.x) / rect.width) * 2.0 - 1.0;
    let y = ((screen.y - rect.y) / rect.height) * 2.0 - 1.0;
    Vec2::new(x, -y)
}

/// Builds the world-space ray under a screen position.
///
/// Always returns a ray; it may miss every surface.
pub fn project<C>(screen: Vec2, rect: ViewportRect, camera: &C) -> Ray
where
    C: RayCaster + ?Sized,
{
    camera.ray_through_ndc(to_ndc(screen, rect))
}
