use glam::{Vec2, Vec3};

/// A world-space half-line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length when produced by a camera; intersectors must not rely on it.
    pub direction: Vec3,
}

impl Ray {
    #[inline]
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.direction.is_finite()
    }
}

/// Nearest intersection of a ray with a paintable surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
    /// Interpolated texture coordinate at the hit.
    pub uv: Vec2,
    /// World-space distance from the ray origin.
    pub distance: f32,
    /// World-space hit position.
    pub point: Vec3,
}

/// Anything a ray can be cast against.
///
/// Implementations are pure queries over static geometry.
pub trait RaySurface {
    fn intersect(&self, ray: &Ray) -> Option<RayHit>;
}
