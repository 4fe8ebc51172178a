use glam::{Mat4, Quat, Vec2, Vec3};

use crate::ray::Ray;

/// Produces world-space rays from normalized device coordinates.
///
/// This is the only camera capability the painting pipeline needs, which
/// keeps the session testable with a fixed-ray fake.
pub trait RayCaster {
    /// `ndc` is in `[-1, 1]²`, +Y up.
    fn ray_through_ndc(&self, ndc: Vec2) -> Ray;
}

/// Right-handed perspective camera looking down its local `-Z`.
///
/// The projection uses wgpu's `[0, 1]` depth range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_degrees,
            aspect,
            near,
            far,
            ..Self::default()
        }
    }

    /// Updates the aspect ratio from a drawable size.
    ///
    /// Zero-sized drawables (minimized windows) are ignored. Returns `true`
    /// when the aspect actually changed.
    pub fn set_aspect(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        let aspect = width / height;
        if (aspect - self.aspect).abs() <= f32::EPSILON {
            return false;
        }
        self.aspect = aspect;
        true
    }

    /// Orients the camera towards `target` with `+Y` up.
    ///
    /// Leaves the rotation untouched when `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        let view = Mat4::look_at_rh(self.position, target, Vec3::Y);
        self.rotation = Quat::from_mat4(&view.inverse());
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// World → camera transform.
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl RayCaster for PerspectiveCamera {
    fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        // Any depth strictly inside the frustum lands on the same ray.
        let target = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, (target - self.position).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn center_ray_follows_forward() {
        let mut cam = PerspectiveCamera::new(75.0, 16.0 / 9.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 1.0, 0.0);
        let ray = cam.ray_through_ndc(Vec2::ZERO);
        assert!(approx(ray.origin, cam.position));
        assert!(approx(ray.direction, Vec3::NEG_Z));
    }

    #[test]
    fn top_right_ray_leans_up_and_right() {
        let cam = PerspectiveCamera::default();
        let ray = cam.ray_through_ndc(Vec2::new(1.0, 1.0));
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.z < 0.0);
        // At the top edge the vertical angle equals half the fov.
        let up = ray.direction.y.atan2(-ray.direction.z).to_degrees();
        assert!((up - 37.5).abs() < 0.01, "vertical angle {up}");
    }

    #[test]
    fn look_at_turns_forward() {
        let mut cam = PerspectiveCamera::default();
        cam.look_at(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(cam.forward(), Vec3::X));

        let ray = cam.ray_through_ndc(Vec2::ZERO);
        assert!(approx(ray.direction, Vec3::X));
    }

    #[test]
    fn look_at_self_is_ignored() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.rotation;
        cam.look_at(cam.position);
        assert_eq!(cam.rotation, before);
    }

    #[test]
    fn set_aspect_ignores_zero_size() {
        let mut cam = PerspectiveCamera::default();
        assert!(!cam.set_aspect(0.0, 720.0));
        assert!(cam.set_aspect(1280.0, 720.0));
        assert!(!cam.set_aspect(1280.0, 720.0));
        assert!((cam.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }
}
