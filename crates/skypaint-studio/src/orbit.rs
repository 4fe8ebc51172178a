//! Damped orbit controls.
//!
//! The camera sits on a sphere of `radius` around `target`, placed by a
//! polar angle `phi` (from +Y) and an azimuth `theta` (around +Y, zero on
//! +Z), and always faces the target. At radius 0 the position stays on the
//! target and dragging turns the view in place.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec3};
use skypaint_paint::PerspectiveCamera;

/// Polar angles are kept this far from the poles so "up" stays defined.
const POLE_EPS: f32 = 1e-4;

/// Rates below this (radians per frame) count as settled.
const SETTLED: f32 = 1e-5;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    /// Negative values invert the drag direction.
    pub rotate_speed: f32,
    /// Share of the pending rotation applied per 60 Hz frame.
    pub damping: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    /// Drags are ignored while disabled; pending motion still settles.
    pub enabled: bool,

    theta: f32,
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
}

impl OrbitControls {
    /// Picks up the camera's current placement relative to `target`.
    pub fn from_camera(camera: &PerspectiveCamera, target: Vec3) -> Self {
        let offset = camera.position - target;
        let radius = offset.length();
        // At the target, derive the angles from the view direction instead.
        let dir = if radius > f32::EPSILON {
            offset / radius
        } else {
            -camera.forward()
        };

        Self {
            target,
            radius,
            rotate_speed: 1.0,
            damping: 0.05,
            min_polar: 0.0,
            max_polar: PI,
            enabled: true,
            theta: dir.x.atan2(dir.z),
            phi: dir.y.clamp(-1.0, 1.0).acos(),
            pending_theta: 0.0,
            pending_phi: 0.0,
        }
    }

    /// Feeds a pointer drag of `(dx, dy)` logical pixels.
    ///
    /// A drag across the full viewport height turns one revolution.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let k = TAU / viewport_height * self.rotate_speed;
        self.pending_theta -= dx * k;
        self.pending_phi -= dy * k;
    }

    /// Advances damping by `dt` seconds and places the camera.
    ///
    /// Returns `true` while the view is still moving.
    pub fn update(&mut self, dt: f32, camera: &mut PerspectiveCamera) -> bool {
        let keep = (1.0 - self.damping.clamp(0.0, 1.0)).powf(dt.max(0.0) * 60.0);
        let apply = 1.0 - keep;

        let d_theta = self.pending_theta * apply;
        let d_phi = self.pending_phi * apply;
        self.theta = (self.theta + d_theta).rem_euclid(TAU);
        self.phi = (self.phi + d_phi).clamp(
            self.min_polar.max(POLE_EPS),
            self.max_polar.min(PI - POLE_EPS),
        );
        self.pending_theta *= keep;
        self.pending_phi *= keep;

        let dir = self.direction();
        camera.position = self.target + dir * self.radius;
        camera.rotation = facing(-dir);

        d_theta.abs() > SETTLED || d_phi.abs() > SETTLED
    }

    /// Unit vector from the target towards the camera.
    pub fn direction(&self) -> Vec3 {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        Vec3::new(sp * st, cp, sp * ct)
    }

    #[inline]
    pub fn angles(&self) -> (f32, f32) {
        (self.theta, self.phi)
    }
}

/// Rotation that points a camera's `-Z` along `forward` with `+Y` up.
fn facing(forward: Vec3) -> Quat {
    Quat::from_mat4(&Mat4::look_to_rh(Vec3::ZERO, forward, Vec3::Y).inverse())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look_around() -> (OrbitControls, PerspectiveCamera) {
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(0.0, 1.0, 0.0);
        let mut orbit = OrbitControls::from_camera(&camera, camera.position);
        orbit.rotate_speed = -1.0;
        (orbit, camera)
    }

    fn settle(orbit: &mut OrbitControls, camera: &mut PerspectiveCamera) {
        for _ in 0..2000 {
            orbit.update(1.0 / 60.0, camera);
        }
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn default_camera_keeps_its_view() {
        let (mut orbit, mut camera) = look_around();
        orbit.update(1.0 / 60.0, &mut camera);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
        assert_eq!(camera.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn orbit_faces_target() {
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        let mut orbit = OrbitControls::from_camera(&camera, Vec3::ZERO);
        assert!((orbit.radius - 10.0).abs() < 1e-5);

        orbit.drag(100.0, 0.0, 400.0);
        settle(&mut orbit, &mut camera);
        assert!((camera.position.length() - 10.0).abs() < 1e-3);
        let to_target = (-camera.position).normalize();
        assert!((camera.forward() - to_target).length() < 1e-4);
    }

    // ── dragging ──────────────────────────────────────────────────────────

    #[test]
    fn damping_applies_a_share_per_frame() {
        let (mut orbit, mut camera) = look_around();
        let (theta0, _) = orbit.angles();

        // Quarter of the viewport height with inverted speed: +π/2 pending.
        orbit.drag(100.0, 0.0, 400.0);
        orbit.update(1.0 / 60.0, &mut camera);
        let (theta1, _) = orbit.angles();
        assert!((theta1 - theta0 - 0.05 * PI / 2.0).abs() < 1e-4);

        settle(&mut orbit, &mut camera);
        let (theta, _) = orbit.angles();
        assert!((theta - (theta0 + PI / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn inverted_drag_right_turns_view_left() {
        let (mut orbit, mut camera) = look_around();
        orbit.drag(100.0, 0.0, 400.0);
        settle(&mut orbit, &mut camera);
        // Looking down -Z, a quarter turn to the left faces -X.
        assert!((camera.forward() - Vec3::NEG_X).length() < 1e-3, "{:?}", camera.forward());
        assert_eq!(camera.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn polar_angle_is_clamped() {
        let (mut orbit, mut camera) = look_around();
        orbit.drag(0.0, 10_000.0, 400.0);
        settle(&mut orbit, &mut camera);
        let (_, phi) = orbit.angles();
        assert!(phi > 0.0 && phi < PI);
        assert!(camera.forward().is_finite());
    }

    #[test]
    fn disabled_controls_ignore_drags() {
        let (mut orbit, mut camera) = look_around();
        orbit.enabled = false;
        orbit.drag(100.0, 50.0, 400.0);
        assert!(!orbit.update(1.0 / 60.0, &mut camera));
    }

    #[test]
    fn motion_settles() {
        let (mut orbit, mut camera) = look_around();
        orbit.drag(10.0, 0.0, 400.0);
        assert!(orbit.update(1.0 / 60.0, &mut camera));
        settle(&mut orbit, &mut camera);
        assert!(!orbit.update(1.0 / 60.0, &mut camera));
    }
}
