//! Paintable triangle mesh and its ray intersector.
//!
//! Geometry is stored non-indexed: every three consecutive vertices form a
//! triangle with its own UVs, so faces straddling the texture seam can carry
//! wrapped coordinates without affecting their neighbours.

use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};

use crate::ray::{Ray, RayHit, RaySurface};

/// Which faces a ray is allowed to hit.
///
/// Mirrors the material side used for drawing: a skybox is drawn from the
/// inside and so is hit on its back faces only.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Side {
    /// Counter-clockwise faces, seen from outside.
    Front,
    /// Clockwise faces, seen from inside.
    Back,
    Double,
}

/// Triangle soup with per-vertex UVs and a model transform.
#[derive(Debug, Clone)]
pub struct PaintMesh {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    side: Side,
    model: Mat4,
    inv_model: Mat4,
}

impl PaintMesh {
    /// Builds a mesh from triangle-list vertices.
    ///
    /// Trailing vertices that do not complete a triangle are dropped.
    pub fn new(mut positions: Vec<Vec3>, mut uvs: Vec<Vec2>, side: Side) -> Self {
        let n = positions.len().min(uvs.len()) / 3 * 3;
        if n != positions.len() || n != uvs.len() {
            log::warn!(
                "PaintMesh: {} positions / {} uvs; truncating to {n} vertices",
                positions.len(),
                uvs.len()
            );
        }
        positions.truncate(n);
        uvs.truncate(n);

        Self {
            positions,
            uvs,
            side,
            model: Mat4::IDENTITY,
            inv_model: Mat4::IDENTITY,
        }
    }

    /// Subdivided icosahedron projected onto a sphere of `radius`.
    ///
    /// `detail = 0` gives the plain 20-face solid. UVs come from each
    /// vertex's azimuth and inclination, corrected per face at the seam and
    /// at the poles.
    pub fn icosahedron(radius: f32, detail: u32, side: Side) -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;

        let corners = [
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ];

        #[rustfmt::skip]
        const FACES: [[usize; 3]; 20] = [
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        let mut positions = Vec::with_capacity(FACES.len() * 3 * (detail as usize + 1).pow(2));
        for [a, b, c] in FACES {
            subdivide_face(corners[a], corners[b], corners[c], detail, &mut positions);
        }

        for p in &mut positions {
            *p = p.normalize() * radius;
        }

        let uvs = generate_uvs(&positions);
        Self::new(positions, uvs, side)
    }

    /// Sets the local → world transform.
    pub fn with_transform(mut self, model: Mat4) -> Self {
        self.set_transform(model);
        self
    }

    pub fn set_transform(&mut self, model: Mat4) {
        self.model = model;
        self.inv_model = model.inverse();
    }

    #[inline]
    pub fn transform(&self) -> Mat4 {
        self.model
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Local-space positions, three per triangle.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex UVs, parallel to [`positions`](Self::positions).
    #[inline]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

impl RaySurface for PaintMesh {
    fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        if !ray.is_finite() {
            return None;
        }

        // Local-space ray; the direction is not re-normalized so `t` stays
        // comparable between triangles.
        let origin = self.inv_model.transform_point3(ray.origin);
        let direction = self.inv_model.transform_vector3(ray.direction);

        let mut best: Option<(f32, usize, f32, f32)> = None;
        for (i, tri) in self.positions.chunks_exact(3).enumerate() {
            let Some((t, u, v)) = intersect_triangle(origin, direction, tri[0], tri[1], tri[2], self.side)
            else {
                continue;
            };
            if best.is_none_or(|(bt, ..)| t < bt) {
                best = Some((t, i, u, v));
            }
        }

        let (t, i, u, v) = best?;

        let uv = &self.uvs[i * 3..i * 3 + 3];
        let w = 1.0 - u - v;
        let hit_uv = uv[0] * w + uv[1] * u + uv[2] * v;

        let point = self.model.transform_point3(origin + direction * t);
        Some(RayHit {
            uv: hit_uv,
            distance: (point - ray.origin).length(),
            point,
        })
    }
}

/// Möller–Trumbore. Returns `(t, u, v)` with barycentrics for `b` and `c`.
fn intersect_triangle(
    origin: Vec3,
    dir: Vec3,
    a: Vec3,
    b: Vec3,
    c: Vec3,
    side: Side,
) -> Option<(f32, f32, f32)> {
    const EPS: f32 = 1e-7;

    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);

    // det > 0: the ray sees the counter-clockwise (front) face.
    let accepted = match side {
        Side::Front => det > EPS,
        Side::Back => det < -EPS,
        Side::Double => det.abs() > EPS,
    };
    if !accepted {
        return None;
    }

    let inv = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv;
    if t < 0.0 {
        return None;
    }

    Some((t, u, v))
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    let cols = detail as usize + 1;

    // grid[i] holds the row of points at height i / cols between edge ab and c.
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let f = i as f32 / cols as f32;
        let aj = a.lerp(c, f);
        let bj = b.lerp(c, f);
        let rows = cols - i;

        let row = (0..=rows)
            .map(|j| {
                if j == 0 && i == cols {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

#[inline]
fn azimuth(p: Vec3) -> f32 {
    p.z.atan2(-p.x)
}

#[inline]
fn inclination(p: Vec3) -> f32 {
    (-p.y).atan2((p.x * p.x + p.z * p.z).sqrt())
}

fn generate_uvs(positions: &[Vec3]) -> Vec<Vec2> {
    let mut uvs: Vec<Vec2> = positions
        .iter()
        .map(|&p| Vec2::new(azimuth(p) / 2.0 / PI + 0.5, 1.0 - (inclination(p) / PI + 0.5)))
        .collect();

    // Per-face correction: vertices on the seam or at a pole take the
    // azimuth of the face centroid.
    for (tri, uv) in positions.chunks_exact(3).zip(uvs.chunks_exact_mut(3)) {
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let azi = azimuth(centroid);
        for (p, t) in tri.iter().zip(uv.iter_mut()) {
            if azi < 0.0 && t.x == 1.0 {
                t.x -= 1.0;
            }
            if p.x == 0.0 && p.z == 0.0 {
                t.x = azi / 2.0 / PI + 0.5;
            }
        }
    }

    // Faces that span the seam get their low side wrapped past 1.
    for uv in uvs.chunks_exact_mut(3) {
        let max = uv[0].x.max(uv[1].x).max(uv[2].x);
        let min = uv[0].x.min(uv[1].x).min(uv[2].x);
        if max > 0.9 && min < 0.1 {
            for t in uv.iter_mut() {
                if t.x < 0.2 {
                    t.x += 1.0;
                }
            }
        }
    }

    uvs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skybox() -> PaintMesh {
        PaintMesh::icosahedron(1.0, 0, Side::Back).with_transform(
            Mat4::from_scale_rotation_translation(
                Vec3::splat(5.0),
                glam::Quat::IDENTITY,
                Vec3::new(0.0, 1.0, 0.0),
            ),
        )
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn icosahedron_face_counts() {
        assert_eq!(PaintMesh::icosahedron(1.0, 0, Side::Front).triangle_count(), 20);
        assert_eq!(PaintMesh::icosahedron(1.0, 1, Side::Front).triangle_count(), 80);
        assert_eq!(PaintMesh::icosahedron(1.0, 2, Side::Front).triangle_count(), 180);
    }

    #[test]
    fn vertices_lie_on_sphere() {
        let mesh = PaintMesh::icosahedron(2.5, 1, Side::Front);
        for p in mesh.positions() {
            assert!((p.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn faces_wind_outward() {
        let mesh = PaintMesh::icosahedron(1.0, 1, Side::Front);
        for tri in mesh.positions().chunks_exact(3) {
            let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            let c = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(n.dot(c) > 0.0);
        }
    }

    #[test]
    fn seam_faces_do_not_wrap_backwards() {
        let mesh = PaintMesh::icosahedron(1.0, 0, Side::Front);
        for uv in mesh.uvs().chunks_exact(3) {
            let max = uv.iter().map(|t| t.x).fold(f32::MIN, f32::max);
            let min = uv.iter().map(|t| t.x).fold(f32::MAX, f32::min);
            // Faces around the poles cover half a turn; nothing wraps the long way.
            assert!(max - min < 0.5 + 1e-3, "face spans {min}..{max}");
        }
    }

    // ── intersection ──────────────────────────────────────────────────────

    #[test]
    fn ray_from_center_hits_inside() {
        let mesh = skybox();
        let center = Vec3::new(0.0, 1.0, 0.0);
        // Off-axis directions: the coordinate axes pass exactly through edges.
        let dirs = [
            Vec3::new(0.3, 0.2, 1.0),
            Vec3::new(-0.7, 0.1, 0.4),
            Vec3::new(0.1, 0.9, -0.2),
            Vec3::new(0.25, -0.8, 0.3),
            Vec3::new(-0.3, -0.2, -1.0),
            Vec3::new(0.9, 0.15, -0.35),
        ];
        for dir in dirs {
            let hit = mesh.intersect(&Ray::new(center, dir.normalize())).expect("hit from inside");
            assert!(hit.distance > 3.5 && hit.distance <= 5.0 + 1e-4, "distance {}", hit.distance);
            assert!((0.0..=1.0).contains(&hit.uv.y));
            assert!((0.0..=1.5).contains(&hit.uv.x));
        }
    }

    #[test]
    fn back_side_ignores_outside_rays() {
        let mesh = skybox();
        let ray = Ray::new(Vec3::new(0.4, 1.3, 20.0), Vec3::NEG_Z);
        // From outside the first faces are front faces; only the far wall,
        // seen from inside, is accepted.
        let hit = mesh.intersect(&ray).expect("far wall");
        assert!(hit.point.z < 0.0);
    }

    #[test]
    fn front_side_hits_near_wall() {
        let mesh = PaintMesh::icosahedron(1.0, 0, Side::Front);
        let hit = mesh.intersect(&Ray::new(Vec3::new(0.1, 0.2, 5.0), Vec3::NEG_Z)).unwrap();
        assert!(hit.point.z > 0.0);
        assert!((hit.distance - (5.0 - hit.point.z)).abs() < 1e-4);
    }

    #[test]
    fn miss_returns_none() {
        let mesh = skybox();
        let ray = Ray::new(Vec3::new(0.0, 50.0, 0.0), Vec3::Y);
        assert!(mesh.intersect(&ray).is_none());
    }

    #[test]
    fn non_finite_ray_returns_none() {
        let mesh = skybox();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(mesh.intersect(&ray).is_none());
    }

    #[test]
    fn hit_uv_interpolates_vertices() {
        let positions = vec![Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(-1.0, 1.0, 0.0)];
        let uvs = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        let mesh = PaintMesh::new(positions, uvs, Side::Double);

        let hit = mesh.intersect(&Ray::new(Vec3::new(-0.5, -0.5, 3.0), Vec3::NEG_Z)).unwrap();
        assert!((hit.uv - Vec2::new(0.25, 0.25)).length() < 1e-5);
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }
}
