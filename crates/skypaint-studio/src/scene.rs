//! The painted skybox and its camera.

use glam::{Mat4, Quat, Vec3};
use skypaint_engine::render::MeshVertex;
use skypaint_paint::{PaintMesh, PerspectiveCamera, Side};

pub const SKYBOX_RADIUS: f32 = 1.0;
pub const SKYBOX_DETAIL: u32 = 0;
pub const SKYBOX_SCALE: f32 = 5.0;
pub const SKYBOX_CENTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Icosahedron seen from inside, scaled and moved into place.
pub fn build_skybox() -> PaintMesh {
    PaintMesh::icosahedron(SKYBOX_RADIUS, SKYBOX_DETAIL, Side::Back).with_transform(
        Mat4::from_scale_rotation_translation(Vec3::splat(SKYBOX_SCALE), Quat::IDENTITY, SKYBOX_CENTER),
    )
}

/// Camera at the skybox center looking down `-Z`.
pub fn build_camera(width: f32, height: f32) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::default();
    camera.set_aspect(width, height);
    camera.position = SKYBOX_CENTER;
    camera
}

/// Local-space vertices for the GPU, in triangle order.
pub fn mesh_vertices(mesh: &PaintMesh) -> Vec<MeshVertex> {
    mesh.positions()
        .iter()
        .zip(mesh.uvs())
        .map(|(p, uv)| MeshVertex {
            position: p.to_array(),
            uv: uv.to_array(),
        })
        .collect()
}

/// Face culling that draws the same faces a ray may hit.
///
/// Mesh faces wind counter-clockwise seen from outside.
pub fn cull_for(side: Side) -> Option<wgpu::Face> {
    match side {
        Side::Front => Some(wgpu::Face::Back),
        Side::Back => Some(wgpu::Face::Front),
        Side::Double => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use skypaint_paint::uv::to_pixel;
    use skypaint_paint::{RayCaster, RaySurface};

    // ── skybox ────────────────────────────────────────────────────────────

    #[test]
    fn skybox_is_hit_from_its_center() {
        let skybox = build_skybox();
        let camera = build_camera(1280.0, 720.0);

        for ndc in [Vec2::new(0.1, 0.2), Vec2::new(-0.7, 0.4), Vec2::new(0.33, -0.9)] {
            let ray = camera.ray_through_ndc(ndc);
            let hit = skybox.intersect(&ray).expect("inside of the skybox");
            // Seam faces carry u past 1; the repeat-wrapped texture covers it.
            assert!((0.0..=1.5).contains(&hit.uv.x), "{:?}", hit.uv);
            assert!((0.0..=1.0).contains(&hit.uv.y), "{:?}", hit.uv);
            let px = to_pixel(hit.uv, 256);
            assert!((0..256).contains(&px.x) && (0..256).contains(&px.y));
            // Hits land between the inscribed and circumscribed spheres.
            assert!(hit.distance > 3.0 && hit.distance <= SKYBOX_SCALE + 1e-3, "{}", hit.distance);
        }
    }

    #[test]
    fn outside_ray_hits_far_wall() {
        let skybox = build_skybox();
        let mut camera = build_camera(1.0, 1.0);
        camera.position = Vec3::new(0.1, 1.2, 50.0);
        let ray = camera.ray_through_ndc(Vec2::ZERO);
        // The ray enters through a front face and leaves through a back one.
        let hit = skybox.intersect(&ray).expect("far side");
        assert!(hit.distance > 50.0);
    }

    // ── gpu data ──────────────────────────────────────────────────────────

    #[test]
    fn vertices_follow_mesh_order() {
        let skybox = build_skybox();
        let vertices = mesh_vertices(&skybox);
        assert_eq!(vertices.len(), skybox.triangle_count() * 3);
        assert_eq!(vertices.len(), 60);
        assert_eq!(vertices[4].position, skybox.positions()[4].to_array());
        assert_eq!(vertices[4].uv, skybox.uvs()[4].to_array());
    }

    #[test]
    fn inside_faces_cull_front() {
        assert_eq!(cull_for(Side::Back), Some(wgpu::Face::Front));
        assert_eq!(cull_for(Side::Front), Some(wgpu::Face::Back));
        assert_eq!(cull_for(Side::Double), None);
    }
}
