use glam::Vec2;

use crate::stroke::PixelPos;

/// Maps a surface UV to a pixel of a square bitmap of side `size`.
///
/// `u` wraps into `[0, 1)`; `v` wraps and flips so that `v = 1` is the top
/// row of the row-major, top-down bitmap. The `+2`/`-2` offsets keep the
/// operand positive before the modulo. Rounding can land on `size`, so both
/// axes are clamped to `[0, size - 1]`.
pub fn to_pixel(uv: Vec2, size: u32) -> PixelPos {
    let u = (2.0 + uv.x).rem_euclid(1.0);
    let v = (2.0 - uv.y).rem_euclid(1.0);

    let max = size.saturating_sub(1) as f32;
    let s = size as f32;

    // NaN from a degenerate UV falls through `clamp` unchanged; `as` maps it to 0.
    let x = (u * s).round().clamp(0.0, max) as i32;
    let y = (v * s).round().clamp(0.0, max) as i32;

    PixelPos::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_origin() {
        assert_eq!(to_pixel(Vec2::new(0.0, 0.0), 256), PixelPos::new(0, 0));
    }

    #[test]
    fn center_maps_to_center() {
        assert_eq!(to_pixel(Vec2::new(0.5, 0.5), 256), PixelPos::new(128, 128));
    }

    #[test]
    fn v_axis_is_flipped() {
        // v = 0.75 is a quarter of the way down from the top.
        assert_eq!(to_pixel(Vec2::new(0.25, 0.75), 256), PixelPos::new(64, 64));
    }

    #[test]
    fn upper_edge_is_clamped() {
        let p = to_pixel(Vec2::new(0.999, 0.001), 256);
        assert_eq!(p, PixelPos::new(255, 255));
    }

    #[test]
    fn out_of_range_uv_wraps() {
        assert_eq!(to_pixel(Vec2::new(1.25, 0.5), 256), PixelPos::new(64, 128));
        assert_eq!(to_pixel(Vec2::new(-0.25, 0.5), 256), PixelPos::new(192, 128));
    }

    #[test]
    fn always_inside_bitmap() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            let p = to_pixel(Vec2::new(t, 1.0 - t), 64);
            assert!((0..64).contains(&p.x) && (0..64).contains(&p.y), "{p:?} for t={t}");
        }
    }
}
