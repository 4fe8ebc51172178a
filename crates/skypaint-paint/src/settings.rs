use crate::color::BrushColor;

/// User-tunable painting parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PaintSettings {
    /// Side of the square paint bitmap, in pixels.
    pub bitmap_size: u32,
    /// Segments at least this long (in bitmap pixels) are not drawn.
    ///
    /// Catches the pointer jumping across the UV seam or between faces.
    pub max_jump: f32,
    /// Side of the square brush footprint.
    pub brush_size: u32,
    pub color: BrushColor,
    /// When set, pointer drags steer the view and never paint.
    pub move_mode: bool,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            bitmap_size: 256,
            max_jump: 32.0,
            brush_size: 2,
            color: BrushColor::rgb(0xff, 0x00, 0x00),
            move_mode: false,
        }
    }
}
