//! Per-frame painting driver.
//!
//! [`PaintingSession`] owns every piece of mutable painting state. Device
//! events are fed in as they arrive; [`PaintingSession::frame`] then runs the
//! pipeline once against whatever camera and surface the caller renders.

use glam::Vec2;

use crate::bitmap::Bitmap;
use crate::camera::RayCaster;
use crate::color::BrushColor;
use crate::pointer::PointerState;
use crate::projector::{ViewportRect, project};
use crate::raster::rasterize;
use crate::ray::{RayHit, RaySurface};
use crate::settings::PaintSettings;
use crate::stroke::StrokeCursor;
use crate::uv::to_pixel;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    Idle,
    Dragging,
}

/// What a single frame did to the bitmap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Not dragging, or move mode is on.
    Idle,
    /// Dragging, but no pointer position is known.
    NoPointer,
    /// The viewport has no area to normalize against.
    NoViewport,
    /// The ray hit nothing; the cursor keeps its last pixel.
    Missed,
    /// The segment was at least `max_jump` long and was skipped.
    Rejected { distance: f32 },
    /// The segment was drawn; `points` brush stamps were placed.
    Painted { points: usize },
}

impl FrameOutcome {
    #[inline]
    pub fn painted(&self) -> bool {
        matches!(self, FrameOutcome::Painted { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PaintingSession {
    settings: PaintSettings,
    pointer: PointerState,
    cursor: StrokeCursor,
    /// Whether the current drag has placed its first pixel yet.
    anchored: bool,
    bitmap: Bitmap,
}

impl PaintingSession {
    pub fn new(settings: PaintSettings) -> Self {
        Self {
            bitmap: Bitmap::new(settings.bitmap_size),
            settings,
            pointer: PointerState::default(),
            cursor: StrokeCursor::default(),
            anchored: false,
        }
    }

    #[inline]
    pub fn settings(&self) -> &PaintSettings {
        &self.settings
    }

    pub fn set_color(&mut self, color: BrushColor) {
        self.settings.color = color;
    }

    /// Switches between painting and steering the view.
    ///
    /// Entering move mode ends any drag in progress.
    pub fn set_move_mode(&mut self, on: bool) {
        if on && self.is_dragging() {
            self.end_drag();
        }
        self.settings.move_mode = on;
    }

    #[inline]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    #[inline]
    pub fn cursor(&self) -> &StrokeCursor {
        &self.cursor
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer.moved(pos);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    /// Starts a paint drag at `pos`.
    ///
    /// Returns `false` in move mode, where the press belongs to the view
    /// controls instead.
    pub fn pointer_down(&mut self, pos: Vec2) -> bool {
        if self.settings.move_mode {
            self.pointer.moved(pos);
            return false;
        }
        if !self.is_dragging() {
            log::debug!("drag start at ({:.1}, {:.1})", pos.x, pos.y);
        }
        self.pointer.pressed(pos);
        self.anchored = false;
        true
    }

    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            self.end_drag();
        }
    }

    /// Window lost focus: the button release may never arrive.
    pub fn focus_lost(&mut self) {
        self.pointer_up();
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        if self.pointer.dragging {
            DriverState::Dragging
        } else {
            DriverState::Idle
        }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state() == DriverState::Dragging
    }

    #[inline]
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    #[inline]
    pub fn bitmap_mut(&mut self) -> &mut Bitmap {
        &mut self.bitmap
    }

    /// Runs one frame of the painting pipeline.
    ///
    /// `viewport` is the on-screen rectangle the camera renders into, in the
    /// same units as pointer positions.
    pub fn frame<C, S>(&mut self, viewport: ViewportRect, camera: &C, surface: &S) -> FrameOutcome
    where
        C: RayCaster + ?Sized,
        S: RaySurface + ?Sized,
    {
        if self.settings.move_mode || !self.is_dragging() {
            return FrameOutcome::Idle;
        }
        let Some(pos) = self.pointer.position else {
            return FrameOutcome::NoPointer;
        };
        if viewport.is_empty() {
            return FrameOutcome::NoViewport;
        }

        let ray = project(pos, viewport, camera);
        let outcome = self.apply_hit(surface.intersect(&ray));
        log::trace!("paint frame: {outcome:?}");
        outcome
    }

    /// Stroke step for an already computed hit.
    ///
    /// On a hit the mapped pixel becomes the segment end; a miss leaves the
    /// cursor on its last pixel. Either way the next segment starts where
    /// this one ended.
    pub fn apply_hit(&mut self, hit: Option<RayHit>) -> FrameOutcome {
        if self.settings.move_mode || !self.is_dragging() {
            return FrameOutcome::Idle;
        }

        let outcome = match hit {
            None => FrameOutcome::Missed,
            Some(hit) => {
                let px = to_pixel(hit.uv, self.bitmap.size());
                if self.anchored {
                    self.cursor.current = px;
                } else {
                    self.cursor.anchor(px);
                    self.anchored = true;
                }

                if self.cursor.within(self.settings.max_jump) {
                    FrameOutcome::Painted { points: self.stroke() }
                } else {
                    let distance = self.cursor.jump();
                    log::debug!(
                        "jump rejected: ({}, {}) -> ({}, {}) is {distance:.1}px",
                        self.cursor.previous.x,
                        self.cursor.previous.y,
                        px.x,
                        px.y
                    );
                    FrameOutcome::Rejected { distance }
                }
            }
        };

        self.cursor.commit();
        outcome
    }

    fn stroke(&mut self) -> usize {
        let brush = self.settings.brush_size.max(1);
        let half = (brush / 2) as i32;
        let color = self.settings.color;
        let bitmap = &mut self.bitmap;

        rasterize(self.cursor.previous, self.cursor.current, |x, y| {
            bitmap.fill_rect(x - half, y - half, brush, brush, color);
        })
    }

    fn end_drag(&mut self) {
        log::debug!("drag end");
        self.pointer.released();
        self.anchored = false;
    }
}

impl Default for PaintingSession {
    fn default() -> Self {
        Self::new(PaintSettings::default())
    }
}
