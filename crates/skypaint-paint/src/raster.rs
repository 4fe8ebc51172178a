//! Integer line rasterization for brush strokes.

use crate::stroke::PixelPos;

/// Centerline points of the segment between two pixels.
///
/// Mid-point (Bresenham) walk along the axis with the larger extent, so steep
/// segments have no gaps. Both endpoints are yielded. The iterator is finite
/// and cannot be restarted; build a new one per segment.
///
/// Any `i32` endpoints are accepted; the walk runs in `i64`.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i64,
    y: i64,
    xstep: i64,
    ystep: i64,
    dx: i64,
    dy: i64,
    err: i64,
    steep: bool,
    remaining: u64,
}

impl LinePoints {
    pub fn new(p0: PixelPos, p1: PixelPos) -> Self {
        let (mut x0, mut y0) = (p0.x as i64, p0.y as i64);
        let (mut x1, mut y1) = (p1.x as i64, p1.y as i64);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();

        Self {
            x: x0,
            y: y0,
            xstep: (x1 - x0).signum(),
            ystep: (y1 - y0).signum(),
            dx,
            dy,
            // floor(dx / 2); dx is non-negative so integer division floors.
            err: dx / 2,
            steep,
            // Walking x0..=x1 covers dx + 1 columns; dx == 0 is the single-point case.
            remaining: dx as u64 + 1,
        }
    }
}

impl Iterator for LinePoints {
    type Item = PixelPos;

    fn next(&mut self) -> Option<PixelPos> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // Both coordinates stay between the endpoints while points remain.
        let (a, b) = (self.x as i32, self.y as i32);
        let point = if self.steep { PixelPos::new(b, a) } else { PixelPos::new(a, b) };

        self.err -= self.dy;
        if self.err < 0 {
            self.y += self.ystep;
            self.err += self.dx;
        }
        self.x += self.xstep;

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for LinePoints {}

/// Calls `plot` for every centerline point from `p0` to `p1` inclusive.
///
/// Returns the number of points plotted. Brush footprints are the caller's
/// concern; `plot` receives centerline coordinates only.
pub fn rasterize<F>(p0: PixelPos, p1: PixelPos, mut plot: F) -> usize
where
    F: FnMut(i32, i32),
{
    let mut n = 0;
    for p in LinePoints::new(p0, p1) {
        plot(p.x, p.y);
        n += 1;
    }
    n
}

/// Float convenience: endpoints are truncated toward zero before walking.
pub fn rasterize_f32<F>(x0: f32, y0: f32, x1: f32, y1: f32, plot: F) -> usize
where
    F: FnMut(i32, i32),
{
    rasterize(
        PixelPos::new(x0 as i32, y0 as i32),
        PixelPos::new(x1 as i32, y1 as i32),
        plot,
    )
}
