use crate::color::BrushColor;

/// Square RGBA8 pixel buffer backing the sphere texture.
///
/// Rows are stored top-down, 4 bytes per pixel, straight alpha. Every
/// mutation sets the dirty flag; the renderer re-uploads the whole buffer
/// when [`take_dirty`](Self::take_dirty) returns `true`.
#[derive(Debug, Clone)]
pub struct Bitmap {
    size: u32,
    pixels: Vec<u8>,
    dirty: bool,
}

impl Bitmap {
    /// Creates a fully transparent bitmap of `size × size` pixels.
    ///
    /// Starts dirty so the first frame uploads the initial contents.
    pub fn new(size: u32) -> Self {
        let len = size as usize * size as usize * 4;
        Self {
            size,
            pixels: vec![0; len],
            dirty: true,
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA8 bytes, row-major top-down.
    #[inline]
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row of [`as_rgba`](Self::as_rgba).
    #[inline]
    pub fn stride(&self) -> u32 {
        self.size * 4
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let px = &self.pixels[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and clears it.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Fills the whole surface with `color` (replacing, not compositing).
    pub fn clear(&mut self, color: BrushColor) {
        let c = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
        self.dirty = true;
    }

    /// Composites `color` over the rectangle `[x, x+w) × [y, y+h)`.
    ///
    /// The rectangle is clipped to the bitmap. Returns the number of pixels
    /// written; the bitmap is marked dirty only when that is non-zero.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: BrushColor) -> usize {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return 0;
        };

        let stride = self.stride() as usize;
        for row in y0..y1 {
            let start = row * stride + x0 * 4;
            let end = row * stride + x1 * 4;
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                let out = color.over([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&out);
            }
        }

        self.dirty = true;
        (x1 - x0) * (y1 - y0)
    }

    /// Composites an RGBA8 image source-over onto the bitmap with its
    /// top-left corner at `(0, 0)`.
    ///
    /// Transparent image pixels leave the paint underneath. Parts of `data`
    /// outside the bitmap are dropped; parts of the bitmap not covered by
    /// `data` keep their contents. `data` must hold exactly
    /// `width * height * 4` bytes, otherwise nothing is written and `false` is
    /// returned.
    pub fn blit_rgba(&mut self, width: u32, height: u32, data: &[u8]) -> bool {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            log::warn!(
                "blit_rgba: {} bytes for a {width}x{height} image (expected {expected})",
                data.len()
            );
            return false;
        }

        let cols = width.min(self.size) as usize;
        let rows = height.min(self.size) as usize;
        let src_stride = width as usize * 4;
        let dst_stride = self.stride() as usize;

        for row in 0..rows {
            let src = &data[row * src_stride..row * src_stride + cols * 4];
            let dst = &mut self.pixels[row * dst_stride..row * dst_stride + cols * 4];
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                let color = BrushColor::from_array([s[0], s[1], s[2], s[3]]);
                let out = color.over([d[0], d[1], d[2], d[3]]);
                d.copy_from_slice(&out);
            }
        }

        self.dirty = true;
        true
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let s = self.size as i32;
        if x < 0 || y < 0 || x >= s || y >= s {
            return None;
        }
        Some((y as usize * self.size as usize + x as usize) * 4)
    }

    /// Intersects a rect with the bitmap bounds as `(x0, y0, x1, y1)`, half-open.
    fn clip(&self, x: i32, y: i32, w: u32, h: u32) -> Option<(usize, usize, usize, usize)> {
        let s = self.size as i64;
        let x0 = (x as i64).clamp(0, s);
        let y0 = (y as i64).clamp(0, s);
        let x1 = (x as i64 + w as i64).clamp(0, s);
        let y1 = (y as i64 + h as i64).clamp(0, s);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
        }
    }
}
