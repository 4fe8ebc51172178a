use std::fmt;
use std::str::FromStr;

/// Brush color as straight-alpha sRGB bytes.
///
/// Stored exactly as written into the bitmap; the texture is sampled as sRGB,
/// so no conversion happens on the CPU side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BrushColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl BrushColor {
    pub const TRANSPARENT: BrushColor = BrushColor::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let hex = s.trim().trim_start_matches('#');

        if !hex.is_ascii() {
            return Err(ParseColorError::new(s, "not a hex color"));
        }
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ParseColorError::new(s, "expected 6 or 8 hex digits"));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ParseColorError::new(s, "invalid hex digit"))
        };

        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Turns the hue by `degrees` around the HSV color wheel.
    ///
    /// Saturation, value and alpha are kept; grays stay gray.
    pub fn rotate_hue(self, degrees: f32) -> Self {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| c as f32 / 255.0);
        let max = r.max(g).max(b);
        let chroma = max - r.min(g).min(b);
        if chroma <= 0.0 {
            return self;
        }

        let sector = if max == r {
            ((g - b) / chroma).rem_euclid(6.0)
        } else if max == g {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        };
        let h = (sector + degrees / 60.0).rem_euclid(6.0);

        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = max - chroma;
        let byte = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Self::rgba(byte(r1), byte(g1), byte(b1), self.a)
    }

    /// Source-over composite of `self` onto `dst`, straight alpha.
    pub fn over(self, dst: [u8; 4]) -> [u8; 4] {
        match self.a {
            255 => return self.to_array(),
            0 => return dst,
            _ => {}
        }

        let sa = self.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return [0, 0, 0, 0];
        }

        let mix = |s: u8, d: u8| {
            let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };

        [
            mix(self.r, dst[0]),
            mix(self.g, dst[1]),
            mix(self.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]
    }
}

impl Default for BrushColor {
    fn default() -> Self {
        Self::rgb(0xff, 0x00, 0x00)
    }
}

impl FromStr for BrushColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for BrushColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A brush color string that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseColorError {
    pub input: String,
    pub reason: &'static str,
}

impl ParseColorError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self { input: input.to_string(), reason }
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parsing ───────────────────────────────────────────────────────────

    #[test] fn parses_rgb() { assert_eq!(BrushColor::from_hex("#ff0000").unwrap(), BrushColor::rgb(255, 0, 0)); }
    #[test] fn parses_rgba() { assert_eq!(BrushColor::from_hex("#10203040").unwrap(), BrushColor::rgba(16, 32, 48, 64)); }
    #[test] fn hash_is_optional() { assert_eq!("00ff00".parse::<BrushColor>().unwrap(), BrushColor::rgb(0, 255, 0)); }
    #[test] fn rejects_short() { BrushColor::from_hex("#fff").unwrap_err(); }
    #[test] fn rejects_bad_digit() { BrushColor::from_hex("#gg0000").unwrap_err(); }
    #[test] fn rejects_non_ascii() { BrushColor::from_hex("#ff00€").unwrap_err(); }

    #[test]
    fn hex_survives_display() {
        for s in ["#ff0000", "#12345678"] {
            assert_eq!(BrushColor::from_hex(s).unwrap().to_string(), s);
        }
    }

    // ── hue ───────────────────────────────────────────────────────────────

    #[test]
    fn hue_turns_through_primaries() {
        let red = BrushColor::rgb(255, 0, 0);
        assert_eq!(red.rotate_hue(120.0), BrushColor::rgb(0, 255, 0));
        assert_eq!(red.rotate_hue(240.0), BrushColor::rgb(0, 0, 255));
        assert_eq!(red.rotate_hue(-120.0), BrushColor::rgb(0, 0, 255));
        assert_eq!(red.rotate_hue(360.0), red);
    }

    #[test]
    fn hue_step_reaches_secondaries() {
        assert_eq!(BrushColor::rgb(255, 0, 0).rotate_hue(60.0), BrushColor::rgb(255, 255, 0));
        assert_eq!(BrushColor::rgb(0, 0, 255).rotate_hue(60.0), BrushColor::rgb(255, 0, 255));
    }

    #[test]
    fn hue_keeps_alpha_and_grays() {
        let gray = BrushColor::rgba(90, 90, 90, 40);
        assert_eq!(gray.rotate_hue(75.0), gray);

        let tinted = BrushColor::rgba(0x20, 0x80, 0xff, 0x80).rotate_hue(30.0);
        assert_eq!(tinted.a, 0x80);
        let back = tinted.rotate_hue(-30.0).to_array();
        for (got, want) in back.iter().zip([0x20u8, 0x80, 0xff, 0x80]) {
            assert!((*got as i32 - want as i32).abs() <= 1, "{back:?}");
        }
    }

    // ── compositing ───────────────────────────────────────────────────────

    #[test]
    fn opaque_replaces() {
        assert_eq!(BrushColor::rgb(1, 2, 3).over([9, 9, 9, 9]), [1, 2, 3, 255]);
    }

    #[test]
    fn transparent_keeps_destination() {
        assert_eq!(BrushColor::TRANSPARENT.over([9, 8, 7, 6]), [9, 8, 7, 6]);
    }

    #[test]
    fn half_alpha_over_opaque() {
        let out = BrushColor::rgba(255, 0, 0, 128).over([0, 0, 255, 255]);
        assert_eq!(out[3], 255);
        assert!((out[0] as i32 - 128).abs() <= 1);
        assert!((out[2] as i32 - 127).abs() <= 1);
    }

    #[test]
    fn half_alpha_over_empty_keeps_color() {
        assert_eq!(BrushColor::rgba(200, 100, 50, 128).over([0, 0, 0, 0]), [200, 100, 50, 128]);
    }
}
