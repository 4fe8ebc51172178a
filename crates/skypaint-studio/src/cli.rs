// ============================================================================
// skypaint command line
// ============================================================================
//
// Usage examples:
//   skypaint
//   skypaint --texture floors.webp --color "#2080ff" --brush 4
//   skypaint --size 512 --export out/sky.png --log skypaint_paint=debug

use std::path::PathBuf;

use clap::Parser;
use skypaint_engine::device::GpuInit;
use skypaint_engine::logging::LoggingConfig;
use skypaint_engine::window::RuntimeConfig;
use skypaint_paint::{BrushColor, PaintSettings};
use winit::dpi::LogicalSize;

/// Paint on the inside of a skybox.
///
/// Drag to paint. M toggles look-around, 1-8 pick colors, [ and ] turn the
/// hue. E exports, I imports, C clears, F11 or a double click toggles
/// fullscreen, Esc quits.
#[derive(Parser, Debug)]
#[command(name = "skypaint", version)]
pub struct Args {
    /// Side of the square paint texture, in pixels.
    #[arg(long, default_value_t = 256, value_name = "PX",
          value_parser = clap::value_parser!(u32).range(1..=8192))]
    pub size: u32,

    /// Longest stroke segment that is still drawn, in texture pixels.
    /// Longer jumps (across the texture seam) are skipped.
    #[arg(long, default_value_t = 32.0, value_name = "PX", value_parser = parse_positive)]
    pub max_jump: f32,

    /// Side of the square brush, in texture pixels.
    #[arg(long, default_value_t = 2, value_name = "PX",
          value_parser = clap::value_parser!(u32).range(1..=512))]
    pub brush: u32,

    /// Brush color as #rrggbb or #rrggbbaa.
    #[arg(long, default_value = "#ff0000", value_name = "HEX")]
    pub color: BrushColor,

    /// Image to paint over at startup (png, jpeg, bmp, gif, webp).
    #[arg(long, value_name = "FILE")]
    pub texture: Option<PathBuf>,

    /// Where the export key writes the texture.
    #[arg(long, default_value = "scene.png", value_name = "FILE")]
    pub export: PathBuf,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280, value_name = "PX")]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720, value_name = "PX")]
    pub height: u32,

    /// Present without waiting for vertical sync.
    #[arg(long)]
    pub no_vsync: bool,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

fn parse_positive(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("expected a positive number, got {s}"))
    }
}

impl Args {
    pub fn paint_settings(&self) -> PaintSettings {
        PaintSettings {
            bitmap_size: self.size,
            max_jump: self.max_jump,
            brush_size: self.brush,
            color: self.color,
            ..PaintSettings::default()
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: LogicalSize::new(self.width.max(1) as f64, self.height.max(1) as f64),
            ..RuntimeConfig::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit::default().with_vsync(!self.no_vsync)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        match &self.log {
            Some(filter) => LoggingConfig::with_filter(filter.clone()),
            None => LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("skypaint").chain(args.iter().copied()))
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn defaults_match_paint_settings() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.paint_settings(), PaintSettings::default());
        assert_eq!(args.export, PathBuf::from("scene.png"));
        assert!(args.texture.is_none());
        assert_eq!(args.gpu_init().present_mode, wgpu::PresentMode::AutoVsync);
        assert!(args.logging_config().env_filter.is_none());
    }

    #[test]
    fn window_size_feeds_runtime_config() {
        let args = parse(&["--width", "800", "--height", "600"]).unwrap();
        let config = args.runtime_config();
        assert_eq!(config.initial_size, LogicalSize::new(800.0, 600.0));
        assert_eq!(config.title, RuntimeConfig::default().title);
    }

    // ── overrides ─────────────────────────────────────────────────────────

    #[test]
    fn paint_flags_override_settings() {
        let args = parse(&[
            "--size", "512", "--max-jump", "12.5", "--brush", "4", "--color", "#2080ff80",
        ])
        .unwrap();
        let s = args.paint_settings();
        assert_eq!(s.bitmap_size, 512);
        assert_eq!(s.max_jump, 12.5);
        assert_eq!(s.brush_size, 4);
        assert_eq!(s.color, BrushColor::rgba(0x20, 0x80, 0xff, 0x80));
        assert!(!s.move_mode);
    }

    #[test]
    fn no_vsync_and_log_filter() {
        let args = parse(&["--no-vsync", "--log", "skypaint_paint=trace"]).unwrap();
        assert_eq!(args.gpu_init().present_mode, wgpu::PresentMode::AutoNoVsync);
        assert_eq!(args.logging_config().env_filter.as_deref(), Some("skypaint_paint=trace"));
    }

    // ── rejection ─────────────────────────────────────────────────────────

    #[test]
    fn invalid_values_are_rejected() {
        assert!(parse(&["--color", "red"]).is_err());
        assert!(parse(&["--size", "0"]).is_err());
        assert!(parse(&["--brush", "0"]).is_err());
        assert!(parse(&["--max-jump", "-3"]).is_err());
        assert!(parse(&["--max-jump", "NaN"]).is_err());
    }
}
