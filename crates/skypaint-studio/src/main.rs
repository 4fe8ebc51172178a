mod app;
mod cli;
mod controls;
mod orbit;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use skypaint_engine::logging::init_logging;
use skypaint_engine::window::Runtime;

use crate::app::SkypaintApp;
use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.logging_config());

    let settings = args.paint_settings();
    log::info!(
        "skypaint: {0}x{0} texture, brush {1}px, color {2}",
        settings.bitmap_size,
        settings.brush_size,
        settings.color
    );

    let mut app = SkypaintApp::new(settings, args.export.clone());
    if let Some(path) = &args.texture {
        app.load_texture(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?;
    }

    Runtime::run(args.runtime_config(), args.gpu_init(), app)
}
