use std::path::{Path, PathBuf};
use std::time::Instant;

use glam::Vec2;
use skypaint_engine::Color;
use skypaint_engine::core::{App, AppControl, FrameCtx};
use skypaint_engine::input::{InputEvent, InputFrame, KeyState, MouseButton, MouseButtonState};
use skypaint_engine::render::MeshRenderer;
use skypaint_engine::time::FpsCounter;
use skypaint_engine::window::{CursorIcon, WindowMode};
use skypaint_paint::{
    BrushColor, ImageIoError, PaintMesh, PaintSettings, PaintingSession, PerspectiveCamera,
    ViewportRect, io,
};

use crate::controls::{self, Action, DoubleClick, PALETTE};
use crate::orbit::OrbitControls;
use crate::scene;

/// File types offered by the import dialog.
const IMPORT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

pub struct SkypaintApp {
    session: PaintingSession,
    camera: PerspectiveCamera,
    orbit: OrbitControls,
    skybox: PaintMesh,
    renderer: MeshRenderer,

    export_path: PathBuf,
    double_click: DoubleClick,
    fps: FpsCounter,

    /// Left button held in move mode.
    orbiting: bool,
    title: String,
    cursor: Option<CursorIcon>,
}

impl SkypaintApp {
    pub fn new(settings: PaintSettings, export_path: PathBuf) -> Self {
        let skybox = scene::build_skybox();
        let renderer = MeshRenderer::new(scene::mesh_vertices(&skybox), scene::cull_for(skybox.side()));

        let camera = scene::build_camera(1.0, 1.0);
        let mut orbit = OrbitControls::from_camera(&camera, scene::SKYBOX_CENTER);
        orbit.rotate_speed = -1.0;
        orbit.damping = 0.05;
        orbit.enabled = settings.move_mode;

        Self {
            session: PaintingSession::new(settings),
            camera,
            orbit,
            skybox,
            renderer,
            export_path,
            double_click: DoubleClick::default(),
            fps: FpsCounter::default(),
            orbiting: false,
            title: String::new(),
            cursor: None,
        }
    }

    /// Imports `path` as the starting texture.
    pub fn load_texture(&mut self, path: &Path) -> Result<(), ImageIoError> {
        io::load_into(self.session.bitmap_mut(), path).map(|_| ())
    }

    /// Feeds one frame of input to the session and the view controls.
    ///
    /// Returns the requested actions in arrival order.
    fn handle_input(&mut self, input: &InputFrame, now: Instant, viewport_height: f32) -> Vec<Action> {
        let mut actions = Vec::new();

        // A drag held since the last frame turns the view by this frame's
        // whole pointer motion.
        if self.orbiting {
            let (dx, dy) = input.pointer_delta;
            self.orbit.drag(dx, dy, viewport_height);
        }

        for event in &input.events {
            match event {
                InputEvent::PointerMoved { x, y } => self.session.pointer_moved(Vec2::new(*x, *y)),
                InputEvent::PointerLeft => self.session.pointer_left(),
                InputEvent::PointerButton(ev) if ev.button == MouseButton::Left => {
                    let pos = Vec2::new(ev.x, ev.y);
                    match ev.state {
                        MouseButtonState::Pressed => {
                            if self.double_click.press(now, pos) {
                                actions.push(Action::ToggleFullscreen);
                            }
                            if !self.session.pointer_down(pos) {
                                self.orbiting = true;
                            }
                        }
                        MouseButtonState::Released => {
                            self.session.pointer_up();
                            self.orbiting = false;
                        }
                    }
                }
                InputEvent::Focused(false) => {
                    self.session.focus_lost();
                    self.orbiting = false;
                }
                InputEvent::Key {
                    key,
                    state: KeyState::Pressed,
                    repeat: false,
                } => {
                    if let Some(action) = controls::action_for(*key) {
                        actions.push(action);
                    }
                }
                _ => {}
            }
        }

        actions
    }

    fn toggle_move(&mut self) {
        let on = !self.session.settings().move_mode;
        self.session.set_move_mode(on);
        self.orbit.enabled = on;
        self.orbiting = false;
        log::info!("{} mode", if on { "move" } else { "paint" });
    }

    fn pick_color(&mut self, slot: usize) {
        let Some(&color) = PALETTE.get(slot) else { return };
        self.session.set_color(color);
        log::info!("brush color {color}");
    }

    fn shift_hue(&mut self, degrees: i16) {
        let color = self.session.settings().color.rotate_hue(degrees as f32);
        self.session.set_color(color);
        log::info!("brush color {color}");
    }

    fn clear(&mut self) {
        self.session.bitmap_mut().clear(BrushColor::TRANSPARENT);
        log::info!("texture cleared");
    }

    fn export(&self) -> Result<(), ImageIoError> {
        io::save_png(self.session.bitmap(), &self.export_path)
    }

    fn import(&mut self) -> Result<(), ImageIoError> {
        let picked = rfd::FileDialog::new()
            .set_title("Import texture")
            .add_filter("Images", IMPORT_EXTENSIONS)
            .pick_file();

        match picked {
            Some(path) => self.load_texture(&path),
            None => {
                log::debug!("import cancelled");
                Ok(())
            }
        }
    }

    fn perform(&mut self, action: Action, ctx: &mut FrameCtx<'_, '_>) {
        match action {
            Action::ToggleMove => self.toggle_move(),
            Action::PickColor(slot) => self.pick_color(slot),
            Action::ShiftHue(degrees) => self.shift_hue(degrees),
            Action::Clear => self.clear(),
            Action::Export => {
                if let Err(e) = self.export() {
                    log::error!("export to {} failed: {e}", self.export_path.display());
                }
            }
            Action::Import => {
                if let Err(e) = self.import() {
                    log::error!("import failed: {e}");
                }
            }
            Action::ToggleFullscreen => {
                let mode = if ctx.window.is_fullscreen() {
                    WindowMode::Windowed
                } else {
                    WindowMode::Fullscreen
                };
                ctx.runtime.set_mode(mode);
            }
            Action::Quit => ctx.runtime.exit(),
        }
    }

    fn sync_window(&mut self, ctx: &mut FrameCtx<'_, '_>) {
        let title = controls::window_title(self.session.settings(), self.session.is_dragging());
        if title != self.title {
            ctx.runtime.set_title(title.clone());
            self.title = title;
        }

        let cursor = if self.session.settings().move_mode {
            CursorIcon::Grab
        } else {
            CursorIcon::Crosshair
        };
        if self.cursor != Some(cursor) {
            ctx.window.set_cursor(cursor);
            self.cursor = Some(cursor);
        }
    }
}

impl App for SkypaintApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (width, height) = ctx.window.logical_size();

        for action in self.handle_input(ctx.input_frame, ctx.time.now, height) {
            self.perform(action, ctx);
        }

        self.camera.set_aspect(width, height);
        self.orbit.update(ctx.time.dt, &mut self.camera);

        self.session
            .frame(ViewportRect::from_size(width, height), &self.camera, &self.skybox);

        if let Some(fps) = self.fps.tick(ctx.time.now) {
            log::debug!("{fps:.1} fps");
        }
        self.sync_window(ctx);

        let mvp = (self.camera.view_projection() * self.skybox.transform()).to_cols_array_2d();
        let bitmap = self.session.bitmap();
        let renderer = &mut self.renderer;
        let mut uploaded = false;

        let control = ctx.render(Color::BLACK, |rctx, target| {
            if bitmap.is_dirty() {
                renderer.upload_texture(rctx, bitmap.size(), bitmap.as_rgba());
                uploaded = true;
            }
            renderer.render(rctx, target, mvp);
        });

        // A skipped frame keeps the flag so the next one uploads.
        if uploaded {
            self.session.bitmap_mut().take_dirty();
        }
        control
    }
}
