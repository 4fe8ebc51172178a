//! Keyboard bindings and pointer gestures.

use std::time::{Duration, Instant};

use glam::Vec2;
use skypaint_engine::input::Key;
use skypaint_paint::{BrushColor, PaintSettings};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    /// Switch between look-around and painting.
    ToggleMove,
    /// Index into [`PALETTE`].
    PickColor(usize),
    /// Turn the brush hue by this many degrees.
    ShiftHue(i16),
    Export,
    Import,
    Clear,
    ToggleFullscreen,
    Quit,
}

pub const PALETTE: [BrushColor; 8] = [
    BrushColor::rgb(0xff, 0x00, 0x00),
    BrushColor::rgb(0xff, 0x8c, 0x00),
    BrushColor::rgb(0xff, 0xe0, 0x00),
    BrushColor::rgb(0x20, 0xc0, 0x40),
    BrushColor::rgb(0x20, 0x80, 0xff),
    BrushColor::rgb(0x80, 0x40, 0xe0),
    BrushColor::rgb(0xff, 0xff, 0xff),
    BrushColor::rgb(0x00, 0x00, 0x00),
];

/// Degrees per hue key press.
pub const HUE_STEP: i16 = 15;

pub fn action_for(key: Key) -> Option<Action> {
    match key {
        Key::Char('m') => Some(Action::ToggleMove),
        Key::Char(c @ '1'..='8') => Some(Action::PickColor(c as usize - '1' as usize)),
        Key::Char('[') => Some(Action::ShiftHue(-HUE_STEP)),
        Key::Char(']') => Some(Action::ShiftHue(HUE_STEP)),
        Key::Char('e') => Some(Action::Export),
        Key::Char('i') => Some(Action::Import),
        Key::Char('c') => Some(Action::Clear),
        Key::F(11) => Some(Action::ToggleFullscreen),
        Key::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Recognizes two presses close together in time and space.
#[derive(Debug, Clone)]
pub struct DoubleClick {
    pub interval: Duration,
    /// Logical pixels.
    pub slop: f32,
    last: Option<(Instant, Vec2)>,
}

impl Default for DoubleClick {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(400),
            slop: 4.0,
            last: None,
        }
    }
}

impl DoubleClick {
    /// Records a press; `true` when it completes a double click.
    ///
    /// A completed double click is consumed, so a third press starts over.
    pub fn press(&mut self, now: Instant, pos: Vec2) -> bool {
        if let Some((at, prev)) = self.last.take() {
            let quick = now.saturating_duration_since(at) <= self.interval;
            if quick && prev.distance(pos) <= self.slop {
                return true;
            }
        }
        self.last = Some((now, pos));
        false
    }
}

pub fn window_title(settings: &PaintSettings, dragging: bool) -> String {
    let mode = if settings.move_mode { "move" } else { "paint" };
    let mut title = format!("skypaint | {mode} | {}", settings.color);
    if dragging {
        title.push_str(" | dragging");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── bindings ──────────────────────────────────────────────────────────

    #[test]
    fn digits_pick_palette_slots() {
        assert_eq!(action_for(Key::Char('1')), Some(Action::PickColor(0)));
        assert_eq!(action_for(Key::Char('8')), Some(Action::PickColor(7)));
        assert_eq!(action_for(Key::Char('9')), None);
        assert_eq!(action_for(Key::Char('0')), None);
    }

    #[test]
    fn named_bindings() {
        assert_eq!(action_for(Key::Char('m')), Some(Action::ToggleMove));
        assert_eq!(action_for(Key::Char('e')), Some(Action::Export));
        assert_eq!(action_for(Key::Char('i')), Some(Action::Import));
        assert_eq!(action_for(Key::Char('c')), Some(Action::Clear));
        assert_eq!(action_for(Key::F(11)), Some(Action::ToggleFullscreen));
        assert_eq!(action_for(Key::Escape), Some(Action::Quit));
        assert_eq!(action_for(Key::Space), None);
    }

    #[test]
    fn brackets_shift_hue_both_ways() {
        assert_eq!(action_for(Key::Char('[')), Some(Action::ShiftHue(-HUE_STEP)));
        assert_eq!(action_for(Key::Char(']')), Some(Action::ShiftHue(HUE_STEP)));
        // A full turn of presses comes back around.
        assert_eq!(360 % HUE_STEP, 0);
    }

    #[test]
    fn first_palette_entry_is_default_brush() {
        assert_eq!(PALETTE[0], PaintSettings::default().color);
    }

    // ── double click ──────────────────────────────────────────────────────

    #[test]
    fn quick_close_presses_double_click() {
        let mut dc = DoubleClick::default();
        let t0 = Instant::now();
        assert!(!dc.press(t0, Vec2::new(10.0, 10.0)));
        assert!(dc.press(t0 + Duration::from_millis(150), Vec2::new(12.0, 11.0)));
        // Consumed: the next press starts a new pair.
        assert!(!dc.press(t0 + Duration::from_millis(250), Vec2::new(12.0, 11.0)));
    }

    #[test]
    fn slow_or_far_presses_do_not() {
        let mut dc = DoubleClick::default();
        let t0 = Instant::now();
        dc.press(t0, Vec2::ZERO);
        assert!(!dc.press(t0 + Duration::from_millis(900), Vec2::ZERO));
        assert!(!dc.press(t0 + Duration::from_millis(1000), Vec2::new(50.0, 0.0)));
    }

    // ── title ─────────────────────────────────────────────────────────────

    #[test]
    fn title_reflects_settings() {
        let mut settings = PaintSettings::default();
        assert_eq!(window_title(&settings, false), "skypaint | paint | #ff0000");

        settings.move_mode = true;
        settings.color = PALETTE[4];
        assert_eq!(window_title(&settings, true), "skypaint | move | #2080ff | dragging");
    }
}
