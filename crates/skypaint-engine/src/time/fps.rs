use std::time::{Duration, Instant};

/// Counts frames over fixed windows and reports the rate at the end of each.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    start: Option<Instant>,
    frames: u32,
    last: Option<f32>,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            start: None,
            frames: 0,
            last: None,
        }
    }

    /// Records one frame. Returns the measured rate when a window closes.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let Some(start) = self.start else {
            self.start = Some(now);
            return None;
        };
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.start = Some(now);
        self.frames = 0;
        self.last = Some(fps);
        Some(fps)
    }

    /// Rate of the last completed window.
    #[inline]
    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
