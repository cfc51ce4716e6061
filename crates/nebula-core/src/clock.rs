//! Frame clock built on `instant`, so the same code runs natively and in the
//! browser.

use crate::constants::MAX_FRAME_DT;
use instant::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

fn since(now: Instant, earlier: Instant) -> Duration {
    if now > earlier {
        now - earlier
    } else {
        Duration::ZERO
    }
}

#[derive(Debug)]
pub struct Clock {
    last: Instant,
    elapsed: f32,
    delta: f32,
    paused: bool,
    fps: f32,
    fps_frames: u32,
    fps_since: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last: now,
            elapsed: 0.0,
            delta: 0.0,
            paused: false,
            fps: 0.0,
            fps_frames: 0,
            fps_since: now,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advances to `now` and returns the clamped delta in seconds. Returns 0
    /// while paused.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if self.paused {
            self.delta = 0.0;
            return 0.0;
        }
        let raw = since(now, self.last).as_secs_f32();
        self.last = now;
        self.delta = raw.min(MAX_FRAME_DT);
        self.elapsed += self.delta;

        self.fps_frames += 1;
        let window = since(now, self.fps_since);
        if window >= FPS_WINDOW {
            self.fps = self.fps_frames as f32 / window.as_secs_f32();
            self.fps_frames = 0;
            self.fps_since = now;
        }
        self.delta
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Restarts the delta baseline so the hidden interval is never replayed.
    pub fn resume_at(&mut self, now: Instant) {
        if self.paused {
            self.paused = false;
            self.last = now;
            self.fps_frames = 0;
            self.fps_since = now;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
