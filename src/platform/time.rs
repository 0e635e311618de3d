//! Time
//!
//! The simulation only sees milliseconds since start; the loop sleeps away
//! whatever is left of each frame.

use std::time::{Duration, Instant};

/// Milliseconds since the game started
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    start: Instant,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Holds the loop to a fixed frame rate
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame: Duration,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Time left in a frame that started at `frame_start`
    pub fn remaining(&self, frame_start: Instant) -> Duration {
        self.frame.saturating_sub(frame_start.elapsed())
    }

    /// Sleep until the end of the frame that started at `frame_start`
    pub fn wait(&self, frame_start: Instant) {
        let remaining = self.remaining(frame_start);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}
