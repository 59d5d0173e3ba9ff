use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock was created. Monotonic.
    pub elapsed: f32,
}

/// Produces [`FrameTime`] snapshots for one render loop.
///
/// `elapsed` follows wall-clock time since start, so a stalled frame
/// (debugger, minimized window) catches up on the next tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
