//! Frame clock

/// Turns monotonically increasing frame timestamps into deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds since the previous timestamp
    ///
    /// Starts from zero like the animation callback clock; a timestamp that
    /// goes backwards yields zero rather than a negative delta.
    pub fn delta(&mut self, timestamp: f64) -> f32 {
        let dt = (timestamp - self.last_time).max(0.0);
        self.last_time = timestamp;
        dt as f32
    }
}
