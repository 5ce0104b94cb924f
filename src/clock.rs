//! Fixed-rate tick source.

use std::time::{Duration, Instant};

pub struct FrameClock {
    period: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / tick_rate.max(1),
            last: Instant::now(),
        }
    }

    /// Sleep until one period has passed since the previous tick and return
    /// the real time elapsed. Movement is tick-count based, so the value is
    /// informational only.
    pub fn wait_next(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }
}
