//! Tick-based timers.
//!
//! Every timer is a plain counter stored inside `GameState` and advanced
//! once per tick, so nothing depends on a platform event queue.

/// Convert a millisecond duration into whole ticks at `tick_rate` Hz.
/// Never returns zero for a non-zero duration.
pub fn ms_to_ticks(ms: u32, tick_rate: u32) -> u32 {
    if ms == 0 {
        return 0;
    }
    let ticks = (u64::from(ms) * u64::from(tick_rate) + 500) / 1000;
    (ticks as u32).max(1)
}

/// One-shot countdown. Active while `remaining > 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn start(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance by one tick. Returns `true` on the tick the countdown expires.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Repeating interval timer. An interval of zero means the timer is off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Repeating {
    interval: u32,
    remaining: u32,
}

impl Repeating {
    pub fn every(interval: u32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    /// (Re)arm with a new interval; the first firing is a full interval away.
    pub fn set_interval(&mut self, interval: u32) {
        *self = Self::every(interval);
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.interval > 0
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Advance by one tick. Returns `true` when the interval elapses.
    pub fn tick(&mut self) -> bool {
        if self.interval == 0 {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }
}
