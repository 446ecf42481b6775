/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The timer is suspended; nothing happened.
    Idle,
    Running { remaining: u32 },
    /// The countdown reached zero on this tick. Reported once.
    Expired,
}

/// Per-question countdown, measured in whole seconds.
///
/// The timer does not own a clock: the caller ticks it once per elapsed
/// second. Expiry suspends it, so `Expired` is reported at most once per
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl SessionTimer {
    /// A suspended timer holding the full `duration`.
    #[must_use]
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    /// Refill to the full duration and start counting.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// Stop counting, keeping the remaining time.
    pub fn suspend(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running {
                remaining: self.remaining,
            }
        }
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining time as a share of the duration, 0..=100.
    #[must_use]
    pub fn percent_remaining(&self) -> u32 {
        if self.duration == 0 {
            return 0;
        }
        let percent = u64::from(self.remaining) * 100 / u64::from(self.duration);
        u32::try_from(percent).unwrap_or(100)
    }
}
