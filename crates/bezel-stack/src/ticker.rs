//! Refresh clocks driving [`ScopeStack::run`](crate::ScopeStack::run).

use std::time::{Duration, Instant};

/// Paces the render loop.
pub trait Ticker {
    /// Block until the next refresh. Returns `false` to stop the loop.
    fn wait_next(&mut self) -> bool;
}

/// Fixed-rate wall clock. Late ticks fire immediately without catching up.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    next: Option<Instant>,
    remaining: Option<u64>,
}

impl IntervalTicker {
    /// Tick forever at `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
            remaining: None,
        }
    }

    /// Stop after `ticks` refreshes.
    pub fn limited(mut self, ticks: u64) -> Self {
        self.remaining = Some(ticks);
        self
    }
}

impl Ticker for IntervalTicker {
    fn wait_next(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        match self.next {
            // First tick fires immediately.
            None => self.next = Some(now + self.interval),
            Some(deadline) => {
                if deadline > now {
                    std::thread::sleep(deadline - now);
                }
                self.next = Some(deadline.max(now) + self.interval);
            }
        }
        true
    }
}

/// Fires a fixed number of ticks back to back, for hosts that pace externally.
#[derive(Debug, Clone, Copy)]
pub struct FixedTicks(pub u64);

impl Ticker for FixedTicks {
    fn wait_next(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}
