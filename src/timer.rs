//! Wall-clock driven timers for the round controller
//!
//! The host calls in with monotonic timestamps (ms). Timers never read a
//! clock themselves, which keeps rounds testable and replayable.

use serde::{Deserialize, Serialize};

/// Remaining-time countdown that subtracts the measured delta between ticks
///
/// Ticks may arrive late or early; only the actual elapsed time is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    budget_ms: u64,
    remaining_ms: u64,
    last_tick_ms: Option<u64>,
}

impl Countdown {
    pub fn new(budget_ms: u64) -> Self {
        Self {
            budget_ms,
            remaining_ms: budget_ms,
            last_tick_ms: None,
        }
    }

    /// Start consuming time from `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.last_tick_ms = Some(now_ms);
    }

    /// Stop consuming time; later ticks are ignored
    pub fn cancel(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    /// Consume the time elapsed since the previous tick. Returns the remaining time.
    pub fn tick(&mut self, now_ms: u64) -> u64 {
        if let Some(last) = self.last_tick_ms {
            // Clock going backwards consumes nothing
            let delta = now_ms.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(delta);
            self.last_tick_ms = Some(now_ms.max(last));
        }
        self.remaining_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.budget_ms - self.remaining_ms
    }

    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    pub fn expired(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Remaining whole seconds, rounded up (what a clock face shows)
    pub fn seconds_left(&self) -> u64 {
        self.remaining_ms.div_ceil(1000)
    }
}

/// One-shot deadline that can be cancelled before it fires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    due_ms: Option<u64>,
}

impl Deadline {
    /// Arm the deadline `delay_ms` after `now_ms` (re-arming replaces it)
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.due_ms = Some(now_ms.saturating_add(delay_ms));
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due_ms.is_some()
    }

    /// True exactly once, on the first poll at or after the due time
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}
