//! Reveal countdown.
//!
//! The timer only counts. It knows nothing about phases; whoever owns it
//! decides what an expiry means. Every `start` hands out a fresh
//! [`TimerToken`], and ticks carrying any other token are dropped, so a tick
//! that was already queued when the countdown got cancelled or restarted
//! can't touch the new countdown.

use serde::{Deserialize, Serialize};

use super::constants::TICK_INTERVAL_MS;

/// Identifies one run of the countdown.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TimerToken(u64);

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TimerEvent {
    Progress { remaining_ms: u64 },
    Expired,
}

#[derive(Debug)]
pub struct RoundTimer {
    interval_ms: u64,
    remaining_ms: u64,
    generation: u64,
    active: bool,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl RoundTimer {
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            remaining_ms: 0,
            generation: 0,
            active: false,
        }
    }

    /// Start counting down from `duration_ms`, replacing any countdown
    /// already running.
    pub fn start(&mut self, duration_ms: u64) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.remaining_ms = duration_ms;
        self.active = true;
        TimerToken(self.generation)
    }

    /// Stop the countdown. Safe to call when nothing is running.
    pub fn cancel(&mut self) {
        if self.active {
            self.generation = self.generation.wrapping_add(1);
        }
        self.active = false;
        self.remaining_ms = 0;
    }

    /// Advance the countdown by one interval.
    ///
    /// Returns `None` when the token is stale or the timer isn't running.
    pub fn tick(&mut self, token: TimerToken) -> Option<TimerEvent> {
        if !self.active || token.0 != self.generation {
            log::trace!("dropping stale tick {token:?}");
            return None;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.interval_ms);
        if self.remaining_ms == 0 {
            self.active = false;
            Some(TimerEvent::Expired)
        } else {
            Some(TimerEvent::Progress {
                remaining_ms: self.remaining_ms,
            })
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Token of the running countdown, if any.
    pub fn token(&self) -> Option<TimerToken> {
        self.active.then_some(TimerToken(self.generation))
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
