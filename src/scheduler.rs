//! Minute-aligned redraw scheduler.
//!
//! Holds at most one pending wake, expressed as an absolute monotonic
//! deadline in milliseconds. The caller owns the actual timer: it polls
//! [`RedrawScheduler::pending_wake`] after each event and calls
//! [`RedrawScheduler::fire`] when the deadline passes.

use crate::config::INTERACTIVE_UPDATE_RATE_MS;

/// Delay from `now_ms` to the next multiple of the update interval.
///
/// Always in `1..=INTERACTIVE_UPDATE_RATE_MS`; a tick landing exactly on a
/// boundary waits a full interval.
pub fn delay_to_next_boundary(now_ms: u64) -> u64 {
    INTERACTIVE_UPDATE_RATE_MS - now_ms % INTERACTIVE_UPDATE_RATE_MS
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RedrawScheduler {
    pending: Option<u64>,
}

impl RedrawScheduler {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Cancel any pending wake, then arm an immediate one if `eligible`.
    pub fn update(&mut self, eligible: bool, now_ms: u64) {
        self.cancel();
        if eligible {
            self.start(now_ms);
        }
    }

    /// Arm a wake at `now_ms`, replacing any pending one.
    pub fn start(&mut self, now_ms: u64) {
        self.pending = Some(now_ms);
    }

    /// Drop the pending wake. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consume the pending wake if it is due. The caller redraws on `true`
    /// and then calls [`schedule_next`](Self::schedule_next) if still eligible.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.pending {
            Some(deadline) if deadline <= now_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Arm the wake for the next interval boundary after `now_ms`.
    pub fn schedule_next(&mut self, now_ms: u64) {
        let deadline = now_ms + delay_to_next_boundary(now_ms);
        trace!("redraw: next wake at {}", deadline);
        self.pending = Some(deadline);
    }

    pub fn pending_wake(&self) -> Option<u64> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_lands_on_minute_boundary() {
        assert_eq!(delay_to_next_boundary(0), 60_000);
        assert_eq!(delay_to_next_boundary(1), 59_999);
        assert_eq!(delay_to_next_boundary(59_999), 1);
        assert_eq!(delay_to_next_boundary(60_000), 60_000);
        for now in [12_345u64, 1_700_000_012_345, 59_000, 120_001] {
            let wake = now + delay_to_next_boundary(now);
            assert_eq!(wake % 60_000, 0);
            assert!(wake > now);
            assert!(wake - now <= 60_000);
        }
    }

    #[test]
    fn update_when_eligible_fires_immediately() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.update(true, 5_000);
        assert_eq!(scheduler.pending_wake(), Some(5_000));
        assert!(scheduler.fire(5_000));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn update_when_ineligible_cancels() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.schedule_next(1_000);
        scheduler.update(false, 2_000);
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn at_most_one_pending_wake() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.start(10);
        scheduler.update(true, 20);
        scheduler.schedule_next(30);
        assert_eq!(scheduler.pending_wake(), Some(60_000));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.start(0);
        assert!(scheduler.cancel());
        assert!(!scheduler.cancel());
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn fire_waits_for_deadline() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.schedule_next(30_000);
        assert!(!scheduler.fire(59_999));
        assert!(scheduler.is_pending());
        assert!(scheduler.fire(60_000));
        assert!(!scheduler.fire(60_000));
    }
}
