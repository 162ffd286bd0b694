//! One-second tick source for the session.
//!
//! The ticker is polled from the host's event loop. It holds at most one
//! armed countdown token and releases one tick per elapsed second, so ticks
//! are delivered one at a time even when the loop falls behind.

use std::time::{Duration, Instant};

use super::state::CountdownToken;

/// Interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
struct Armed {
    token: CountdownToken,
    next_due: Instant,
}

/// Polled one-second clock.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    armed: Option<Armed>,
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Start ticking for `token`, first tick one second after `now`.
    ///
    /// Replaces any previously armed token.
    pub fn arm(&mut self, token: CountdownToken, now: Instant) {
        self.armed = Some(Armed {
            token,
            next_due: now + TICK_INTERVAL,
        });
    }

    /// Stop ticking. Pending ticks are dropped.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Whether a countdown is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Take the next due tick, if any.
    ///
    /// Call repeatedly until it returns `None` to catch up after a stall.
    pub fn poll(&mut self, now: Instant) -> Option<CountdownToken> {
        let armed = self.armed.as_mut()?;
        if now < armed.next_due {
            return None;
        }
        armed.next_due += TICK_INTERVAL;
        Some(armed.token)
    }

    /// Time until the next tick is due, or `None` when disarmed.
    #[must_use]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|armed| armed.next_due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EventKind, SessionCore, SessionSettings};

    fn work_core(seconds: u32) -> SessionCore {
        SessionCore::new(SessionSettings {
            work_seconds: seconds,
            break_seconds: 1,
            target_break_count: 1,
        })
    }

    #[test]
    fn test_disarmed_ticker_never_fires() {
        let mut ticker = Ticker::new();
        let now = Instant::now();
        assert!(ticker.poll(now + Duration::from_secs(10)).is_none());
        assert!(ticker.until_next(now).is_none());
    }

    #[test]
    fn test_one_tick_per_second() {
        let mut core = work_core(5);
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.arm(core.start_work().unwrap(), start);

        assert!(ticker.poll(start + Duration::from_millis(999)).is_none());

        let token = ticker.poll(start + Duration::from_secs(1)).unwrap();
        assert!(ticker.poll(start + Duration::from_secs(1)).is_none());
        core.tick(token);
        assert_eq!(core.remaining_seconds(), 4);
    }

    #[test]
    fn test_catches_up_one_tick_at_a_time() {
        let mut core = work_core(5);
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.arm(core.start_work().unwrap(), start);

        let late = start + Duration::from_millis(3500);
        let mut delivered = 0;
        while let Some(token) = ticker.poll(late) {
            core.tick(token);
            delivered += 1;
        }

        assert_eq!(delivered, 3);
        assert_eq!(core.remaining_seconds(), 2);
        assert_eq!(ticker.until_next(late), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_disarm_drops_pending_ticks() {
        let mut core = work_core(5);
        let mut ticker = Ticker::new();
        let start = Instant::now();
        ticker.arm(core.start_work().unwrap(), start);

        core.reset();
        ticker.disarm();

        assert!(!ticker.is_armed());
        assert!(ticker.poll(start + Duration::from_secs(3)).is_none());
        assert_eq!(core.remaining_seconds(), 0);
    }

    #[test]
    fn test_stale_token_after_rearm_is_ignored_by_core() {
        let mut core = work_core(2);
        let mut ticker = Ticker::new();
        let start = Instant::now();

        let first = core.start_work().unwrap();
        ticker.arm(first, start);
        core.reset();
        let second = core.start_work().unwrap();

        // A tick captured before re-arming carries the old token
        let stale = ticker.poll(start + Duration::from_secs(1)).unwrap();
        assert!(core.tick(stale).is_empty());

        ticker.arm(second, start);
        let mut events = Vec::new();
        while let Some(token) = ticker.poll(start + Duration::from_secs(2)) {
            events.extend(core.tick(token));
        }
        assert_eq!(events.first().map(|e| e.kind), Some(EventKind::WorkFinished));
    }
}
