use log::trace;

/// Spacing between countdown ticks.
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// The round's one-second countdown.
///
/// While armed it remembers when the next tick is due. `poll` reports how
/// many whole ticks have come due and moves the deadline forward by exactly
/// that many intervals, so a late poll does not push later ticks back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    next_deadline_ms: Option<u64>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now_ms: u64) {
        trace!("countdown armed at {now_ms}ms");
        self.next_deadline_ms = Some(now_ms + TICK_INTERVAL_MS);
    }

    pub fn disarm(&mut self) {
        if self.next_deadline_ms.take().is_some() {
            trace!("countdown disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_deadline_ms.is_some()
    }

    /// Number of ticks due at `now_ms`. Always zero while disarmed.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        let Some(deadline) = self.next_deadline_ms else {
            return 0;
        };
        if now_ms < deadline {
            return 0;
        }

        let due = (now_ms - deadline) / TICK_INTERVAL_MS + 1;
        self.next_deadline_ms = Some(deadline + due * TICK_INTERVAL_MS);
        due as u32
    }

    pub fn ms_until_next(&self, now_ms: u64) -> Option<u64> {
        self.next_deadline_ms
            .map(|deadline| deadline.saturating_sub(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_ticks() {
        let mut countdown = Countdown::new();
        assert!(!countdown.is_armed());
        assert_eq!(countdown.poll(10_000), 0);
        assert_eq!(countdown.ms_until_next(0), None);
    }

    #[test]
    fn test_ticks_once_per_second() {
        let mut countdown = Countdown::new();
        countdown.arm(0);

        assert_eq!(countdown.poll(999), 0);
        assert_eq!(countdown.poll(1_000), 1);
        assert_eq!(countdown.poll(1_500), 0);
        assert_eq!(countdown.poll(2_000), 1);
        assert_eq!(countdown.ms_until_next(2_100), Some(900));
    }

    #[test]
    fn test_late_poll_catches_up_without_drift() {
        let mut countdown = Countdown::new();
        countdown.arm(0);

        // polled 350ms late, three ticks were due
        assert_eq!(countdown.poll(3_350), 3);
        // the next one is still due on the whole second
        assert_eq!(countdown.poll(3_999), 0);
        assert_eq!(countdown.poll(4_000), 1);
    }

    #[test]
    fn test_disarm_drops_pending_ticks() {
        let mut countdown = Countdown::new();
        countdown.arm(0);
        countdown.disarm();

        assert_eq!(countdown.poll(5_000), 0);

        countdown.arm(5_000);
        assert_eq!(countdown.poll(5_999), 0);
        assert_eq!(countdown.poll(6_000), 1);
    }
}
