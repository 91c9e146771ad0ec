//! Frame clock: turns `performance.now()` readings into whole ticks.
//!
//! The browser calls the draw callback at whatever rate it likes. Toast
//! expiry and anything else time-based only ever sees a tick count, so it
//! stays deterministic under test.

/// Longest gap between two frames that is honoured. A backgrounded tab can
/// stall for minutes; on return it only catches up this much.
const MAX_FRAME_GAP_MS: f64 = 500.0;

pub struct Clock {
    tick_ms: f64,
    /// Milliseconds seen but not yet turned into ticks.
    pending_ms: f64,
    last_ms: Option<f64>,
    pub elapsed_ticks: u64,
}

impl Clock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            tick_ms: 1000.0 / ticks_per_sec.max(1) as f64,
            pending_ms: 0.0,
            last_ms: None,
            elapsed_ticks: 0,
        }
    }

    /// Record a frame timestamp and return the ticks that elapsed since the
    /// previous one. The first call only sets the baseline.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let gap = self
            .last_ms
            .map(|prev| (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS))
            .unwrap_or(0.0);
        self.last_ms = Some(now_ms);

        self.pending_ms += gap;
        let ticks = (self.pending_ms / self.tick_ms).floor() as u32;
        self.pending_ms -= ticks as f64 * self.tick_ms;
        self.elapsed_ticks += ticks as u64;
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_frame_yields_nothing() {
        let mut c = Clock::new(10);
        assert_eq!(c.advance(12_345.0), 0);
        assert_eq!(c.elapsed_ticks, 0);
    }

    #[test]
    fn whole_ticks_with_carry() {
        let mut c = Clock::new(10);
        c.advance(0.0);
        assert_eq!(c.advance(250.0), 2);
        // 50ms carried + 50ms new
        assert_eq!(c.advance(300.0), 1);
        assert_eq!(c.elapsed_ticks, 3);
    }

    #[test]
    fn stalled_tab_is_capped() {
        let mut c = Clock::new(10);
        c.advance(0.0);
        assert_eq!(c.advance(60_000.0), 5);
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut c = Clock::new(10);
        c.advance(1_000.0);
        assert_eq!(c.advance(900.0), 0);
        assert_eq!(c.advance(1_000.0), 1);
    }

    #[test]
    fn toast_lifetime_at_sixty_fps() {
        use crate::market::state::{TICKS_PER_SEC, TOAST_TICKS};
        let mut c = Clock::new(TICKS_PER_SEC);
        c.advance(0.0);
        let mut total = 0;
        // 4 seconds of 60fps frames
        for frame in 1..=240 {
            total += c.advance(frame as f64 * 1000.0 / 60.0);
        }
        assert!(
            (TOAST_TICKS - 1..=TOAST_TICKS).contains(&total),
            "got {}",
            total
        );
    }
}
