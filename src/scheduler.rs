//! Auto-refresh countdown.
//!
//! The scheduler does not own a thread. The event loop hands it the current
//! [`Instant`] on every iteration and it reports whether a refresh is due.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::data::duration::format_countdown;

/// Default auto-refresh interval in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 180;

/// Countdown granularity.
const TICK: Duration = Duration::from_secs(1);

/// Layout of the header clock.
pub const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One-second countdown that fires a refresh when it reaches zero.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    interval_secs: u64,
    countdown: u64,
    /// Deadline of the next tick while the timer runs.
    next_tick: Option<Instant>,
}

impl RefreshScheduler {
    /// A stopped scheduler. Intervals below one second are raised to one.
    pub fn new(interval: Duration) -> Self {
        let interval_secs = interval.as_secs().max(1);
        Self {
            interval_secs,
            countdown: interval_secs,
            next_tick: None,
        }
    }

    /// Start the timer, replacing any timer already running.
    pub fn start(&mut self, now: Instant) {
        self.countdown = self.interval_secs;
        self.next_tick = Some(now + TICK);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Seconds until the next automatic refresh.
    pub fn countdown(&self) -> u64 {
        self.countdown
    }

    /// Process every tick that has elapsed by `now`.
    ///
    /// Returns `true` if the countdown reached zero at least once, in which
    /// case the caller should run one refresh cycle.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut deadline) = self.next_tick else {
            return false;
        };

        let mut due = false;
        while now >= deadline {
            due |= self.tick();
            deadline += TICK;
        }
        self.next_tick = Some(deadline);
        due
    }

    /// Advance the countdown by one second. At zero it resets to the full
    /// interval and reports that a refresh is due.
    pub fn tick(&mut self) -> bool {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.countdown = self.interval_secs;
            true
        } else {
            false
        }
    }

    /// Reset the countdown after a manual refresh.
    pub fn manual_refresh(&mut self) {
        self.countdown = self.interval_secs;
    }

    pub fn countdown_label(&self) -> String {
        format!("Auto-refresh in {}", format_countdown(self.countdown))
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_REFRESH_SECS))
    }
}

/// Format a local time for the header clock.
pub fn clock_label(now: DateTime<Local>) -> String {
    now.format(CLOCK_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_interval() {
        let s = RefreshScheduler::default();
        assert_eq!(s.countdown(), 180);
        assert_eq!(s.countdown_label(), "Auto-refresh in 3:00");
        assert!(!s.is_running());
    }

    #[test]
    fn test_stopped_scheduler_never_fires() {
        let mut s = RefreshScheduler::new(Duration::from_secs(2));
        let now = Instant::now();
        assert!(!s.poll(now + Duration::from_secs(10)));
        assert_eq!(s.countdown(), 2);
    }

    #[test]
    fn test_tick_fires_at_zero_and_resets() {
        let mut s = RefreshScheduler::new(Duration::from_secs(3));
        assert!(!s.tick());
        assert!(!s.tick());
        assert_eq!(s.countdown(), 1);
        assert!(s.tick());
        assert_eq!(s.countdown(), 3);
    }

    #[test]
    fn test_poll_processes_elapsed_ticks() {
        let mut s = RefreshScheduler::new(Duration::from_secs(180));
        let start = Instant::now();
        s.start(start);
        assert!(!s.poll(start + Duration::from_millis(500)));
        assert_eq!(s.countdown(), 180);
        assert!(!s.poll(start + Duration::from_secs(5)));
        assert_eq!(s.countdown(), 175);
        assert_eq!(s.countdown_label(), "Auto-refresh in 2:55");
    }

    #[test]
    fn test_poll_reports_refresh_due() {
        let mut s = RefreshScheduler::new(Duration::from_secs(2));
        let start = Instant::now();
        s.start(start);
        assert!(!s.poll(start + Duration::from_secs(1)));
        assert!(s.poll(start + Duration::from_secs(2)));
        assert_eq!(s.countdown(), 2);
    }

    #[test]
    fn test_starting_twice_leaves_one_countdown() {
        let mut s = RefreshScheduler::default();
        let start = Instant::now();
        s.start(start);
        s.start(start);
        s.poll(start + Duration::from_secs(1));
        assert_eq!(s.countdown(), 179);
    }

    #[test]
    fn test_restart_resets_countdown() {
        let mut s = RefreshScheduler::default();
        let start = Instant::now();
        s.start(start);
        s.poll(start + Duration::from_secs(30));
        assert_eq!(s.countdown(), 150);
        s.start(start + Duration::from_secs(30));
        assert_eq!(s.countdown(), 180);
        s.poll(start + Duration::from_secs(31));
        assert_eq!(s.countdown(), 179);
    }

    #[test]
    fn test_manual_refresh_resets_countdown() {
        let mut s = RefreshScheduler::default();
        let start = Instant::now();
        s.start(start);
        s.poll(start + Duration::from_secs(100));
        s.manual_refresh();
        assert_eq!(s.countdown(), 180);
        assert!(s.is_running());
    }

    #[test]
    fn test_stop() {
        let mut s = RefreshScheduler::new(Duration::from_secs(1));
        let start = Instant::now();
        s.start(start);
        s.stop();
        assert!(!s.poll(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_sub_second_interval_is_raised() {
        let s = RefreshScheduler::new(Duration::from_millis(500));
        assert_eq!(s.interval_secs(), 1);
    }

    #[test]
    fn test_clock_label() {
        let t = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(clock_label(t), "2024-03-09 07:05:01");
    }
}
