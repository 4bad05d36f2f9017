use std::time::{Duration, Instant};

/// Default period between background reloads
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Periodic reload timer driven by the event loop.
///
/// The loop asks [`RefreshSchedule::is_due`] once per iteration and calls
/// [`RefreshSchedule::mark_refreshed`] after loading a snapshot. Once
/// cancelled the schedule never fires again.
#[derive(Debug, Clone)]
pub struct RefreshSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RefreshSchedule {
    pub fn new(interval: Duration) -> Self {
        RefreshSchedule {
            // A zero interval would spin the loop
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Arm the schedule; the first refresh is due one interval from `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Record a reload at `now` and push the deadline out. No-op once cancelled.
    pub fn mark_refreshed(&mut self, now: Instant) {
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.next_due.is_none()
    }

    /// How long the loop may block before the next refresh. `None` when the
    /// schedule is not running.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
