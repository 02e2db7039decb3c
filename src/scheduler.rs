//! Recurring tick timer with an explicit start/stop lifecycle.
//!
//! At most one timer is armed at a time: `start` on an active scheduler
//! replaces the previous timer.

use std::time::{Duration, Instant};

pub trait Scheduler {
    fn start(&mut self, period: Duration);
    fn stop(&mut self);
    fn is_active(&self) -> bool;
    /// Returns `true` when a tick is due and re-arms for the next one.
    fn poll(&mut self) -> bool;
}

/// Wall-clock scheduler. The next deadline is measured from the moment a due
/// tick is reported, so a slow tick delays the following one instead of
/// piling ticks up.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    armed: Option<Armed>,
}

#[derive(Debug)]
struct Armed {
    period: Duration,
    last_update: Instant,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the next tick, or `None` when stopped.
    pub fn time_until_due(&self) -> Option<Duration> {
        self.armed
            .as_ref()
            .map(|armed| armed.period.saturating_sub(armed.last_update.elapsed()))
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, period: Duration) {
        self.armed = Some(Armed {
            period,
            last_update: Instant::now(),
        });
    }

    fn stop(&mut self) {
        self.armed = None;
    }

    fn is_active(&self) -> bool {
        self.armed.is_some()
    }

    fn poll(&mut self) -> bool {
        match &mut self.armed {
            Some(armed) if armed.last_update.elapsed() >= armed.period => {
                armed.last_update = Instant::now();
                true
            }
            _ => false,
        }
    }
}

/// Scheduler driven by hand, one tick per [`ManualScheduler::fire`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    pending: bool,
    starts: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes one tick due if the timer is running. Returns whether it was.
    pub fn fire(&mut self) -> bool {
        self.pending = self.period.is_some();
        self.pending
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many times the timer has been started.
    pub fn starts(&self) -> usize {
        self.starts
    }
}

impl Scheduler for ManualScheduler {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.pending = false;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.pending = false;
    }

    fn is_active(&self) -> bool {
        self.period.is_some()
    }

    fn poll(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_fires_once_per_fire() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.fire());
        scheduler.start(Duration::from_millis(150));
        assert!(scheduler.fire());
        assert!(scheduler.poll());
        assert!(!scheduler.poll());
    }

    #[test]
    fn stop_discards_pending_tick() {
        let mut scheduler = ManualScheduler::new();
        scheduler.start(Duration::from_millis(150));
        let _ = scheduler.fire();
        scheduler.stop();
        assert!(!scheduler.is_active());
        assert!(!scheduler.poll());
    }

    #[test]
    fn interval_waits_for_period() {
        let mut scheduler = IntervalScheduler::new();
        assert!(!scheduler.poll());

        scheduler.start(Duration::from_secs(3600));
        assert!(scheduler.is_active());
        assert!(!scheduler.poll());

        scheduler.start(Duration::ZERO);
        assert!(scheduler.poll());
        scheduler.stop();
        assert!(!scheduler.poll());
        assert_eq!(scheduler.time_until_due(), None);
    }
}
