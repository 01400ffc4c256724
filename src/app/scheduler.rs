use std::time::{Duration, Instant};

use crate::config::PollingConfig;

/// One cancelable repeating deadline.
#[derive(Debug, Clone, Copy)]
struct RepeatingTimer {
    interval: Duration,
    next_fire: Instant,
}

impl RepeatingTimer {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_fire: now + interval,
        }
    }

    fn due(&mut self, now: Instant) -> bool {
        if now >= self.next_fire {
            self.next_fire = now + self.interval;
            true
        } else {
            false
        }
    }
}

/// Owns the two repeating poll timers. `reschedule_all` replaces both under
/// one `&mut self`, so cancel-then-reinstall can never leave a stale timer
/// running alongside a new one. The log retention interval is display
/// metadata and never installs a timer here.
#[derive(Debug, Default)]
pub struct Scheduler {
    sensor: Option<RepeatingTimer>,
    log: Option<RepeatingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any existing timers and install fresh ones from `cfg`:
    /// sensor polls at `sensor_interval_ms`, log polls at
    /// `graph_interval_ms`. Calling this repeatedly is idempotent.
    pub fn reschedule_all(&mut self, cfg: &PollingConfig, now: Instant) {
        self.sensor = Some(RepeatingTimer::new(
            Duration::from_millis(cfg.sensor_interval_ms.max(1)),
            now,
        ));
        self.log = Some(RepeatingTimer::new(
            Duration::from_millis(cfg.graph_interval_ms.max(1)),
            now,
        ));
    }

    /// True once per elapsed sensor interval; advances the deadline.
    pub fn sensor_due(&mut self, now: Instant) -> bool {
        self.sensor.as_mut().is_some_and(|t| t.due(now))
    }

    /// True once per elapsed graph interval; advances the deadline.
    pub fn log_due(&mut self, now: Instant) -> bool {
        self.log.as_mut().is_some_and(|t| t.due(now))
    }

    /// Earliest upcoming deadline, for sizing the loop's sleep.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.sensor, self.log) {
            (Some(s), Some(l)) => Some(s.next_fire.min(l.next_fire)),
            (Some(s), None) => Some(s.next_fire),
            (None, Some(l)) => Some(l.next_fire),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(sensor_ms: u64, graph_ms: u64) -> PollingConfig {
        PollingConfig {
            sensor_interval_ms: sensor_ms,
            graph_interval_ms: graph_ms,
            log_interval_ms: 3_600_000,
        }
    }

    #[test]
    fn nothing_due_before_scheduling() {
        let mut sched = Scheduler::new();
        let now = Instant::now();
        assert!(!sched.sensor_due(now));
        assert!(!sched.log_due(now));
        assert!(sched.next_deadline().is_none());
    }

    #[test]
    fn timers_fire_once_per_interval() {
        let mut sched = Scheduler::new();
        let start = Instant::now();
        sched.reschedule_all(&cfg(100, 250), start);

        assert!(!sched.sensor_due(start));
        let t1 = start + Duration::from_millis(100);
        assert!(sched.sensor_due(t1));
        assert!(!sched.sensor_due(t1), "same instant must not double-fire");
        assert!(!sched.log_due(t1));

        let t2 = start + Duration::from_millis(250);
        assert!(sched.sensor_due(t2));
        assert!(sched.log_due(t2));
    }

    #[test]
    fn reschedule_replaces_both_deadlines() {
        let mut sched = Scheduler::new();
        let start = Instant::now();
        sched.reschedule_all(&cfg(100, 100), start);

        // Old 100ms deadlines are canceled by the reinstall.
        let mid = start + Duration::from_millis(50);
        sched.reschedule_all(&cfg(500, 500), mid);
        assert!(!sched.sensor_due(start + Duration::from_millis(120)));
        assert!(!sched.log_due(start + Duration::from_millis(120)));
        assert!(sched.sensor_due(mid + Duration::from_millis(500)));
        assert!(sched.log_due(mid + Duration::from_millis(500)));
    }

    #[test]
    fn repeated_reschedule_is_idempotent() {
        let mut sched = Scheduler::new();
        let start = Instant::now();
        for _ in 0..5 {
            sched.reschedule_all(&cfg(100, 200), start);
        }
        let t = start + Duration::from_millis(100);
        assert!(sched.sensor_due(t));
        assert!(!sched.sensor_due(t), "one timer per kind, no leaks");
    }

    #[test]
    fn next_deadline_is_the_earlier_timer() {
        let mut sched = Scheduler::new();
        let start = Instant::now();
        sched.reschedule_all(&cfg(100, 250), start);
        assert_eq!(
            sched.next_deadline(),
            Some(start + Duration::from_millis(100))
        );
    }
}
