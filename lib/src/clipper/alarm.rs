//! Soft time limit for engine calls.
//!
//! Degenerate input (millions of nearly collinear points, deeply
//! self-overlapping contours) can make the engine slow. A [`TimeLimitAlarm`]
//! measures one call and reports when it ran over. Reporting is diagnostic
//! only; the call's result is never affected.

use crate::config::ClipperConfig;
use std::time::{Duration, Instant};

/// Limit applied to raw offsets when no configuration is supplied.
pub const DEFAULT_SOFT_TIME_LIMIT: Duration = Duration::from_millis(500);

/// Callback receiving the operation name, elapsed time and limit.
pub type AlarmSink = fn(&'static str, Duration, Duration);

fn log_sink(operation: &'static str, elapsed: Duration, limit: Duration) {
    log::warn!(
        "{} took {:.1} ms, soft limit is {:.1} ms",
        operation,
        elapsed.as_secs_f64() * 1000.0,
        limit.as_secs_f64() * 1000.0
    );
}

/// Measures a scope and reports on drop if it exceeded the limit.
#[derive(Debug)]
pub struct TimeLimitAlarm {
    operation: &'static str,
    limit: Option<Duration>,
    start: Instant,
    sink: AlarmSink,
}

impl TimeLimitAlarm {
    /// Start timing `operation`. `None` disables the alarm.
    pub fn new(operation: &'static str, limit: Option<Duration>) -> Self {
        Self {
            operation,
            limit,
            start: Instant::now(),
            sink: log_sink,
        }
    }

    /// Alarm with the default limit.
    pub fn with_default_limit(operation: &'static str) -> Self {
        Self::new(operation, Some(DEFAULT_SOFT_TIME_LIMIT))
    }

    /// Alarm with the limit from a configuration.
    pub fn from_config(operation: &'static str, config: &ClipperConfig) -> Self {
        Self::new(operation, config.soft_time_limit())
    }

    /// Report through `sink` instead of the log.
    pub fn with_sink(mut self, sink: AlarmSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Check the limit now. Returns true if it was exceeded.
    pub fn check(&self) -> bool {
        match self.limit {
            Some(limit) => {
                let elapsed = self.elapsed();
                if elapsed > limit {
                    (self.sink)(self.operation, elapsed, limit);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

impl Drop for TimeLimitAlarm {
    fn drop(&mut self) {
        self.check();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FIRED: AtomicUsize = AtomicUsize::new(0);

    fn counting_sink(_: &'static str, _: Duration, _: Duration) {
        FIRED.fetch_add(1, Ordering::SeqCst);
    }

    #[test]
    fn test_alarm_fires_when_exceeded() {
        let before = FIRED.load(Ordering::SeqCst);
        let alarm = TimeLimitAlarm::new("test", Some(Duration::ZERO)).with_sink(counting_sink);
        std::thread::sleep(Duration::from_millis(2));
        assert!(alarm.check());
        assert!(FIRED.load(Ordering::SeqCst) > before);
    }

    #[test]
    fn test_disabled_alarm_never_fires() {
        let config = ClipperConfig {
            soft_time_limit_ms: 0,
            ..Default::default()
        };
        let alarm = TimeLimitAlarm::from_config("test", &config);
        std::thread::sleep(Duration::from_millis(1));
        assert!(!alarm.check());
    }

    #[test]
    fn test_generous_limit() {
        let alarm = TimeLimitAlarm::new("test", Some(Duration::from_secs(60)));
        assert!(!alarm.check());
    }
}
