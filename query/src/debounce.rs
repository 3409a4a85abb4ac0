//! Input debouncing
//!
//! A clock-driven coalescer: callers push values as they arrive and poll
//! with the current time. A value is emitted once no newer value has been
//! pushed for the quiet period, and only if it differs from the last
//! emitted value.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
    current: T,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            current: initial,
        }
    }

    /// Record a new input value, restarting the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Emit the pending value if the quiet period has elapsed.
    ///
    /// Returns the new value only when it differs from the last one emitted.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let ready = match &self.pending {
            Some((_, at)) => now.saturating_duration_since(*at) >= self.quiet,
            None => false,
        };
        if !ready {
            return None;
        }
        self.flush()
    }

    /// Emit the pending value immediately, with the same dedup rule as `poll`
    pub fn flush(&mut self) -> Option<&T> {
        let (value, _) = self.pending.take()?;
        if value == self.current {
            return None;
        }
        self.current = value;
        Some(&self.current)
    }

    /// Last emitted value
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes ready, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }
}

/// Drops values equal to the previous one
#[derive(Debug, Clone)]
pub struct Distinct<T> {
    current: T,
}

impl<T: PartialEq> Distinct<T> {
    pub fn new(initial: T) -> Self {
        Self { current: initial }
    }

    /// Returns true if `value` differs from the current value and was stored
    pub fn set(&mut self, value: T) -> bool {
        if value == self.current {
            return false;
        }
        self.current = value;
        true
    }

    pub fn current(&self) -> &T {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn test_emits_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);

        debouncer.push("tor".to_string(), start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + QUIET).map(String::as_str),
            Some("tor")
        );
        assert!(!debouncer.has_pending());
        assert_eq!(debouncer.current(), "tor");
    }

    #[test]
    fn test_fast_typing_coalesces() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);

        for (i, text) in ["t", "to", "tor", "toro"].iter().enumerate() {
            let at = start + Duration::from_millis(100 * i as u64);
            debouncer.push(text.to_string(), at);
            assert_eq!(debouncer.poll(at + Duration::from_millis(50)), None);
        }

        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(600)));
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(600)).cloned(),
            Some("toro".to_string())
        );
    }

    #[test]
    fn test_identical_value_suppressed() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new("paris".to_string(), QUIET);

        debouncer.push("pari".to_string(), start);
        debouncer.push("paris".to_string(), start + Duration::from_millis(100));
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_flush_skips_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), QUIET);
        debouncer.push("berlin".to_string(), start);
        assert_eq!(debouncer.flush().cloned(), Some("berlin".to_string()));
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_distinct() {
        let mut sort = Distinct::new(Some(1));
        assert!(!sort.set(Some(1)));
        assert!(sort.set(None));
        assert!(!sort.set(None));
        assert_eq!(*sort.current(), None);
    }
}
