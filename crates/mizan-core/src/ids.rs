//! Injectable identifier and time sources.
//!
//! The pipeline never reads the wall clock or invents IDs on its own; it asks
//! an [`IdGenerator`] and a [`Clock`]. Tests use [`SequentialIds`] and
//! [`FixedClock`] for deterministic output.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier starting with `prefix`.
    fn next_id(&self, prefix: &str) -> String;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// `prefix-1`, `prefix-2`, ... with one counter shared across prefixes.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{n}")
    }
}

/// `prefix-<unix millis>-<seq>`: unique within a process, roughly sortable.
#[derive(Debug, Default)]
pub struct TimestampIds {
    seq: AtomicU64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&self, prefix: &str) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}-{}-{seq:04}", Utc::now().timestamp_millis())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id("clause"), "clause-1");
        assert_eq!(ids.next_id("clause"), "clause-2");
        assert_eq!(ids.next_id("result"), "result-3");
    }

    #[test]
    fn timestamp_ids_are_unique() {
        let ids = TimestampIds::new();
        let a = ids.next_id("doc");
        let b = ids.next_id("doc");
        assert_ne!(a, b);
        assert!(a.starts_with("doc-"));
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let t = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), clock.now());
    }
}
