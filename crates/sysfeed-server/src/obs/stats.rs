//! Label-keyed counters and gauges backed by `DashMap`.
//!
//! Labels are flattened into sorted key vectors so `[("a","1"),("b","2")]` and
//! `[("b","2"),("a","1")]` hit the same slot.

use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Debug, Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across all label sets.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }
}

#[derive(Debug, Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    /// Decrement by 1.
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    /// Add an arbitrary signed delta.
    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

/// Process-wide stream statistics.
#[derive(Debug, Default)]
pub struct StreamStats {
    pub sessions_active: GaugeVec,
    pub sessions_started: CounterVec,
    /// Labelled by `event` (`mem` / `cpu`).
    pub events_sent: CounterVec,
    /// Labelled by `metric` (`mem` / `cpu`).
    pub sample_failures: CounterVec,
    pub write_failures: CounterVec,
}

impl StreamStats {
    pub fn active_sessions(&self) -> i64 {
        self.sessions_active.get(&[])
    }

    pub fn events_sent_for(&self, event: &str) -> u64 {
        self.events_sent.get(&[("event", event)])
    }

    pub fn sample_failures_for(&self, metric: &str) -> u64 {
        self.sample_failures.get(&[("metric", metric)])
    }
}
