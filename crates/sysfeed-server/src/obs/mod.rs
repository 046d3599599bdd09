//! Lightweight in-process stream statistics (dependency-free).
//!
//! Counters are stored as atomics behind label-keyed maps. They are read by
//! tests and summarized in the shutdown log line; there is no exposition
//! route.

pub mod stats;

pub use stats::{CounterVec, GaugeVec, StreamStats};
