//! OS metrics source.
//!
//! The stream session only sees the [`MetricsSource`] trait. The production
//! implementation is [`HostMetrics`]; tests plug in scripted sources.

pub mod host;
pub mod proc_stat;

use sysfeed_core::{
    error::Result,
    sample::{CpuSample, MemorySample},
};

pub use host::HostMetrics;

/// Point-in-time system metrics. Each query may fail independently.
pub trait MetricsSource: Send + Sync {
    /// Current virtual memory statistics.
    fn memory(&self) -> Result<MemorySample>;

    /// Aggregate (not per-core) CPU time breakdown.
    fn cpu_times(&self) -> Result<CpuSample>;
}
