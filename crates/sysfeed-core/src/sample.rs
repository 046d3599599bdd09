//! Metric samples produced on each timer tick.
//!
//! Samples are ephemeral: they are turned into an [`Event`] right away and
//! dropped. The payload layouts below are part of the wire contract.

use crate::event::Event;

/// Event name for memory samples.
pub const MEM_EVENT: &str = "mem";
/// Event name for CPU samples.
pub const CPU_EVENT: &str = "cpu";

/// Virtual memory statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySample {
    /// Total physical memory in bytes.
    pub total: u64,
    /// Used memory in bytes.
    pub used: u64,
    /// `used / total * 100`.
    pub used_percent: f64,
}

impl MemorySample {
    /// `Total: <u64>, Used: <u64>, Perc: <2dp>%`
    pub fn payload(&self) -> String {
        format!(
            "Total: {}, Used: {}, Perc: {:.2}%",
            self.total, self.used, self.used_percent
        )
    }

    pub fn to_event(&self) -> Event {
        Event::trusted(MEM_EVENT, self.payload())
    }
}

/// Aggregate (all cores) CPU time breakdown, in seconds since boot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuSample {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
}

impl CpuSample {
    /// `User: <2dp>, Sys: <2dp>, Idle: <2dp>`
    pub fn payload(&self) -> String {
        format!(
            "User: {:.2}, Sys: {:.2}, Idle: {:.2}",
            self.user, self.system, self.idle
        )
    }

    pub fn to_event(&self) -> Event {
        Event::trusted(CPU_EVENT, self.payload())
    }
}
