//! Metrics read from the running host.

use std::sync::Mutex;

use sysinfo::System;

use sysfeed_core::{
    error::{Result, SysfeedError},
    sample::{CpuSample, MemorySample},
};

use super::MetricsSource;

/// Memory via `sysinfo`, CPU times via `/proc/stat`.
pub struct HostMetrics {
    system: Mutex<System>,
}

impl HostMetrics {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for HostMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for HostMetrics {
    fn memory(&self) -> Result<MemorySample> {
        let mut system = self
            .system
            .lock()
            .map_err(|_| SysfeedError::Metrics("system info lock poisoned".into()))?;
        system.refresh_memory();

        let total = system.total_memory();
        let used = system.used_memory();
        if total == 0 {
            return Err(SysfeedError::Metrics("total memory reported as zero".into()));
        }

        Ok(MemorySample {
            total,
            used,
            used_percent: used as f64 / total as f64 * 100.0,
        })
    }

    #[cfg(target_os = "linux")]
    fn cpu_times(&self) -> Result<CpuSample> {
        let stat = std::fs::read_to_string(super::proc_stat::PROC_STAT_PATH)
            .map_err(|e| SysfeedError::Metrics(format!("read /proc/stat failed: {e}")))?;
        super::proc_stat::parse_cpu_times(&stat)
    }

    #[cfg(not(target_os = "linux"))]
    fn cpu_times(&self) -> Result<CpuSample> {
        Err(SysfeedError::Unsupported("aggregate cpu times"))
    }
}
