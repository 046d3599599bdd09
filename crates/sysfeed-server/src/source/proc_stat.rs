//! Parser for the aggregate `cpu` line of Linux `/proc/stat`.
//!
//! ```text
//! cpu  user nice system idle iowait irq softirq steal guest guest_nice
//! ```
//!
//! Values are in clock ticks (`USER_HZ`).

use sysfeed_core::{
    error::{Result, SysfeedError},
    sample::CpuSample,
};

/// `USER_HZ` is fixed at 100 on every mainstream Linux architecture.
pub const CLOCK_TICKS_PER_SEC: f64 = 100.0;

pub const PROC_STAT_PATH: &str = "/proc/stat";

pub fn parse_cpu_times(stat: &str) -> Result<CpuSample> {
    let line = stat
        .lines()
        .find(|l| l.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| SysfeedError::Metrics("no aggregate cpu line in /proc/stat".into()))?;

    let fields = line
        .split_whitespace()
        .skip(1)
        .map(|v| {
            v.parse::<u64>()
                .map_err(|e| SysfeedError::Metrics(format!("bad /proc/stat field {v:?}: {e}")))
        })
        .collect::<Result<Vec<u64>>>()?;

    // user, nice, system, idle are present on every kernel we care about.
    let [user, _nice, system, idle, ..] = fields.as_slice() else {
        return Err(SysfeedError::Metrics(format!(
            "/proc/stat cpu line too short ({} fields)",
            fields.len()
        )));
    };

    Ok(CpuSample {
        user: *user as f64 / CLOCK_TICKS_PER_SEC,
        system: *system as f64 / CLOCK_TICKS_PER_SEC,
        idle: *idle as f64 / CLOCK_TICKS_PER_SEC,
    })
}
