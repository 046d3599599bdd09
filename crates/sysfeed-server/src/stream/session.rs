//! Stream session loop.
//!
//! Responsibilities:
//! - Own two independent periodic timers (memory, CPU) for the session lifetime
//! - Sample the metrics source on each tick and push one SSE event per sample
//! - End on client disconnect, write/flush failure, or server shutdown
//!
//! Triggers are handled one at a time. When several are ready together they are
//! taken in priority order: shutdown, disconnect, memory, CPU.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

use sysfeed_core::{
    error::Result,
    event::Event,
    sample::{CPU_EVENT, MEM_EVENT},
};

use crate::obs::StreamStats;
use crate::source::MetricsSource;

/// Outbound byte stream to one client.
#[async_trait]
pub trait EventSink: Send {
    /// Queue bytes for the client. May buffer.
    async fn write(&mut self, frame: Bytes) -> Result<()>;

    /// Push everything written so far to the network.
    async fn flush(&mut self) -> Result<()>;
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Disconnected,
    WriteFailed,
    Shutdown,
}

/// Everything a session needs besides its sink and signals.
#[derive(Clone)]
pub struct SessionContext {
    pub source: Arc<dyn MetricsSource>,
    pub stats: Arc<StreamStats>,
    pub interval: Duration,
}

// Holds the timers and the active-session slot; dropping it releases both.
struct SessionGuard {
    mem_tick: Interval,
    cpu_tick: Interval,
    stats: Arc<StreamStats>,
}

impl SessionGuard {
    fn acquire(period: Duration, stats: Arc<StreamStats>) -> Self {
        stats.sessions_active.inc(&[]);
        stats.sessions_started.inc(&[]);
        Self {
            mem_tick: periodic(period),
            cpu_tick: periodic(period),
            stats,
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.stats.sessions_active.dec(&[]);
        tracing::debug!("session timers released");
    }
}

// First tick one full period after start.
fn periodic(period: Duration) -> Interval {
    let mut iv = time::interval_at(Instant::now() + period, period);
    iv.set_missed_tick_behavior(MissedTickBehavior::Delay);
    iv
}

async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    let res = rx.wait_for(|down| *down).await.map(|_| ());
    if res.is_err() {
        // Sender gone: nobody can ask us to stop anymore.
        std::future::pending::<()>().await;
    }
}

async fn emit<K: EventSink>(sink: &mut K, event: &Event) -> Result<()> {
    sink.write(event.encode()).await?;
    sink.flush().await
}

/// Run one session until it ends. Timers are released on every return path.
pub async fn run_session<K, D>(
    ctx: SessionContext,
    mut sink: K,
    disconnected: D,
    mut shutdown: watch::Receiver<bool>,
) -> SessionEnd
where
    K: EventSink,
    D: Future<Output = ()> + Send,
{
    let SessionContext { source, stats, interval } = ctx;
    let mut guard = SessionGuard::acquire(interval, Arc::clone(&stats));
    tokio::pin!(disconnected);

    tracing::info!(interval_ms = interval.as_millis() as u64, "stream session started");

    loop {
        tokio::select! {
            biased;

            _ = shutdown_requested(&mut shutdown) => {
                tracing::info!("server shutting down, closing stream");
                return SessionEnd::Shutdown;
            }

            _ = &mut disconnected => {
                tracing::info!("client disconnected");
                return SessionEnd::Disconnected;
            }

            _ = guard.mem_tick.tick() => {
                let sample = match source.memory() {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read memory info");
                        stats.sample_failures.inc(&[("metric", MEM_EVENT)]);
                        continue;
                    }
                };
                if let Err(e) = emit(&mut sink, &sample.to_event()).await {
                    tracing::warn!(error = %e, event = MEM_EVENT, "unable to write");
                    stats.write_failures.inc(&[]);
                    return SessionEnd::WriteFailed;
                }
                stats.events_sent.inc(&[("event", MEM_EVENT)]);
                tracing::trace!(event = MEM_EVENT, "event sent");
            }

            _ = guard.cpu_tick.tick() => {
                let sample = match source.cpu_times() {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read cpu info");
                        stats.sample_failures.inc(&[("metric", CPU_EVENT)]);
                        continue;
                    }
                };
                if let Err(e) = emit(&mut sink, &sample.to_event()).await {
                    tracing::warn!(error = %e, event = CPU_EVENT, "unable to write");
                    stats.write_failures.inc(&[]);
                    return SessionEnd::WriteFailed;
                }
                stats.events_sent.inc(&[("event", CPU_EVENT)]);
                tracing::trace!(event = CPU_EVENT, "event sent");
            }
        }
    }
}
