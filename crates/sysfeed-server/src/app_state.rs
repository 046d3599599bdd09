//! Shared application state for the sysfeed server.
//!
//! Holds the validated config, the metrics source shared by all sessions,
//! process-wide stream stats, and the shutdown broadcast.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::config::ServerConfig;
use crate::obs::StreamStats;
use crate::source::{HostMetrics, MetricsSource};
use crate::stream::SessionContext;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    source: Arc<dyn MetricsSource>,
    stats: Arc<StreamStats>,
    next_session_id: AtomicU64,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    /// State backed by the host's real metrics.
    pub fn new(cfg: ServerConfig) -> Self {
        Self::with_source(cfg, Arc::new(HostMetrics::new()))
    }

    /// State with an explicit metrics source (tests, alternative backends).
    pub fn with_source(cfg: ServerConfig, source: Arc<dyn MetricsSource>) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                source,
                stats: Arc::new(StreamStats::default()),
                next_session_id: AtomicU64::new(1),
                shutdown,
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn stats(&self) -> Arc<StreamStats> {
        Arc::clone(&self.inner.stats)
    }

    pub fn next_session_id(&self) -> u64 {
        self.inner.next_session_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn session_context(&self) -> SessionContext {
        SessionContext {
            source: Arc::clone(&self.inner.source),
            stats: self.stats(),
            interval: self.inner.cfg.stream.interval(),
        }
    }

    pub fn subscribe_shutdown(&self) -> watch::Receiver<bool> {
        self.inner.shutdown.subscribe()
    }

    /// Tell every live session to end. Idempotent.
    pub fn begin_shutdown(&self) {
        self.inner.shutdown.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.inner.shutdown.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shutdown_is_broadcast_and_sticky() {
        let state = AppState::new(ServerConfig::default());
        let mut rx = state.subscribe_shutdown();
        assert!(!state.is_shutting_down());

        state.begin_shutdown();
        state.begin_shutdown();
        assert!(state.is_shutting_down());
        assert!(*rx.wait_for(|down| *down).await.unwrap());

        // Late subscribers see the current value.
        assert!(*state.subscribe_shutdown().borrow());
    }

    #[test]
    fn session_ids_are_unique() {
        let state = AppState::new(ServerConfig::default());
        let a = state.next_session_id();
        let b = state.clone().next_session_id();
        assert_ne!(a, b);
    }
}
