//! SSE handler.
//!
//! Responsibilities:
//! - Set event-stream response headers before any body byte
//! - Spawn one stream session per request, inside its own tracing span
//! - Bridge the session to the response body through a bounded channel
//!
//! When the client goes away hyper drops the body, the receiver with it, and
//! the session observes the closed channel as its disconnect signal.

use std::convert::Infallible;
use std::future::Future;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, Stream};
use tokio::sync::mpsc;
use tracing::Instrument;

use sysfeed_core::error::{Result, SysfeedError};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::stream::{run_session, EventSink};

/// Headers that make clients treat the body as an incremental event feed.
pub const SSE_HEADERS: [(header::HeaderName, &str); 4] = [
    (header::CONTENT_TYPE, "text/event-stream"),
    (header::CACHE_CONTROL, "no-cache"),
    (header::CONNECTION, "keep-alive"),
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
];

// --------------------
// Channel sink
// --------------------

/// Buffers writes and hands one chunk per flush to the response body.
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
    pending: BytesMut,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<Bytes>) -> Self {
        Self { tx, pending: BytesMut::new() }
    }

    /// Resolves once the receiving side (the response body) is gone.
    pub fn disconnected(&self) -> impl Future<Output = ()> + Send + 'static {
        let tx = self.tx.clone();
        async move { tx.closed().await }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn write(&mut self, frame: Bytes) -> Result<()> {
        if self.tx.is_closed() {
            return Err(SysfeedError::Transport("client stream closed".into()));
        }
        self.pending.extend_from_slice(&frame);
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let chunk = self.pending.split().freeze();
        self.tx
            .send(chunk)
            .await
            .map_err(|_| SysfeedError::Transport("client stream closed".into()))
    }
}

fn body_stream(rx: mpsc::Receiver<Bytes>) -> impl Stream<Item = std::result::Result<Bytes, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok(chunk), rx))
    })
}

// --------------------
// Entry
// --------------------
pub async fn sse_events(State(app): State<AppState>) -> Response {
    if app.is_shutting_down() {
        return ApiError::from(SysfeedError::ShuttingDown).into_response();
    }

    let (tx, rx) = mpsc::channel::<Bytes>(app.cfg().stream.channel_capacity);
    let sink = ChannelSink::new(tx);
    let disconnected = sink.disconnected();

    let session_id = app.next_session_id();
    let span = tracing::info_span!("sse_session", session_id);
    let ctx = app.session_context();
    let shutdown = app.subscribe_shutdown();

    tokio::spawn(
        async move {
            let end = run_session(ctx, sink, disconnected, shutdown).await;
            tracing::info!(?end, "stream session ended");
        }
        .instrument(span),
    );

    (SSE_HEADERS, Body::from_stream(body_stream(rx))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flush_sends_one_chunk_per_flush() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut sink = ChannelSink::new(tx);

        sink.write(Bytes::from_static(b"event:a\n")).await.unwrap();
        sink.write(Bytes::from_static(b"data:1\n\n")).await.unwrap();
        assert!(rx.try_recv().is_err(), "nothing visible before flush");

        sink.flush().await.unwrap();
        assert_eq!(&rx.recv().await.unwrap()[..], b"event:a\ndata:1\n\n");

        // Empty flush is a no-op.
        sink.flush().await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_receiver_fails_writes_and_fires_disconnect() {
        let (tx, rx) = mpsc::channel(4);
        let mut sink = ChannelSink::new(tx);
        let disconnected = sink.disconnected();
        drop(rx);

        disconnected.await;
        let err = sink.write(Bytes::from_static(b"x")).await.unwrap_err();
        assert_eq!(err.client_code().as_str(), "TRANSPORT");
    }
}
