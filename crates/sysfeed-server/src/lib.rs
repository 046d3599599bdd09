//! sysfeed server library entry.
//!
//! This crate wires config, the host metrics source, the stream session loop,
//! and the SSE transport into an HTTP server. It is intended to be consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod router;
pub mod source;
pub mod stream;
pub mod transport;
