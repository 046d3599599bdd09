//! sysfeed core: transport-agnostic metric samples, SSE framing, and errors.
//!
//! This crate defines the wire-level contract shared by the server and any
//! client tooling. It carries no transport or runtime dependencies so it can be
//! reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Framing violations surface as `SysfeedError`/`Result` instead of crashing
//! a streaming session.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod sample;

/// Shared result type.
pub use error::{Result, SysfeedError};
