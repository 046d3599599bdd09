//! Transport layer (Server-Sent Events over HTTP).
//!
//! Exposes the `/events` handler and the channel-backed sink that bridges a
//! stream session to a streaming response body.

pub mod sse;
