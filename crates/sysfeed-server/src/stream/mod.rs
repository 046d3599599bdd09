//! Per-connection metric streaming.
//!
//! A session owns its timers and writes into an [`EventSink`]; it knows
//! nothing about HTTP.

pub mod session;

pub use session::{run_session, EventSink, SessionContext, SessionEnd};
