//! Top-level facade crate for sysfeed.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use sysfeed_core::*;
}

pub mod server {
    pub use sysfeed_server::*;
}
