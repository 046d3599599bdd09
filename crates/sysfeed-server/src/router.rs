//! Axum router wiring.
//!
//! Exposes a single route (default `/events`) streaming metrics as SSE.

use axum::{routing::get, Router};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    let path = state.cfg().server.path.clone();
    Router::new()
        .route(&path, get(transport::sse::sse_events))
        .with_state(state)
}
