//! Route modules and the assembled application router.

pub mod health;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/stories", stories::router())
        .with_state(state)
}
