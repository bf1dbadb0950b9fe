//! Route definitions for the `/promises` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::promises;
use crate::state::AppState;

/// Routes mounted at `/promises`.
///
/// ```text
/// GET  /              -> list
/// GET  /{id}          -> get_detail
/// POST /{id}/updates  -> add_update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(promises::list))
        .route("/{id}", get(promises::get_detail))
        .route("/{id}/updates", post(promises::add_update))
}
