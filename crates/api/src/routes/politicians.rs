use axum::routing::get;
use axum::Router;

use crate::handlers::politicians;
use crate::state::AppState;

/// Routes mounted at `/politicians`.
///
/// ```text
/// GET /      -> list
/// GET /{id}  -> get_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(politicians::list))
        .route("/{id}", get(politicians::get_profile))
}
