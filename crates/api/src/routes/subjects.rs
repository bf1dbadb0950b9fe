use axum::routing::get;
use axum::Router;

use crate::handlers::subjects;
use crate::state::AppState;

/// Routes mounted at `/subjects`.
///
/// ```text
/// GET /{id}/students  -> roster
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/students", get(subjects::roster))
}
