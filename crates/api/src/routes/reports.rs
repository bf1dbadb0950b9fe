use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /subjects/{id}/statistics  -> subject_statistics
/// GET /curricula                 -> curricula
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subjects/{id}/statistics", get(reports::subject_statistics))
        .route("/curricula", get(reports::curricula))
}
