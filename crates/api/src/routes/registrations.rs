//! Route definitions for the `/registrations` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::registrations;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST /                                 -> create
/// PUT  /{student_id}/{subject_id}/grade  -> update_grade
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registrations::create))
        .route(
            "/{student_id}/{subject_id}/grade",
            put(registrations::update_grade),
        )
}
