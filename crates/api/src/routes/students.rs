//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET /{id}                                           -> get_profile
/// GET /{id}/registrations                             -> list_registrations
/// GET /{id}/available-subjects                        -> available_subjects
/// GET /{id}/subjects/{subject_id}/registration-check  -> registration_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(students::get_profile))
        .route("/{id}/registrations", get(students::list_registrations))
        .route("/{id}/available-subjects", get(students::available_subjects))
        .route(
            "/{id}/subjects/{subject_id}/registration-check",
            get(students::registration_check),
        )
}
