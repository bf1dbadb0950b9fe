pub mod health;
pub mod politicians;
pub mod promises;
pub mod registrations;
pub mod reports;
pub mod students;
pub mod subjects;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /students/{id}                                         profile
/// /students/{id}/registrations                           registered subjects
/// /students/{id}/available-subjects                      open curriculum subjects
/// /students/{id}/subjects/{subject_id}/registration-check  decision
///
/// /registrations                                         register (POST)
/// /registrations/{student_id}/{subject_id}/grade         set or clear grade (PUT)
///
/// /subjects/{id}/students                                grading roster
///
/// /reports/subjects/{id}/statistics                      grade statistics
/// /reports/curricula                                     curriculum structure
///
/// /politicians                                           list
/// /politicians/{id}                                      profile
///
/// /promises                                              list
/// /promises/{id}                                         detail with history
/// /promises/{id}/updates                                 add progress update (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", students::router())
        .nest("/registrations", registrations::router())
        .nest("/subjects", subjects::router())
        .nest("/reports", reports::router())
        .nest("/politicians", politicians::router())
        .nest("/promises", promises::router())
}
