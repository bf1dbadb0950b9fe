//! Handlers for the `/registrations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use recordbook_core::registration;
use recordbook_core::store::RegistrationRecord;
use recordbook_core::types::{StudentId, SubjectId};
use recordbook_db::models::registration::{CreateRegistration, UpdateGrade};
use recordbook_db::PgStore;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::today;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations
///
/// Eligibility, duplicate and prerequisite checks run in the same
/// transaction as the insert.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRegistration>,
) -> AppResult<(StatusCode, Json<DataResponse<RegistrationRecord>>)> {
    let mut tx = state.pool.begin().await?;
    let record = registration::register(
        &mut PgStore::new(&mut tx),
        input.student_id,
        &input.subject_id,
        today(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        student_id = record.student_id,
        subject_id = %record.subject_id,
        "Subject registered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// PUT /api/v1/registrations/{student_id}/{subject_id}/grade
pub async fn update_grade(
    State(state): State<AppState>,
    Path((student_id, subject_id)): Path<(StudentId, SubjectId)>,
    AppJson(input): AppJson<UpdateGrade>,
) -> AppResult<Json<DataResponse<RegistrationRecord>>> {
    let mut tx = state.pool.begin().await?;
    let record = registration::update_grade(
        &mut PgStore::new(&mut tx),
        student_id,
        &subject_id,
        input.grade.as_deref(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        student_id,
        %subject_id,
        grade = record.grade.map(|g| g.as_str()),
        "Grade updated"
    );
    Ok(Json(DataResponse { data: record }))
}
