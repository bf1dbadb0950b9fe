//! Handlers for the `/subjects` resource.

use axum::extract::{Path, State};
use axum::Json;
use recordbook_core::grading::GradingSummary;
use recordbook_core::registration::{self, RegistrationError};
use recordbook_core::types::SubjectId;
use recordbook_db::models::registration::RosterEntry;
use recordbook_db::models::subject::Subject;
use recordbook_db::repositories::{RegistrationRepo, SubjectRepo};
use recordbook_db::PgStore;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubjectRoster {
    pub subject: Subject,
    pub summary: GradingSummary,
    pub students: Vec<RosterEntry>,
}

/// GET /api/v1/subjects/{id}/students
pub async fn roster(
    State(state): State<AppState>,
    Path(id): Path<SubjectId>,
) -> AppResult<Json<DataResponse<SubjectRoster>>> {
    let mut conn = state.pool.acquire().await?;
    let subject = SubjectRepo::find_by_id(&mut *conn, &id)
        .await?
        .ok_or_else(|| RegistrationError::SubjectNotFound(id.clone()))?;
    let summary = registration::grading_summary(&mut PgStore::new(&mut conn), &id).await?;
    let students = RegistrationRepo::roster(&mut *conn, &id).await?;

    Ok(Json(DataResponse {
        data: SubjectRoster {
            subject,
            summary,
            students,
        },
    }))
}
