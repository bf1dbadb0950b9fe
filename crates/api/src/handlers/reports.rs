//! Handlers for `/reports`.

use axum::extract::{Path, State};
use axum::Json;
use recordbook_core::curriculum::CurriculumSummary;
use recordbook_core::registration::{self, SubjectReport};
use recordbook_core::types::SubjectId;
use recordbook_db::repositories::CurriculumRepo;
use recordbook_db::PgStore;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reports/subjects/{id}/statistics
pub async fn subject_statistics(
    State(state): State<AppState>,
    Path(id): Path<SubjectId>,
) -> AppResult<Json<DataResponse<SubjectReport>>> {
    let mut conn = state.pool.acquire().await?;
    let report = registration::subject_report(&mut PgStore::new(&mut conn), &id).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/reports/curricula
pub async fn curricula(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CurriculumSummary>>>> {
    let counts = CurriculumRepo::semester_counts(&state.pool).await?;
    let summaries = counts
        .into_iter()
        .map(|c| {
            CurriculumSummary::new(
                c.curriculum_id,
                c.name,
                c.semester_1_subjects,
                c.semester_2_subjects,
            )
        })
        .collect();
    Ok(Json(DataResponse { data: summaries }))
}
