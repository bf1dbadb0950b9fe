//! Handlers for the `/students` resource.

use axum::extract::{Path, State};
use axum::Json;
use recordbook_core::eligibility::{age_on, MIN_ELIGIBLE_AGE};
use recordbook_core::error::CoreError;
use recordbook_core::grading::round_gpa;
use recordbook_core::registration::{self, AvailableSubject, RegistrationReason};
use recordbook_core::types::{StudentId, SubjectId};
use recordbook_db::models::registration::StudentRegistration;
use recordbook_db::models::student::Student;
use recordbook_db::repositories::{RegistrationRepo, StudentRepo};
use recordbook_db::PgStore;
use serde::Serialize;
use sqlx::PgConnection;

use crate::error::AppResult;
use crate::handlers::today;
use crate::response::DataResponse;
use crate::state::AppState;

/// Student row enriched with age, eligibility, GPA and registrations.
#[derive(Debug, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: Student,
    pub full_name: String,
    pub age: i32,
    pub eligible: bool,
    /// Rounded to two decimals.
    pub gpa: f64,
    pub registered_subjects: Vec<StudentRegistration>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationCheck {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub allowed: bool,
    pub reason: RegistrationReason,
    pub message: String,
}

async fn find_student(conn: &mut PgConnection, id: StudentId) -> AppResult<Student> {
    StudentRepo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Student", id).into())
}

/// GET /api/v1/students/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> AppResult<Json<DataResponse<StudentProfile>>> {
    let mut conn = state.pool.acquire().await?;
    let student = find_student(&mut conn, id).await?;
    let registered_subjects = RegistrationRepo::list_with_subjects(&mut *conn, id).await?;
    let gpa = registration::student_gpa(&mut PgStore::new(&mut conn), id).await?;

    let age = age_on(student.birth_date, today());
    Ok(Json(DataResponse {
        data: StudentProfile {
            full_name: student.full_name(),
            age,
            eligible: age >= MIN_ELIGIBLE_AGE,
            gpa: round_gpa(gpa),
            registered_subjects,
            student,
        },
    }))
}

/// GET /api/v1/students/{id}/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> AppResult<Json<DataResponse<Vec<StudentRegistration>>>> {
    let mut conn = state.pool.acquire().await?;
    find_student(&mut conn, id).await?;
    let registrations = RegistrationRepo::list_with_subjects(&mut *conn, id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/students/{id}/available-subjects
pub async fn available_subjects(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> AppResult<Json<DataResponse<Vec<AvailableSubject>>>> {
    let mut conn = state.pool.acquire().await?;
    let available =
        registration::available_subjects(&mut PgStore::new(&mut conn), id, today()).await?;
    Ok(Json(DataResponse { data: available }))
}

/// GET /api/v1/students/{id}/subjects/{subject_id}/registration-check
///
/// Reports the decision only; eligibility is enforced at registration time.
pub async fn registration_check(
    State(state): State<AppState>,
    Path((id, subject_id)): Path<(StudentId, SubjectId)>,
) -> AppResult<Json<DataResponse<RegistrationCheck>>> {
    let mut conn = state.pool.acquire().await?;
    find_student(&mut conn, id).await?;
    let decision =
        registration::can_register(&mut PgStore::new(&mut conn), id, &subject_id).await?;

    tracing::debug!(
        student_id = id,
        %subject_id,
        allowed = decision.allowed,
        reason = %decision.reason,
        "Registration check"
    );

    Ok(Json(DataResponse {
        data: RegistrationCheck {
            student_id: id,
            subject_id,
            allowed: decision.allowed,
            message: decision.reason.to_string(),
            reason: decision.reason,
        },
    }))
}
