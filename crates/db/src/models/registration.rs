//! Subject registration model and joined read models.

use recordbook_core::types::{DbId, StudentId, SubjectId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `registered_subjects` table.
///
/// `grade` is one of the letter grades or `NULL` while ungraded.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    pub grade: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /registrations`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegistration {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
}

/// DTO for setting or clearing a grade. Absent or blank clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGrade {
    pub grade: Option<String>,
}

/// A student's registration joined with the subject it refers to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentRegistration {
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub credits: i32,
    pub instructor: Option<String>,
    pub grade: Option<String>,
    pub registered_at: Timestamp,
}

/// One line of a subject's grading roster.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RosterEntry {
    pub student_id: StudentId,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub grade: Option<String>,
}
