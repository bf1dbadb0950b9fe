//! Subject entity model and DTOs.

use recordbook_core::types::{SubjectId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub credits: i32,
    pub instructor: Option<String>,
    pub prerequisite_subject_id: Option<SubjectId>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubject {
    pub id: SubjectId,
    pub name: String,
    pub credits: i32,
    pub instructor: Option<String>,
    pub prerequisite_subject_id: Option<SubjectId>,
}
