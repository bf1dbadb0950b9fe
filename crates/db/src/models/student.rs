//! Student entity model and DTOs.

use recordbook_core::types::{CurriculumId, Date, StudentId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: StudentId,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub current_school: String,
    pub email: String,
    pub curriculum_id: CurriculumId,
    pub created_at: Timestamp,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.title, self.first_name, self.last_name)
    }
}

/// DTO for creating a student. Ids are assigned by the institution.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub id: StudentId,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub current_school: String,
    pub email: String,
    pub curriculum_id: CurriculumId,
}
