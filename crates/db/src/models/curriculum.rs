//! Curriculum model, its subject structure, and per-semester counts.

use recordbook_core::types::{CurriculumId, SubjectId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `curricula` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Curriculum {
    pub id: CurriculumId,
    pub name: String,
    pub faculty_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCurriculum {
    pub id: CurriculumId,
    pub name: String,
    pub faculty_name: String,
}

/// A row from the `curriculum_subjects` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CurriculumSubject {
    pub curriculum_id: CurriculumId,
    pub subject_id: SubjectId,
    pub semester: i16,
}

/// Subject counts per semester for one curriculum.
#[derive(Debug, Clone, FromRow)]
pub struct CurriculumSemesterCounts {
    pub curriculum_id: CurriculumId,
    pub name: String,
    pub semester_1_subjects: i64,
    pub semester_2_subjects: i64,
}
