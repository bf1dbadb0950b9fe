//! Curriculum structure checks.

use serde::Serialize;

use crate::types::CurriculumId;

/// Minimum number of subjects each semester of a curriculum must offer.
pub const MIN_SUBJECTS_PER_SEMESTER: i64 = 3;

pub fn semester_requirements_met(semester_1: i64, semester_2: i64) -> bool {
    semester_1 >= MIN_SUBJECTS_PER_SEMESTER && semester_2 >= MIN_SUBJECTS_PER_SEMESTER
}

/// Per-curriculum subject counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurriculumSummary {
    pub curriculum_id: CurriculumId,
    pub name: String,
    pub total_subjects: i64,
    pub semester_1_subjects: i64,
    pub semester_2_subjects: i64,
    pub requirements_met: bool,
}

impl CurriculumSummary {
    pub fn new(
        curriculum_id: CurriculumId,
        name: String,
        semester_1_subjects: i64,
        semester_2_subjects: i64,
    ) -> Self {
        Self {
            curriculum_id,
            name,
            total_subjects: semester_1_subjects + semester_2_subjects,
            semester_1_subjects,
            semester_2_subjects,
            requirements_met: semester_requirements_met(semester_1_subjects, semester_2_subjects),
        }
    }
}
