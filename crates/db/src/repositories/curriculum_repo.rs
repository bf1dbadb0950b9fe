//! Repository for the `curricula` and `curriculum_subjects` tables.

use recordbook_core::types::CurriculumId;
use sqlx::PgExecutor;

use crate::models::curriculum::{
    CreateCurriculum, Curriculum, CurriculumSemesterCounts, CurriculumSubject,
};

const COLUMNS: &str = "id, name, faculty_name, created_at";

/// Column list for the `curriculum_subjects` table.
const SUBJECT_COLUMNS: &str = "curriculum_id, subject_id, semester";

pub struct CurriculumRepo;

impl CurriculumRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateCurriculum) -> Result<Curriculum, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO curricula (id, name, faculty_name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Curriculum>(&query)
            .bind(input.id)
            .bind(&input.name)
            .bind(&input.faculty_name)
            .fetch_one(executor)
            .await
    }

    /// Place a subject in one semester of a curriculum.
    pub async fn add_subject<'e, E>(
        executor: E,
        input: &CurriculumSubject,
    ) -> Result<CurriculumSubject, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO curriculum_subjects (curriculum_id, subject_id, semester)
             VALUES ($1, $2, $3)
             RETURNING {SUBJECT_COLUMNS}"
        );
        sqlx::query_as::<_, CurriculumSubject>(&query)
            .bind(input.curriculum_id)
            .bind(&input.subject_id)
            .bind(input.semester)
            .fetch_one(executor)
            .await
    }

    /// Subjects of a curriculum, ordered by semester then subject id.
    pub async fn list_subjects<'e, E>(
        executor: E,
        curriculum_id: CurriculumId,
    ) -> Result<Vec<CurriculumSubject>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {SUBJECT_COLUMNS} FROM curriculum_subjects
             WHERE curriculum_id = $1
             ORDER BY semester, subject_id"
        );
        sqlx::query_as::<_, CurriculumSubject>(&query)
            .bind(curriculum_id)
            .fetch_all(executor)
            .await
    }

    /// Per-semester subject counts for every curriculum, including ones with
    /// no subjects yet.
    pub async fn semester_counts<'e, E>(
        executor: E,
    ) -> Result<Vec<CurriculumSemesterCounts>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, CurriculumSemesterCounts>(
            "SELECT c.id AS curriculum_id,
                    c.name,
                    COUNT(cs.subject_id) FILTER (WHERE cs.semester = 1) AS semester_1_subjects,
                    COUNT(cs.subject_id) FILTER (WHERE cs.semester = 2) AS semester_2_subjects
             FROM curricula c
             LEFT JOIN curriculum_subjects cs ON cs.curriculum_id = c.id
             GROUP BY c.id, c.name
             ORDER BY c.id",
        )
        .fetch_all(executor)
        .await
    }
}
