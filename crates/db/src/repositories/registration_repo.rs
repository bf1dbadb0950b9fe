//! Repository for the `registered_subjects` table.

use recordbook_core::types::StudentId;
use sqlx::PgExecutor;

use crate::models::registration::{Registration, RosterEntry, StudentRegistration};

const COLUMNS: &str = "id, student_id, subject_id, grade, created_at, updated_at";

pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert an ungraded registration.
    ///
    /// Fails with a `uq_registered_subjects_student_subject` unique violation
    /// when the pair already exists.
    pub async fn create<'e, E>(
        executor: E,
        student_id: StudentId,
        subject_id: &str,
    ) -> Result<Registration, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO registered_subjects (student_id, subject_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(student_id)
            .bind(subject_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find<'e, E>(
        executor: E,
        student_id: StudentId,
        subject_id: &str,
    ) -> Result<Option<Registration>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM registered_subjects WHERE student_id = $1 AND subject_id = $2"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(student_id)
            .bind(subject_id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite the grade (`None` clears it). Returns `None` if the student
    /// is not registered for the subject.
    pub async fn update_grade<'e, E>(
        executor: E,
        student_id: StudentId,
        subject_id: &str,
        grade: Option<&str>,
    ) -> Result<Option<Registration>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE registered_subjects SET grade = $3, updated_at = NOW()
             WHERE student_id = $1 AND subject_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(student_id)
            .bind(subject_id)
            .bind(grade)
            .fetch_optional(executor)
            .await
    }

    pub async fn list_by_student<'e, E>(
        executor: E,
        student_id: StudentId,
    ) -> Result<Vec<Registration>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM registered_subjects WHERE student_id = $1 ORDER BY subject_id"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(student_id)
            .fetch_all(executor)
            .await
    }

    pub async fn list_by_subject<'e, E>(
        executor: E,
        subject_id: &str,
    ) -> Result<Vec<Registration>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM registered_subjects WHERE subject_id = $1 ORDER BY student_id"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(subject_id)
            .fetch_all(executor)
            .await
    }

    /// A student's registrations joined with subject name and credits.
    pub async fn list_with_subjects<'e, E>(
        executor: E,
        student_id: StudentId,
    ) -> Result<Vec<StudentRegistration>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, StudentRegistration>(
            "SELECT r.subject_id,
                    s.name AS subject_name,
                    s.credits,
                    s.instructor,
                    r.grade,
                    r.created_at AS registered_at
             FROM registered_subjects r
             JOIN subjects s ON s.id = r.subject_id
             WHERE r.student_id = $1
             ORDER BY r.subject_id",
        )
        .bind(student_id)
        .fetch_all(executor)
        .await
    }

    /// Students registered for a subject, with their current grade.
    pub async fn roster<'e, E>(executor: E, subject_id: &str) -> Result<Vec<RosterEntry>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, RosterEntry>(
            "SELECT st.id AS student_id, st.title, st.first_name, st.last_name, r.grade
             FROM registered_subjects r
             JOIN students st ON st.id = r.student_id
             WHERE r.subject_id = $1
             ORDER BY st.first_name, st.last_name, st.id",
        )
        .bind(subject_id)
        .fetch_all(executor)
        .await
    }
}
