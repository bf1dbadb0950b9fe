//! Repository for the `students` table.

use recordbook_core::types::StudentId;
use sqlx::PgExecutor;

use crate::models::student::{CreateStudent, Student};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, first_name, last_name, birth_date, current_school, email, \
    curriculum_id, created_at";

pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create<'e, E>(executor: E, input: &CreateStudent) -> Result<Student, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO students
                (id, title, first_name, last_name, birth_date, current_school, email, curriculum_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(input.id)
            .bind(&input.title)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_date)
            .bind(&input.current_school)
            .bind(&input.email)
            .bind(input.curriculum_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: StudentId) -> Result<Option<Student>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
