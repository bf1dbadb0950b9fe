//! Repository for the `subjects` table.

use sqlx::PgExecutor;

use crate::models::subject::{CreateSubject, Subject};

const COLUMNS: &str = "id, name, credits, instructor, prerequisite_subject_id, created_at";

pub struct SubjectRepo;

impl SubjectRepo {
    pub async fn create<'e, E>(executor: E, input: &CreateSubject) -> Result<Subject, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO subjects (id, name, credits, instructor, prerequisite_subject_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(input.credits)
            .bind(&input.instructor)
            .bind(&input.prerequisite_subject_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<Subject>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
