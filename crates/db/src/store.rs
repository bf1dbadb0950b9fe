//! Postgres implementation of the core store traits.
//!
//! [`PgStore`] borrows one connection exclusively for its lifetime. Build it
//! over a transaction (`PgStore::new(&mut *tx)`) to run a whole rule
//! sequence atomically, or over a pooled connection for reads.

use recordbook_core::grading::Grade;
use recordbook_core::promise_update::PromiseStatus;
use recordbook_core::store::{
    CurriculumEntry, CurriculumStore, PromiseRecord, PromiseStore, PromiseUpdateRecord,
    PromiseUpdateStore, RegistrationRecord, RegistrationStore, StoreError, StudentRecord,
    StudentStore, SubjectRecord, SubjectStore,
};
use recordbook_core::types::{CurriculumId, StudentId};
use sqlx::PgConnection;

use crate::models::promise::Promise;
use crate::models::promise_update::PromiseUpdate;
use crate::models::registration::Registration;
use crate::models::subject::Subject;
use crate::repositories::{
    CurriculumRepo, PromiseRepo, PromiseUpdateRepo, RegistrationRepo, StudentRepo, SubjectRepo,
};

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgStore<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgStore<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

/// Map a sqlx error onto the store taxonomy. Unique violations become
/// [`StoreError::DuplicateKey`] carrying the constraint name.
pub fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            tracing::debug!(%constraint, "Unique constraint rejected write");
            return StoreError::DuplicateKey(constraint);
        }
    }
    tracing::error!(error = %err, "Store query failed");
    StoreError::backend(err)
}

fn parse_grade(raw: Option<&str>) -> Result<Option<Grade>, StoreError> {
    raw.map(str::parse::<Grade>)
        .transpose()
        .map_err(StoreError::backend)
}

fn registration_record(row: Registration) -> Result<RegistrationRecord, StoreError> {
    Ok(RegistrationRecord {
        grade: parse_grade(row.grade.as_deref())?,
        student_id: row.student_id,
        subject_id: row.subject_id,
    })
}

fn subject_record(row: Subject) -> SubjectRecord {
    SubjectRecord {
        id: row.id,
        name: row.name,
        credits: row.credits,
        instructor: row.instructor,
        prerequisite_id: row.prerequisite_subject_id,
    }
}

fn promise_record(row: Promise) -> Result<PromiseRecord, StoreError> {
    Ok(PromiseRecord {
        status: row.status.parse::<PromiseStatus>().map_err(StoreError::backend)?,
        id: row.id,
        announcement_date: row.announcement_date,
    })
}

fn update_record(row: PromiseUpdate) -> PromiseUpdateRecord {
    PromiseUpdateRecord {
        id: row.id,
        promise_id: row.promise_id,
        update_date: row.update_date,
        detail: row.detail,
    }
}

// ---------------------------------------------------------------------------
// Registration side
// ---------------------------------------------------------------------------

impl StudentStore for PgStore<'_> {
    async fn student_by_id(&mut self, id: StudentId) -> Result<Option<StudentRecord>, StoreError> {
        let row = StudentRepo::find_by_id(&mut *self.conn, id)
            .await
            .map_err(classify)?;
        Ok(row.map(|s| StudentRecord {
            id: s.id,
            birth_date: s.birth_date,
            curriculum_id: s.curriculum_id,
        }))
    }
}

impl SubjectStore for PgStore<'_> {
    async fn subject_by_id(&mut self, id: &str) -> Result<Option<SubjectRecord>, StoreError> {
        let row = SubjectRepo::find_by_id(&mut *self.conn, id)
            .await
            .map_err(classify)?;
        Ok(row.map(subject_record))
    }
}

impl RegistrationStore for PgStore<'_> {
    async fn registration(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
    ) -> Result<Option<RegistrationRecord>, StoreError> {
        RegistrationRepo::find(&mut *self.conn, student_id, subject_id)
            .await
            .map_err(classify)?
            .map(registration_record)
            .transpose()
    }

    async fn insert_registration(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
    ) -> Result<RegistrationRecord, StoreError> {
        let row = RegistrationRepo::create(&mut *self.conn, student_id, subject_id)
            .await
            .map_err(classify)?;
        registration_record(row)
    }

    async fn update_grade(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
        grade: Option<Grade>,
    ) -> Result<Option<RegistrationRecord>, StoreError> {
        RegistrationRepo::update_grade(
            &mut *self.conn,
            student_id,
            subject_id,
            grade.as_ref().map(Grade::as_str),
        )
        .await
        .map_err(classify)?
        .map(registration_record)
        .transpose()
    }

    async fn registrations_for_student(
        &mut self,
        student_id: StudentId,
    ) -> Result<Vec<RegistrationRecord>, StoreError> {
        RegistrationRepo::list_by_student(&mut *self.conn, student_id)
            .await
            .map_err(classify)?
            .into_iter()
            .map(registration_record)
            .collect()
    }

    async fn registrations_for_subject(
        &mut self,
        subject_id: &str,
    ) -> Result<Vec<RegistrationRecord>, StoreError> {
        RegistrationRepo::list_by_subject(&mut *self.conn, subject_id)
            .await
            .map_err(classify)?
            .into_iter()
            .map(registration_record)
            .collect()
    }
}

impl CurriculumStore for PgStore<'_> {
    async fn curriculum_subjects(
        &mut self,
        curriculum_id: CurriculumId,
    ) -> Result<Vec<CurriculumEntry>, StoreError> {
        let rows = CurriculumRepo::list_subjects(&mut *self.conn, curriculum_id)
            .await
            .map_err(classify)?;
        Ok(rows
            .into_iter()
            .map(|r| CurriculumEntry {
                subject_id: r.subject_id,
                semester: r.semester,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Promise side
// ---------------------------------------------------------------------------

impl PromiseStore for PgStore<'_> {
    async fn promise_by_id(&mut self, id: &str) -> Result<Option<PromiseRecord>, StoreError> {
        PromiseRepo::find_by_id(&mut *self.conn, id)
            .await
            .map_err(classify)?
            .map(promise_record)
            .transpose()
    }

    async fn update_status(&mut self, id: &str, status: PromiseStatus) -> Result<bool, StoreError> {
        PromiseRepo::update_status(&mut *self.conn, id, status.as_str())
            .await
            .map_err(classify)
    }
}

impl PromiseUpdateStore for PgStore<'_> {
    async fn updates_for_promise(
        &mut self,
        promise_id: &str,
    ) -> Result<Vec<PromiseUpdateRecord>, StoreError> {
        let rows = PromiseUpdateRepo::list_by_promise(&mut *self.conn, promise_id)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(update_record).collect())
    }

    async fn latest_update_id(&mut self) -> Result<Option<String>, StoreError> {
        PromiseUpdateRepo::latest_id(&mut *self.conn)
            .await
            .map_err(classify)
    }

    async fn insert_update(
        &mut self,
        update: &PromiseUpdateRecord,
    ) -> Result<PromiseUpdateRecord, StoreError> {
        let row = PromiseUpdateRepo::create(
            &mut *self.conn,
            &update.id,
            &update.promise_id,
            update.update_date,
            &update.detail,
        )
        .await
        .map_err(classify)?;
        Ok(update_record(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_grade_text_parses() {
        assert_eq!(parse_grade(None).unwrap(), None);
        assert_eq!(parse_grade(Some("C+")).unwrap(), Some(Grade::CPlus));
        assert!(matches!(parse_grade(Some("Z")), Err(StoreError::Backend(_))));
    }

    #[test]
    fn non_database_errors_are_backend_failures() {
        assert!(matches!(classify(sqlx::Error::RowNotFound), StoreError::Backend(_)));
    }
}
