//! Persistence contracts consumed by the rule sets.
//!
//! Each trait covers the key-based lookups and single-row writes one rule
//! set needs, nothing more. Methods take `&mut self` so an implementation
//! can wrap an exclusively borrowed connection or transaction for the
//! duration of one operation.

use std::future::Future;

use serde::Serialize;

use crate::grading::Grade;
use crate::promise_update::PromiseStatus;
use crate::types::{CurriculumId, Date, PromiseId, PromiseUpdateId, StudentId, SubjectId};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub birth_date: Date,
    pub curriculum_id: CurriculumId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRecord {
    pub id: SubjectId,
    pub name: String,
    pub credits: i32,
    pub instructor: Option<String>,
    /// Subject that must be passed first. References are not checked for
    /// cycles; a cyclic chain makes every subject on it unregistrable.
    pub prerequisite_id: Option<SubjectId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub student_id: StudentId,
    pub subject_id: SubjectId,
    /// `None` until the subject is graded.
    pub grade: Option<Grade>,
}

/// One subject slot in a curriculum's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurriculumEntry {
    pub subject_id: SubjectId,
    pub semester: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromiseRecord {
    pub id: PromiseId,
    pub announcement_date: Date,
    pub status: PromiseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromiseUpdateRecord {
    pub id: PromiseUpdateId,
    pub promise_id: PromiseId,
    pub update_date: Date,
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. Carries the constraint
    /// or key description reported by the backend.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Registration side
// ---------------------------------------------------------------------------

pub trait StudentStore: Send {
    fn student_by_id(
        &mut self,
        id: StudentId,
    ) -> impl Future<Output = StoreResult<Option<StudentRecord>>> + Send;
}

pub trait SubjectStore: Send {
    fn subject_by_id(
        &mut self,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<SubjectRecord>>> + Send;
}

pub trait RegistrationStore: Send {
    fn registration(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
    ) -> impl Future<Output = StoreResult<Option<RegistrationRecord>>> + Send;

    /// Insert an ungraded registration. Must fail with
    /// [`StoreError::DuplicateKey`] when the pair already exists.
    fn insert_registration(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
    ) -> impl Future<Output = StoreResult<RegistrationRecord>> + Send;

    /// Overwrite the grade. Returns `None` when no registration exists.
    fn update_grade(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
        grade: Option<Grade>,
    ) -> impl Future<Output = StoreResult<Option<RegistrationRecord>>> + Send;

    fn registrations_for_student(
        &mut self,
        student_id: StudentId,
    ) -> impl Future<Output = StoreResult<Vec<RegistrationRecord>>> + Send;

    fn registrations_for_subject(
        &mut self,
        subject_id: &str,
    ) -> impl Future<Output = StoreResult<Vec<RegistrationRecord>>> + Send;
}

pub trait CurriculumStore: Send {
    /// Subjects required by a curriculum, ordered by semester then subject.
    fn curriculum_subjects(
        &mut self,
        curriculum_id: CurriculumId,
    ) -> impl Future<Output = StoreResult<Vec<CurriculumEntry>>> + Send;
}

// ---------------------------------------------------------------------------
// Promise side
// ---------------------------------------------------------------------------

pub trait PromiseStore: Send {
    fn promise_by_id(
        &mut self,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<PromiseRecord>>> + Send;

    /// Returns `false` when the promise row no longer exists.
    fn update_status(
        &mut self,
        id: &str,
        status: PromiseStatus,
    ) -> impl Future<Output = StoreResult<bool>> + Send;
}

pub trait PromiseUpdateStore: Send {
    /// All updates for one promise, newest update date first.
    fn updates_for_promise(
        &mut self,
        promise_id: &str,
    ) -> impl Future<Output = StoreResult<Vec<PromiseUpdateRecord>>> + Send;

    /// Highest update id across every promise, ordered by length and then
    /// text so `U1000` sorts after `U999`.
    fn latest_update_id(&mut self) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Append an update. Must fail with [`StoreError::DuplicateKey`] when the
    /// id is already taken.
    fn insert_update(
        &mut self,
        update: &PromiseUpdateRecord,
    ) -> impl Future<Output = StoreResult<PromiseUpdateRecord>> + Send;
}
