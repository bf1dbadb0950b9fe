//! Subject registration rules.
//!
//! Covers the eligibility gate, the prerequisite-aware registration
//! decision, enrolment itself, grading, and the per-student and per-subject
//! aggregates built on top of registrations. Every operation runs against a
//! caller-supplied store so a whole sequence can share one transaction.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::eligibility::{age_on, MIN_ELIGIBLE_AGE};
use crate::grading::{
    compute_gpa, compute_grade_statistics, compute_grading_summary, parse_grade_input,
    GradeParseError, GradeStatistics, GradingSummary,
};
use crate::store::{
    CurriculumStore, RegistrationRecord, RegistrationStore, StoreError, StudentRecord,
    StudentStore, SubjectRecord, SubjectStore,
};
use crate::types::{Date, StudentId, SubjectId};

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Why a registration is or is not allowed. Checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationReason {
    AlreadyRegistered,
    SubjectNotFound,
    NoPrerequisite,
    PrerequisiteSatisfied,
    PrerequisiteNotMet { prerequisite_id: SubjectId },
}

impl fmt::Display for RegistrationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered => f.write_str("Already registered for this subject"),
            Self::SubjectNotFound => f.write_str("Subject not found"),
            Self::NoPrerequisite => f.write_str("No prerequisites required"),
            Self::PrerequisiteSatisfied => f.write_str("Prerequisites satisfied"),
            Self::PrerequisiteNotMet { prerequisite_id } => {
                write!(f, "Must pass prerequisite subject ID: {prerequisite_id}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationDecision {
    pub allowed: bool,
    pub reason: RegistrationReason,
}

impl RegistrationDecision {
    fn allow(reason: RegistrationReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: RegistrationReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Student {0} not found")]
    StudentNotFound(StudentId),

    #[error("Subject {0} not found")]
    SubjectNotFound(SubjectId),

    #[error(
        "Student {student_id} is not eligible (age {age}, must be at least {min})",
        min = MIN_ELIGIBLE_AGE
    )]
    NotEligible { student_id: StudentId, age: i32 },

    #[error("Student {student_id} is already registered for subject {subject_id}")]
    AlreadyRegistered {
        student_id: StudentId,
        subject_id: SubjectId,
    },

    /// The store's uniqueness constraint rejected the insert, typically a
    /// concurrent registration that won the race.
    #[error("Registration for student {student_id} in subject {subject_id} already exists")]
    DuplicateKey {
        student_id: StudentId,
        subject_id: SubjectId,
    },

    #[error("Must pass prerequisite subject {prerequisite_id} before registering for {subject_id}")]
    PrerequisiteNotMet {
        subject_id: SubjectId,
        prerequisite_id: SubjectId,
    },

    #[error(transparent)]
    InvalidGrade(#[from] GradeParseError),

    #[error("Student {student_id} is not registered for subject {subject_id}")]
    RecordNotFound {
        student_id: StudentId,
        subject_id: SubjectId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistrationError {
    /// Machine-readable reason string for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StudentNotFound(_) => "STUDENT_NOT_FOUND",
            Self::SubjectNotFound(_) => "SUBJECT_NOT_FOUND",
            Self::NotEligible { .. } => "NOT_ELIGIBLE",
            Self::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            Self::DuplicateKey { .. } => "DUPLICATE_KEY",
            Self::PrerequisiteNotMet { .. } => "PREREQUISITE_NOT_MET",
            Self::InvalidGrade(_) => "INVALID_GRADE",
            Self::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}

// ---------------------------------------------------------------------------
// Eligibility and decision
// ---------------------------------------------------------------------------

/// Load the student and require them to be at least [`MIN_ELIGIBLE_AGE`]
/// on `today`.
pub async fn check_eligibility<S>(
    store: &mut S,
    student_id: StudentId,
    today: Date,
) -> Result<StudentRecord, RegistrationError>
where
    S: StudentStore,
{
    let student = store
        .student_by_id(student_id)
        .await?
        .ok_or(RegistrationError::StudentNotFound(student_id))?;

    let age = age_on(student.birth_date, today);
    if age < MIN_ELIGIBLE_AGE {
        return Err(RegistrationError::NotEligible { student_id, age });
    }
    Ok(student)
}

/// Decide whether `student_id` may register for `subject_id`.
///
/// Does not check eligibility; callers that act on the decision go through
/// [`register`], which does.
pub async fn can_register<S>(
    store: &mut S,
    student_id: StudentId,
    subject_id: &str,
) -> Result<RegistrationDecision, RegistrationError>
where
    S: SubjectStore + RegistrationStore,
{
    if store.registration(student_id, subject_id).await?.is_some() {
        return Ok(RegistrationDecision::deny(RegistrationReason::AlreadyRegistered));
    }

    let Some(subject) = store.subject_by_id(subject_id).await? else {
        return Ok(RegistrationDecision::deny(RegistrationReason::SubjectNotFound));
    };

    let Some(prerequisite_id) = subject.prerequisite_id else {
        return Ok(RegistrationDecision::allow(RegistrationReason::NoPrerequisite));
    };

    let passed = store
        .registration(student_id, &prerequisite_id)
        .await?
        .and_then(|r| r.grade)
        .is_some_and(|g| g.is_passing());

    Ok(if passed {
        RegistrationDecision::allow(RegistrationReason::PrerequisiteSatisfied)
    } else {
        RegistrationDecision::deny(RegistrationReason::PrerequisiteNotMet { prerequisite_id })
    })
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Register a student for a subject with no grade.
///
/// Re-runs the eligibility check and [`can_register`] against the same
/// store before inserting, so a caller holding a transaction gets the
/// checks and the insert as one unit. The store's uniqueness constraint
/// still decides concurrent attempts; the loser gets
/// [`RegistrationError::DuplicateKey`].
pub async fn register<S>(
    store: &mut S,
    student_id: StudentId,
    subject_id: &str,
    today: Date,
) -> Result<RegistrationRecord, RegistrationError>
where
    S: StudentStore + SubjectStore + RegistrationStore,
{
    check_eligibility(store, student_id, today).await?;

    let decision = can_register(store, student_id, subject_id).await?;
    match decision.reason {
        RegistrationReason::NoPrerequisite | RegistrationReason::PrerequisiteSatisfied => {}
        RegistrationReason::AlreadyRegistered => {
            return Err(RegistrationError::AlreadyRegistered {
                student_id,
                subject_id: subject_id.to_string(),
            });
        }
        RegistrationReason::SubjectNotFound => {
            return Err(RegistrationError::SubjectNotFound(subject_id.to_string()));
        }
        RegistrationReason::PrerequisiteNotMet { prerequisite_id } => {
            return Err(RegistrationError::PrerequisiteNotMet {
                subject_id: subject_id.to_string(),
                prerequisite_id,
            });
        }
    }

    match store.insert_registration(student_id, subject_id).await {
        Ok(record) => Ok(record),
        Err(StoreError::DuplicateKey(_)) => Err(RegistrationError::DuplicateKey {
            student_id,
            subject_id: subject_id.to_string(),
        }),
        Err(err) => Err(err.into()),
    }
}

/// Set or clear the grade of an existing registration.
///
/// `grade` is validated before the store is touched; blank or absent input
/// clears the grade.
pub async fn update_grade<S>(
    store: &mut S,
    student_id: StudentId,
    subject_id: &str,
    grade: Option<&str>,
) -> Result<RegistrationRecord, RegistrationError>
where
    S: RegistrationStore,
{
    let grade = parse_grade_input(grade)?;

    store
        .update_grade(student_id, subject_id, grade)
        .await?
        .ok_or_else(|| RegistrationError::RecordNotFound {
            student_id,
            subject_id: subject_id.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// GPA over the student's graded registrations; `0.0` with none.
pub async fn student_gpa<S>(
    store: &mut S,
    student_id: StudentId,
) -> Result<f64, RegistrationError>
where
    S: RegistrationStore,
{
    let registrations = store.registrations_for_student(student_id).await?;
    Ok(compute_gpa(registrations.iter().map(|r| r.grade)))
}

/// Enrolment and grade statistics for one subject.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectReport {
    pub subject: SubjectRecord,
    /// Every registration, graded or not.
    pub enrollment_count: usize,
    pub statistics: GradeStatistics,
}

pub async fn subject_report<S>(
    store: &mut S,
    subject_id: &str,
) -> Result<SubjectReport, RegistrationError>
where
    S: SubjectStore + RegistrationStore,
{
    let subject = require_subject(store, subject_id).await?;
    let registrations = store.registrations_for_subject(subject_id).await?;

    Ok(SubjectReport {
        subject,
        enrollment_count: registrations.len(),
        statistics: compute_grade_statistics(registrations.iter().map(|r| r.grade)),
    })
}

/// Graded vs. ungraded counts for a subject's roster.
pub async fn grading_summary<S>(
    store: &mut S,
    subject_id: &str,
) -> Result<GradingSummary, RegistrationError>
where
    S: SubjectStore + RegistrationStore,
{
    require_subject(store, subject_id).await?;
    let registrations = store.registrations_for_subject(subject_id).await?;
    Ok(compute_grading_summary(registrations.iter().map(|r| r.grade)))
}

/// A curriculum subject the student has not registered for yet.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableSubject {
    pub subject: SubjectRecord,
    pub semester: i16,
    pub decision: RegistrationDecision,
}

/// Subjects of the student's curriculum that are still open to them, each
/// with its registration decision. Requires the student to be eligible.
///
/// Curriculum entries pointing at a missing subject are skipped.
pub async fn available_subjects<S>(
    store: &mut S,
    student_id: StudentId,
    today: Date,
) -> Result<Vec<AvailableSubject>, RegistrationError>
where
    S: StudentStore + SubjectStore + RegistrationStore + CurriculumStore,
{
    let student = check_eligibility(store, student_id, today).await?;

    let registered: HashSet<SubjectId> = store
        .registrations_for_student(student_id)
        .await?
        .into_iter()
        .map(|r| r.subject_id)
        .collect();

    let entries = store.curriculum_subjects(student.curriculum_id).await?;

    let mut available = Vec::new();
    for entry in entries {
        if registered.contains(&entry.subject_id) {
            continue;
        }
        let Some(subject) = store.subject_by_id(&entry.subject_id).await? else {
            continue;
        };
        let decision = can_register(store, student_id, &subject.id).await?;
        available.push(AvailableSubject {
            subject,
            semester: entry.semester,
            decision,
        });
    }
    Ok(available)
}

async fn require_subject<S>(
    store: &mut S,
    subject_id: &str,
) -> Result<SubjectRecord, RegistrationError>
where
    S: SubjectStore,
{
    store
        .subject_by_id(subject_id)
        .await?
        .ok_or_else(|| RegistrationError::SubjectNotFound(subject_id.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
