/// Surrogate keys generated by the database (`BIGSERIAL`).
pub type DbId = i64;

/// Students and curricula are keyed by the institution's numeric ids.
pub type StudentId = i64;
pub type CurriculumId = i64;

/// Subjects are keyed by their course code (e.g. `05506232`).
pub type SubjectId = String;

/// Politicians, promises and promise updates use short text codes
/// (`POL01`, `P003`, `U012`).
pub type PromiseId = String;
pub type PromiseUpdateId = String;

/// Calendar dates without a time component (birth, announcement, update).
pub type Date = chrono::NaiveDate;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
