//! In-memory store used by the rule tests.

use std::collections::BTreeMap;

use crate::grading::Grade;
use crate::promise_update::PromiseStatus;
use crate::store::{
    CurriculumEntry, CurriculumStore, PromiseRecord, PromiseStore, PromiseUpdateRecord,
    PromiseUpdateStore, RegistrationRecord, RegistrationStore, StoreError, StudentRecord,
    StudentStore, SubjectRecord, SubjectStore,
};
use crate::types::{CurriculumId, Date, StudentId, SubjectId};

pub fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    students: BTreeMap<StudentId, StudentRecord>,
    subjects: BTreeMap<SubjectId, SubjectRecord>,
    registrations: BTreeMap<(StudentId, SubjectId), RegistrationRecord>,
    curricula: Vec<(CurriculumId, CurriculumEntry)>,
    promises: BTreeMap<String, PromiseRecord>,
    updates: Vec<PromiseUpdateRecord>,
    fail_next_insert: bool,
}

impl MemoryStore {
    pub fn add_student(&mut self, id: StudentId, birth_date: Date, curriculum_id: CurriculumId) {
        self.students.insert(
            id,
            StudentRecord {
                id,
                birth_date,
                curriculum_id,
            },
        );
    }

    pub fn add_subject(&mut self, id: &str, prerequisite_id: Option<&str>) {
        self.subjects.insert(
            id.to_string(),
            SubjectRecord {
                id: id.to_string(),
                name: format!("Subject {id}"),
                credits: 3,
                instructor: None,
                prerequisite_id: prerequisite_id.map(str::to_string),
            },
        );
    }

    pub fn add_curriculum_subject(&mut self, curriculum_id: CurriculumId, subject_id: &str, semester: i16) {
        self.curricula.push((
            curriculum_id,
            CurriculumEntry {
                subject_id: subject_id.to_string(),
                semester,
            },
        ));
    }

    pub fn add_registration(&mut self, student_id: StudentId, subject_id: &str, grade: Option<Grade>) {
        self.registrations.insert(
            (student_id, subject_id.to_string()),
            RegistrationRecord {
                student_id,
                subject_id: subject_id.to_string(),
                grade,
            },
        );
    }

    pub fn add_promise(&mut self, id: &str, announcement_date: Date, status: PromiseStatus) {
        self.promises.insert(
            id.to_string(),
            PromiseRecord {
                id: id.to_string(),
                announcement_date,
                status,
            },
        );
    }

    pub fn add_update(&mut self, id: &str, promise_id: &str, update_date: Date, detail: &str) {
        self.updates.push(PromiseUpdateRecord {
            id: id.to_string(),
            promise_id: promise_id.to_string(),
            update_date,
            detail: detail.to_string(),
        });
    }

    /// Make the next insert fail as if a concurrent writer got there first.
    pub fn fail_next_insert_as_duplicate(&mut self) {
        self.fail_next_insert = true;
    }

    pub fn updates(&self) -> &[PromiseUpdateRecord] {
        &self.updates
    }

    pub fn promise_status(&self, id: &str) -> Option<PromiseStatus> {
        self.promises.get(id).map(|p| p.status)
    }

    fn take_forced_duplicate(&mut self, key: &str) -> Result<(), StoreError> {
        if std::mem::take(&mut self.fail_next_insert) {
            return Err(StoreError::DuplicateKey(key.to_string()));
        }
        Ok(())
    }
}

impl StudentStore for MemoryStore {
    async fn student_by_id(&mut self, id: StudentId) -> Result<Option<StudentRecord>, StoreError> {
        Ok(self.students.get(&id).cloned())
    }
}

impl SubjectStore for MemoryStore {
    async fn subject_by_id(&mut self, id: &str) -> Result<Option<SubjectRecord>, StoreError> {
        Ok(self.subjects.get(id).cloned())
    }
}

impl RegistrationStore for MemoryStore {
    async fn registration(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
    ) -> Result<Option<RegistrationRecord>, StoreError> {
        Ok(self
            .registrations
            .get(&(student_id, subject_id.to_string()))
            .cloned())
    }

    async fn insert_registration(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
    ) -> Result<RegistrationRecord, StoreError> {
        self.take_forced_duplicate("uq_registered_subjects_student_subject")?;
        let key = (student_id, subject_id.to_string());
        if self.registrations.contains_key(&key) {
            return Err(StoreError::DuplicateKey(
                "uq_registered_subjects_student_subject".to_string(),
            ));
        }
        let record = RegistrationRecord {
            student_id,
            subject_id: subject_id.to_string(),
            grade: None,
        };
        self.registrations.insert(key, record.clone());
        Ok(record)
    }

    async fn update_grade(
        &mut self,
        student_id: StudentId,
        subject_id: &str,
        grade: Option<Grade>,
    ) -> Result<Option<RegistrationRecord>, StoreError> {
        Ok(self
            .registrations
            .get_mut(&(student_id, subject_id.to_string()))
            .map(|r| {
                r.grade = grade;
                r.clone()
            }))
    }

    async fn registrations_for_student(
        &mut self,
        student_id: StudentId,
    ) -> Result<Vec<RegistrationRecord>, StoreError> {
        Ok(self
            .registrations
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn registrations_for_subject(
        &mut self,
        subject_id: &str,
    ) -> Result<Vec<RegistrationRecord>, StoreError> {
        Ok(self
            .registrations
            .values()
            .filter(|r| r.subject_id == subject_id)
            .cloned()
            .collect())
    }
}

impl CurriculumStore for MemoryStore {
    async fn curriculum_subjects(
        &mut self,
        curriculum_id: CurriculumId,
    ) -> Result<Vec<CurriculumEntry>, StoreError> {
        let mut entries: Vec<CurriculumEntry> = self
            .curricula
            .iter()
            .filter(|(id, _)| *id == curriculum_id)
            .map(|(_, entry)| entry.clone())
            .collect();
        entries.sort_by(|a, b| (a.semester, &a.subject_id).cmp(&(b.semester, &b.subject_id)));
        Ok(entries)
    }
}

impl PromiseStore for MemoryStore {
    async fn promise_by_id(&mut self, id: &str) -> Result<Option<PromiseRecord>, StoreError> {
        Ok(self.promises.get(id).cloned())
    }

    async fn update_status(&mut self, id: &str, status: PromiseStatus) -> Result<bool, StoreError> {
        Ok(self
            .promises
            .get_mut(id)
            .map(|p| p.status = status)
            .is_some())
    }
}

impl PromiseUpdateStore for MemoryStore {
    async fn updates_for_promise(
        &mut self,
        promise_id: &str,
    ) -> Result<Vec<PromiseUpdateRecord>, StoreError> {
        let mut updates: Vec<PromiseUpdateRecord> = self
            .updates
            .iter()
            .filter(|u| u.promise_id == promise_id)
            .cloned()
            .collect();
        updates.sort_by(|a, b| b.update_date.cmp(&a.update_date));
        Ok(updates)
    }

    async fn latest_update_id(&mut self) -> Result<Option<String>, StoreError> {
        Ok(self
            .updates
            .iter()
            .map(|u| u.id.clone())
            .max_by(|a, b| (a.len(), a).cmp(&(b.len(), b))))
    }

    async fn insert_update(
        &mut self,
        update: &PromiseUpdateRecord,
    ) -> Result<PromiseUpdateRecord, StoreError> {
        self.take_forced_duplicate(&update.id)?;
        if self.updates.iter().any(|u| u.id == update.id) {
            return Err(StoreError::DuplicateKey(update.id.clone()));
        }
        self.updates.push(update.clone());
        Ok(update.clone())
    }
}
