//! Student use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points used by request handlers.
//! - Parse caller-supplied identifiers before touching storage.
//! - Collapse repository failures into a small closed error taxonomy.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Deletion is idempotent: removing an absent student is not an error.

use crate::model::student::{Student, StudentDraft, StudentId, StudentValidationError};
use crate::repo::student_repo::{DuplicateKey, RepoError, StudentRepository};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, StudentServiceError>;

/// Error taxonomy surfaced to request handlers.
///
/// `Display` always yields the human-readable message shown to users.
#[derive(Debug)]
pub enum StudentServiceError {
    /// Identifier is not a well-formed student id.
    InvalidId { raw: String, reason: String },
    /// Target student does not exist.
    NotFound(StudentId),
    /// Required fields missing or blank.
    Validation(StudentValidationError),
    /// Unique field already taken by another student.
    Conflict(DuplicateKey),
    /// Storage handle could not be reached.
    Unavailable(String),
    /// Any other persistence failure.
    Storage(RepoError),
}

impl StudentServiceError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "invalid_id",
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Unavailable(_) => "unavailable",
            Self::Storage(_) => "storage",
        }
    }
}

impl Display for StudentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId { raw, reason } => write!(f, "invalid student id `{raw}`: {reason}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(conflict) => write!(f, "{conflict}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StudentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StudentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Conflict(conflict) => Self::Conflict(conflict),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Parses a caller-supplied student id.
pub fn parse_student_id(raw: &str) -> ServiceResult<StudentId> {
    Uuid::parse_str(raw).map_err(|err| StudentServiceError::InvalidId {
        raw: raw.to_string(),
        reason: err.to_string(),
    })
}

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all students, most recently created first.
    pub fn list_students(&self) -> ServiceResult<Vec<Student>> {
        let students = self.repo.list_students()?;
        debug!(
            "event=student_list module=service status=ok count={}",
            students.len()
        );
        Ok(students)
    }

    /// Validates and persists a new student.
    pub fn create_student(&self, draft: &StudentDraft) -> ServiceResult<Student> {
        let student = self.repo.create_student(draft)?;
        info!(
            "event=student_create module=service status=ok student_id={}",
            student.id
        );
        Ok(student)
    }

    /// Looks up one student by raw id.
    ///
    /// Returns `Ok(None)` for a well-formed id with no matching record.
    pub fn find_student(&self, raw_id: &str) -> ServiceResult<Option<Student>> {
        let id = parse_student_id(raw_id)?;
        Ok(self.repo.get_student(id)?)
    }

    /// Replaces the business fields of an existing student.
    ///
    /// Validation runs against the new values; `NotFound` is returned when the
    /// id is well-formed but unknown.
    pub fn update_student(&self, raw_id: &str, draft: &StudentDraft) -> ServiceResult<Student> {
        let id = parse_student_id(raw_id)?;
        let student = self.repo.update_student(id, draft)?;
        info!("event=student_update module=service status=ok student_id={id}");
        Ok(student)
    }

    /// Deletes a student if present.
    ///
    /// Returns whether a record was removed; an unknown well-formed id is a
    /// successful no-op.
    pub fn delete_student(&self, raw_id: &str) -> ServiceResult<bool> {
        let id = parse_student_id(raw_id)?;
        let removed = self.repo.delete_student(id)?;
        info!("event=student_delete module=service status=ok student_id={id} removed={removed}");
        Ok(removed)
    }
}
