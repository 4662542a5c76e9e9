//! Core domain logic for the student roster.
//! This crate is the single source of truth for student invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, open_location, DatabaseLocation, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::student::{
    Student, StudentDraft, StudentField, StudentFields, StudentId, StudentValidationError,
};
pub use repo::student_repo::{
    DuplicateKey, RepoError, RepoResult, SqliteStudentRepository, StudentRepository,
};
pub use service::student_service::{
    parse_student_id, ServiceResult, StudentService, StudentServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
