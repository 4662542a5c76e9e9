//! Student repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `students` table.
//! - Translate unique index violations into typed duplicate-key conflicts.
//!
//! # Invariants
//! - Write paths validate and normalize before any SQL mutation.
//! - Uniqueness is enforced by storage indexes, never by a pre-check.
//! - Listing order is `created_at DESC, seq DESC` (newest first).

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::student::{
    Student, StudentDraft, StudentField, StudentFields, StudentId, StudentValidationError,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    roll_number,
    email,
    course,
    created_at,
    updated_at
FROM students";

/// Current time as Unix epoch milliseconds, evaluated by SQLite.
const NOW_MS_SQL: &str = "CAST(ROUND((julianday('now') - 2440587.5) * 86400000.0) AS INTEGER)";

pub type RepoResult<T> = Result<T, RepoError>;

/// A write collided with an existing record on a unique field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub field: StudentField,
    pub value: String,
}

impl Display for DuplicateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "duplicate key error: {} \"{}\" already exists",
            self.field.wire_name(),
            self.value
        )
    }
}

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Conflict(DuplicateKey),
    Db(DbError),
    NotFound(StudentId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(conflict) => write!(f, "{conflict}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    /// Validates `draft` and inserts a new student with a fresh id.
    fn create_student(&self, draft: &StudentDraft) -> RepoResult<Student>;
    /// Validates `draft` and replaces the four business fields of `id`.
    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<Student>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// Lists every student, most recently created first.
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    /// Removes `id`; returns whether a row was actually deleted.
    fn delete_student(&self, id: StudentId) -> RepoResult<bool>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// Returns `RepoError::UninitializedConnection` when the connection was not
    /// opened through `db::open_db*` (schema version mismatch).
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    fn require_student(&self, id: StudentId) -> RepoResult<Student> {
        self.get_student(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Maps a failed write to a conflict when a unique index rejected it.
    fn classify_write_error(
        &self,
        err: rusqlite::Error,
        fields: &StudentFields,
        exclude: Option<StudentId>,
    ) -> RepoError {
        if !is_unique_violation(&err) {
            return err.into();
        }
        match find_conflict(self.conn, fields, exclude) {
            Ok(Some(conflict)) => RepoError::Conflict(conflict),
            Ok(None) => err.into(),
            Err(lookup_err) => lookup_err,
        }
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn create_student(&self, draft: &StudentDraft) -> RepoResult<Student> {
        let fields = draft.validate()?;
        let id = Uuid::new_v4();

        self.conn
            .execute(
                &format!(
                    "INSERT INTO students (
                        id,
                        name,
                        roll_number,
                        email,
                        course,
                        created_at,
                        updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, {NOW_MS_SQL}, {NOW_MS_SQL});"
                ),
                params![
                    id.to_string(),
                    fields.name,
                    fields.roll_number,
                    fields.email,
                    fields.course,
                ],
            )
            .map_err(|err| self.classify_write_error(err, &fields, None))?;

        self.require_student(id)
    }

    fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<Student> {
        let fields = draft.validate()?;

        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE students
                     SET
                        name = ?2,
                        roll_number = ?3,
                        email = ?4,
                        course = ?5,
                        updated_at = {NOW_MS_SQL}
                     WHERE id = ?1;"
                ),
                params![
                    id.to_string(),
                    fields.name,
                    fields.roll_number,
                    fields.email,
                    fields.course,
                ],
            )
            .map_err(|err| self.classify_write_error(err, &fields, Some(id)))?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.require_student(id)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STUDENT_SELECT_SQL} ORDER BY created_at DESC, seq DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Finds which unique field of `fields` is already owned by another row.
fn find_conflict(
    conn: &Connection,
    fields: &StudentFields,
    exclude: Option<StudentId>,
) -> RepoResult<Option<DuplicateKey>> {
    let excluded = exclude.map(|id| id.to_string()).unwrap_or_default();

    for (field, column) in [
        (StudentField::RollNumber, "roll_number"),
        (StudentField::Email, "email"),
    ] {
        let value = fields.get(field);
        let taken = conn
            .query_row(
                &format!("SELECT 1 FROM students WHERE {column} = ?1 AND id <> ?2 LIMIT 1;"),
                params![value, excluded],
                |_| Ok(()),
            )
            .optional()?;

        if taken.is_some() {
            return Ok(Some(DuplicateKey {
                field,
                value: value.to_string(),
            }));
        }
    }

    Ok(None)
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in students.id"))
    })?;

    Ok(Student {
        id,
        name: row.get("name")?,
        roll_number: row.get("roll_number")?,
        email: row.get("email")?,
        course: row.get("course")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
