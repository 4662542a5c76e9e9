//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure the SQLite connection backing the student roster.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write student data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_location};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Where the roster database lives.
///
/// Parsed from a single connection setting: the literal `:memory:` selects a
/// private in-memory database, anything else is treated as a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    InMemory,
    File(PathBuf),
}

impl DatabaseLocation {
    pub const IN_MEMORY: &'static str = ":memory:";

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed == Self::IN_MEMORY {
            Self::InMemory
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    fn mode(&self) -> &'static str {
        match self {
            Self::InMemory => "memory",
            Self::File(_) => "file",
        }
    }
}

impl Display for DatabaseLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InMemory => f.write_str(Self::IN_MEMORY),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DatabaseLocation;
    use std::path::PathBuf;

    #[test]
    fn parse_recognizes_memory_marker() {
        assert_eq!(DatabaseLocation::parse(" :memory: "), DatabaseLocation::InMemory);
    }

    #[test]
    fn parse_treats_everything_else_as_file() {
        assert_eq!(
            DatabaseLocation::parse("data/roster.sqlite3"),
            DatabaseLocation::File(PathBuf::from("data/roster.sqlite3"))
        );
        assert_eq!(
            DatabaseLocation::parse("data/roster.sqlite3").to_string(),
            "data/roster.sqlite3"
        );
    }
}
