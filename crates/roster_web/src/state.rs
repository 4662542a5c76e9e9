//! Shared application state handed to every handler.
//!
//! The storage connection is opened once at startup and owned here; handlers
//! never reach for a global. SQLite calls are blocking, so each service call
//! runs on tokio's blocking pool and the handler awaits its completion.

use crate::views::Views;
use roster_core::{SqliteStudentRepository, StudentService, StudentServiceError};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Storage handle plus view renderer.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    views: Arc<Views>,
}

impl AppState {
    /// Wraps a migrated connection (see `roster_core::db::open_location`).
    pub fn new(conn: Connection, views: Views) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            views: Arc::new(views),
        }
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Runs `op` against the student service on a blocking worker.
    ///
    /// A poisoned connection lock or a failed worker is reported as
    /// `StudentServiceError::Unavailable`.
    pub async fn with_students<T, F>(&self, op: F) -> Result<T, StudentServiceError>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(
                &StudentService<SqliteStudentRepository<'c>>,
            ) -> Result<T, StudentServiceError>
            + Send
            + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db.lock().map_err(|_| {
                StudentServiceError::Unavailable("storage connection lock poisoned".to_string())
            })?;
            let service = StudentService::new(SqliteStudentRepository::try_new(&conn)?);
            op(&service)
        })
        .await
        .map_err(|err| StudentServiceError::Unavailable(format!("storage worker failed: {err}")))?
    }
}
