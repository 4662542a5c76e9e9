use roster_core::DatabaseLocation;
use roster_web::{connect, ServerConfig, ServerError};
use std::path::PathBuf;
use std::process::Command;

fn unreachable_database(root: &tempfile::TempDir) -> PathBuf {
    root.path().join("missing").join("nested").join("roster.sqlite3")
}

#[test]
fn connect_reports_unopenable_database() {
    let root = tempfile::tempdir().unwrap();
    let path = unreachable_database(&root);
    let config = ServerConfig {
        database: DatabaseLocation::parse(path.to_str().unwrap()),
        ..ServerConfig::default()
    };

    match connect(&config) {
        Err(err @ ServerError::Database(_)) => {
            assert!(
                err.to_string().contains("unable to open database file"),
                "{err}"
            );
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("database under a missing directory must not open"),
    }
    assert!(!path.exists());
}

#[test]
fn binary_exits_with_failure_when_storage_is_unavailable() {
    let root = tempfile::tempdir().unwrap();
    let path = unreachable_database(&root);

    let output = Command::new(env!("CARGO_BIN_EXE_roster"))
        .env("ROSTER_DATABASE", &path)
        .env("ROSTER_BIND_ADDR", "127.0.0.1:0")
        .env("ROSTER_LOG_LEVEL", "error")
        .env_remove("ROSTER_LOG_DIR")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr
            .lines()
            .any(|line| line.starts_with("Error: ")
                && line.contains("unable to open database file")),
        "stderr: {stderr}"
    );
}
