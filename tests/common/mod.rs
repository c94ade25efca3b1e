use std::sync::Arc;

use tempfile::TempDir;
use tenderwatch::db::{self, DbPool};

/// Creates a throwaway database in a temp dir with migrations applied.
/// The TempDir must stay alive for the duration of the test.
pub fn setup_pool() -> (TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir
        .path()
        .join("app.db")
        .to_str()
        .expect("Temp path is not valid UTF-8")
        .to_string();

    db::init(&db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    (dir, pool)
}
