//! Shared fixtures for the integration tests.
//!
//! Every test gets its own SQLite file inside a fresh temp directory, with
//! the full schema applied, so tests can run in parallel without touching
//! each other's data.

#![allow(dead_code)]

use rusqlite::{params, Connection};
use tempfile::TempDir;

use clubdeck::db::MIGRATIONS;

pub struct TestDb {
    pub conn: Connection,
    // Held so the directory outlives the connection.
    _dir: TempDir,
}

pub fn setup_test_db() -> TestDb {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.db");
    let conn = Connection::open(&path).expect("open test db");
    conn.execute_batch("PRAGMA foreign_keys=ON;")
        .expect("enable foreign keys");
    conn.execute_batch(MIGRATIONS).expect("run migrations");
    TestDb { conn, _dir: dir }
}

pub fn insert_user(conn: &Connection, username: &str) -> i64 {
    conn.execute(
        "INSERT INTO users (username, password, email, display_name) \
         VALUES (?1, 'x', ?2, ?1)",
        params![username, format!("{username}@example.com")],
    )
    .expect("insert user");
    conn.last_insert_rowid()
}

pub fn insert_project(conn: &Connection, name: &str) -> i64 {
    conn.execute(
        "INSERT INTO projects (name, description) VALUES (?1, 'test project')",
        params![name],
    )
    .expect("insert project");
    conn.last_insert_rowid()
}

pub fn make_admin(conn: &Connection, project_id: i64, user_id: i64) {
    conn.execute(
        "INSERT INTO project_admins (project_id, user_id) VALUES (?1, ?2)",
        params![project_id, user_id],
    )
    .expect("insert project admin");
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .expect("count rows")
}
