//! Authentication and ambient helpers: password hashing, field validation,
//! the user model, dashboard counts, and first-run seeding.

mod common;

use clubdeck::auth::{password, validate};
use clubdeck::db;
use clubdeck::models::{dashboard, event, user};
use common::*;
use tempfile::TempDir;

#[test]
fn password_hash_verifies_and_rejects() {
    let hash = password::hash_password("hunter2").expect("hash");
    assert!(hash.starts_with("$argon2"));
    assert!(password::verify_password("hunter2", &hash));
    assert!(!password::verify_password("hunter3", &hash));
    assert!(!password::verify_password("hunter2", "not-a-hash"));
}

#[test]
fn required_field_validation() {
    assert!(validate::validate_required("hello", "Name", 10).is_none());
    assert!(validate::validate_required("   ", "Name", 10).is_some());
    assert!(validate::validate_required(&"x".repeat(11), "Name", 10).is_some());
}

#[test]
fn optional_field_validation_allows_empty() {
    assert!(validate::validate_optional("", "Location", 10).is_none());
    assert!(validate::validate_optional("room 4", "Location", 10).is_none());
    assert!(validate::validate_optional(&"x".repeat(11), "Location", 10).is_some());
}

#[test]
fn date_validation_requires_iso_dates() {
    assert!(validate::validate_date("2026-09-01", "Date").is_none());
    assert!(validate::validate_date(" 2026-09-01 ", "Date").is_none());
    assert!(validate::validate_date("09/01/2026", "Date").is_some());
    assert!(validate::validate_date("2026-13-01", "Date").is_some());
    assert!(validate::validate_date("", "Date").is_some());
}

#[test]
fn user_lookup_by_username() {
    let db = setup_test_db();
    let hash = password::hash_password("secret").expect("hash");
    let id = user::create(&db.conn, "alice", &hash, "alice@example.com", "Alice")
        .expect("create user");

    let found = user::find_by_username(&db.conn, "alice")
        .expect("lookup")
        .expect("exists");
    assert_eq!(found.id, id);
    assert!(password::verify_password("secret", &found.password));

    assert!(user::find_by_username(&db.conn, "nobody")
        .expect("lookup")
        .is_none());
}

#[test]
fn dashboard_counts_are_scoped_to_administered_projects() {
    let db = setup_test_db();
    let alice = insert_user(&db.conn, "alice");
    let mine = insert_project(&db.conn, "Mine");
    let other = insert_project(&db.conn, "Other");
    make_admin(&db.conn, mine, alice);

    let input = event::EventInput {
        name: "Kickoff".to_string(),
        event_date: "2026-09-01".to_string(),
        description: String::new(),
        in_person: false,
        location: String::new(),
    };
    event::create(&db.conn, mine, &input).expect("create event");
    event::create(&db.conn, other, &input).expect("create event");

    let counts = dashboard::load_counts(&db.conn, alice).expect("counts");
    assert_eq!(counts.project_count, 1);
    assert_eq!(counts.event_count, 1);
    assert_eq!(counts.application_count, 0);
    assert_eq!(counts.published_count, 0);
}

#[test]
fn seeding_runs_once_and_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("seed.db");
    let pool = db::init_pool(path.to_str().expect("utf8 path"));
    db::run_migrations(&pool);

    let hash = password::hash_password("admin123").expect("hash");
    db::seed_defaults(&pool, &hash);
    db::seed_defaults(&pool, &hash);

    let conn = pool.get().expect("conn");
    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .expect("count");
    let projects: i64 = conn
        .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))
        .expect("count");
    assert_eq!(users, 1);
    assert_eq!(projects, 1);

    let admin = user::find_by_username(&conn, "admin")
        .expect("lookup")
        .expect("seeded");
    assert!(password::verify_password("admin123", &admin.password));
}
