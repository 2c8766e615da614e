use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection};

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Seed a default admin user and a sample project on first run.
/// Idempotent: does nothing once any user exists.
pub fn seed_defaults(pool: &DbPool, admin_hash: &str) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let user_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .expect("Failed to count users");
    if user_count > 0 {
        return;
    }

    let admin_id = seed_admin(&conn, admin_hash).expect("Failed to seed admin user");

    conn.execute(
        "INSERT INTO projects (name, description) VALUES (?1, ?2)",
        params![
            "Robotics Club",
            "Sample project created on first run. Manage its events and application forms."
        ],
    )
    .expect("Failed to seed sample project");
    let project_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO project_admins (project_id, user_id) VALUES (?1, ?2)",
        params![project_id, admin_id],
    )
    .expect("Failed to seed project admin");

    log::info!("Seeded default admin user and sample project");
}

fn seed_admin(conn: &Connection, admin_hash: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password, email, display_name) \
         VALUES ('admin', ?1, 'admin@example.com', 'Administrator')",
        params![admin_hash],
    )?;
    Ok(conn.last_insert_rowid())
}
