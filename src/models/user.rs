use rusqlite::{params, Connection, OptionalExtension};

/// Internal user struct for authentication — includes the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub display_name: String,
}

pub fn find_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, username, password, email, display_name FROM users WHERE username = ?1",
        params![username],
        |row| {
            Ok(User {
                id: row.get("id")?,
                username: row.get("username")?,
                password: row.get("password")?,
                email: row.get("email")?,
                display_name: row.get("display_name")?,
            })
        },
    )
    .optional()
}

pub fn create(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    email: &str,
    display_name: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password, email, display_name) VALUES (?1, ?2, ?3, ?4)",
        params![username, password_hash, email, display_name],
    )?;
    Ok(conn.last_insert_rowid())
}
