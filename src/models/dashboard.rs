use rusqlite::{params, Connection};

/// Headline counts for the dashboard, scoped to the projects the user admins.
#[derive(Debug, Clone, Default)]
pub struct DashboardCounts {
    pub project_count: i64,
    pub event_count: i64,
    pub application_count: i64,
    pub published_count: i64,
}

pub fn load_counts(conn: &Connection, user_id: i64) -> rusqlite::Result<DashboardCounts> {
    let project_count = conn.query_row(
        "SELECT COUNT(*) FROM project_admins WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    let event_count = conn.query_row(
        "SELECT COUNT(*) FROM events e \
         JOIN project_admins pa ON pa.project_id = e.project_id AND pa.user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    let application_count = conn.query_row(
        "SELECT COUNT(*) FROM applications a \
         JOIN project_admins pa ON pa.project_id = a.project_id AND pa.user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    let published_count = conn.query_row(
        "SELECT COUNT(*) FROM applications a \
         JOIN project_admins pa ON pa.project_id = a.project_id AND pa.user_id = ?1 \
         WHERE a.status = 'published'",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(DashboardCounts {
        project_count,
        event_count,
        application_count,
        published_count,
    })
}
