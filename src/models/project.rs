use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Projects the given user administers, for the project list page.
pub fn find_administered(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Project>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.description, p.created_at, p.updated_at \
         FROM projects p \
         JOIN project_admins pa ON pa.project_id = p.id AND pa.user_id = ?1 \
         ORDER BY p.name, p.id",
    )?;
    let projects = stmt
        .query_map(params![user_id], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(projects)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Project>> {
    conn.query_row(
        "SELECT id, name, description, created_at, updated_at FROM projects WHERE id = ?1",
        params![id],
        row_to_project,
    )
    .optional()
}
