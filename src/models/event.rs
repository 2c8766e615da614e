use rusqlite::{params, Connection, OptionalExtension};

/// An event scoped to a project. Dates are stored as "YYYY-MM-DD" text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub event_date: String,
    pub description: String,
    pub in_person: bool,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields accepted by create and update.
#[derive(Debug, Clone)]
pub struct EventInput {
    pub name: String,
    pub event_date: String,
    pub description: String,
    pub in_person: bool,
    pub location: String,
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    let in_person: i64 = row.get("in_person")?;
    Ok(Event {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        name: row.get("name")?,
        event_date: row.get("event_date")?,
        description: row.get("description")?,
        in_person: in_person != 0,
        location: row.get("location")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

const SELECT_EVENT: &str = "SELECT id, project_id, name, event_date, description, \
                                   in_person, location, created_at, updated_at \
                            FROM events";

/// All events belonging to a project, soonest first.
pub fn find_by_project(conn: &Connection, project_id: i64) -> rusqlite::Result<Vec<Event>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_EVENT} WHERE project_id = ?1 ORDER BY event_date, id"
    ))?;
    let events = stmt
        .query_map(params![project_id], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Event>> {
    conn.query_row(
        &format!("{SELECT_EVENT} WHERE id = ?1"),
        params![id],
        row_to_event,
    )
    .optional()
}

/// Persist a new event and return it with its assigned id.
pub fn create(conn: &Connection, project_id: i64, input: &EventInput) -> rusqlite::Result<Event> {
    conn.execute(
        "INSERT INTO events (project_id, name, event_date, description, in_person, location) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            project_id,
            input.name,
            input.event_date,
            input.description,
            input.in_person,
            input.location
        ],
    )?;
    let id = conn.last_insert_rowid();
    find_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Full-field replace, keyed by id alone — the project id a caller supplies
/// gates authorization but never re-parents the record.
/// Returns the updated event, or None if the id does not exist.
pub fn update(conn: &Connection, id: i64, input: &EventInput) -> rusqlite::Result<Option<Event>> {
    let changed = conn.execute(
        "UPDATE events \
         SET name = ?1, event_date = ?2, description = ?3, in_person = ?4, location = ?5, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
         WHERE id = ?6",
        params![
            input.name,
            input.event_date,
            input.description,
            input.in_person,
            input.location,
            id
        ],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    find_by_id(conn, id)
}

/// Remove an event and return the deleted record, or None if the id does not
/// exist. No partial effects: a missing id touches nothing.
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<Option<Event>> {
    let existing = find_by_id(conn, id)?;
    if existing.is_some() {
        conn.execute("DELETE FROM events WHERE id = ?1", params![id])?;
    }
    Ok(existing)
}
