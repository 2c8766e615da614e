use rusqlite::{params, Connection, OptionalExtension};

use super::draft::{self, QuestionDraft, QuestionType};
use super::types::{ApplicationDetail, ApplicationListItem, ConfirmationValues};

/// Create an empty draft application for a project. Returns the new id.
pub fn create(conn: &Connection, project_id: i64, name: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO applications (project_id, name) VALUES (?1, ?2)",
        params![project_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_by_project(
    conn: &Connection,
    project_id: i64,
) -> rusqlite::Result<Vec<ApplicationListItem>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, a.description, a.status, a.updated_at, \
                (SELECT COUNT(*) FROM application_questions q WHERE q.application_id = a.id) \
                    AS question_count \
         FROM applications a \
         WHERE a.project_id = ?1 \
         ORDER BY a.updated_at DESC, a.id DESC",
    )?;
    let items = stmt
        .query_map(params![project_id], |row| {
            Ok(ApplicationListItem {
                id: row.get("id")?,
                name: row.get("name")?,
                description: row.get("description")?,
                status: row.get("status")?,
                question_count: row.get("question_count")?,
                updated_at: row.get("updated_at")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<ApplicationDetail>> {
    conn.query_row(
        "SELECT id, project_id, name, description, status, opens_at, closes_at, \
                created_at, updated_at \
         FROM applications WHERE id = ?1",
        params![id],
        |row| {
            Ok(ApplicationDetail {
                id: row.get("id")?,
                project_id: row.get("project_id")?,
                name: row.get("name")?,
                description: row.get("description")?,
                status: row.get("status")?,
                opens_at: row.get("opens_at")?,
                closes_at: row.get("closes_at")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")?,
            })
        },
    )
    .optional()
}

/// Load the persisted question list as a draft, ordered by stored position.
pub fn load_questions(conn: &Connection, application_id: i64) -> rusqlite::Result<Vec<QuestionDraft>> {
    let mut stmt = conn.prepare(
        "SELECT id, question, question_type, required, order_number, created_at, updated_at \
         FROM application_questions \
         WHERE application_id = ?1 \
         ORDER BY order_number, id",
    )?;
    let mut questions = stmt
        .query_map(params![application_id], |row| {
            let type_str: String = row.get("question_type")?;
            let required: i64 = row.get("required")?;
            Ok(QuestionDraft {
                id: Some(row.get("id")?),
                question: row.get("question")?,
                question_type: QuestionType::parse(&type_str),
                required: Some(required != 0),
                order_number: row.get("order_number")?,
                answer_choices: Vec::new(),
                created_at: Some(row.get("created_at")?),
                updated_at: Some(row.get("updated_at")?),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut choice_stmt = conn.prepare(
        "SELECT answer FROM question_answer_choices \
         WHERE question_id = ?1 ORDER BY order_number, id",
    )?;
    for q in &mut questions {
        if let Some(qid) = q.id {
            q.answer_choices = choice_stmt
                .query_map(params![qid], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
        }
    }
    Ok(questions)
}

/// Persist the draft: replace the application's top-level fields and its
/// whole question list in one transaction. Order numbers are recomputed from
/// list position; question `created_at` carries through when present.
pub fn save_draft(
    conn: &Connection,
    application_id: i64,
    name: &str,
    description: &str,
    questions: &[QuestionDraft],
) -> rusqlite::Result<()> {
    let mut questions = questions.to_vec();
    draft::renumber(&mut questions);

    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "UPDATE applications \
         SET name = ?1, description = ?2, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
         WHERE id = ?3",
        params![name, description, application_id],
    )?;

    tx.execute(
        "DELETE FROM application_questions WHERE application_id = ?1",
        params![application_id],
    )?;

    for q in &questions {
        // Validation runs before save, so type and required are always set here.
        let type_str = q.question_type.map(|t| t.as_str()).unwrap_or("SHORT_ANSWER");
        let required = q.required.unwrap_or(false);
        tx.execute(
            "INSERT INTO application_questions \
                 (application_id, question, question_type, required, order_number, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, \
                     COALESCE(?6, strftime('%Y-%m-%dT%H:%M:%S','now')))",
            params![
                application_id,
                q.question,
                type_str,
                required,
                q.order_number,
                q.created_at
            ],
        )?;
        let question_id = tx.last_insert_rowid();
        for (i, choice) in q.answer_choices.iter().enumerate() {
            tx.execute(
                "INSERT INTO question_answer_choices (question_id, answer, order_number) \
                 VALUES (?1, ?2, ?3)",
                params![question_id, choice, i as i64],
            )?;
        }
    }

    tx.commit()
}

/// Publish: persist the draft, store the confirmation window, flip status.
pub fn publish(
    conn: &Connection,
    application_id: i64,
    name: &str,
    description: &str,
    confirmation: &ConfirmationValues,
    questions: &[QuestionDraft],
) -> rusqlite::Result<()> {
    save_draft(conn, application_id, name, description, questions)?;
    conn.execute(
        "UPDATE applications \
         SET status = 'published', opens_at = ?1, closes_at = ?2, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') \
         WHERE id = ?3",
        params![confirmation.opens_at, confirmation.closes_at, application_id],
    )?;
    Ok(())
}

/// Delete an application and (via cascade) its questions and choices.
/// Returns the deleted record, or None if the id does not exist.
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<Option<ApplicationDetail>> {
    let existing = find_by_id(conn, id)?;
    if existing.is_some() {
        conn.execute("DELETE FROM applications WHERE id = ?1", params![id])?;
    }
    Ok(existing)
}
