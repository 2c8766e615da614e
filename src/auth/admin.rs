//! Project-scoped authorization.
//!
//! Every event and application operation is gated on the caller being an
//! admin of the parent project. The check runs before any data access and
//! fails closed: an unknown project or a non-member yields `Ok(false)`.

use actix_session::Session;
use rusqlite::{params, Connection};

use crate::auth::session::require_user_id;
use crate::errors::AppError;

/// Whether the user holds an admin membership in the given project.
pub fn is_project_admin(
    conn: &Connection,
    user_id: i64,
    project_id: i64,
) -> Result<bool, AppError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM project_admins WHERE project_id = ?1 AND user_id = ?2",
        params![project_id, user_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Require that the session user is an admin of the given project.
/// Returns the user id on success, `AppError::PermissionDenied` otherwise.
pub fn require_project_admin(
    conn: &Connection,
    session: &Session,
    project_id: i64,
) -> Result<i64, AppError> {
    let user_id = require_user_id(session)?;
    if is_project_admin(conn, user_id, project_id)? {
        Ok(user_id)
    } else {
        Err(AppError::PermissionDenied(format!(
            "not an admin of project {project_id}"
        )))
    }
}
