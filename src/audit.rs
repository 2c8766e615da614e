//! Audit trail: one row per mutating action, with a JSON details blob.
//!
//! Handlers call [`log`] after a successful mutation and ignore the result;
//! an audit failure must never fail the request that caused it.

use rusqlite::{params, Connection};
use serde_json::Value;

pub fn log(
    conn: &Connection,
    user_id: i64,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO audit_log (user_id, action, target_type, target_id, details) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, action, target_type, target_id, details.to_string()],
    )?;
    Ok(())
}
