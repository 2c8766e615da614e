use actix_session::Session;

use crate::errors::AppError;

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Result<String, String> {
    match session.get::<String>("username") {
        Ok(Some(username)) => Ok(username),
        Ok(None) => Err("No username in session".to_string()),
        Err(e) => Err(format!("Session error: {}", e)),
    }
}

/// Get the logged-in user id, or fail the request with a session error.
pub fn require_user_id(session: &Session) -> Result<i64, AppError> {
    get_user_id(session).ok_or_else(|| AppError::Session("Not logged in".to_string()))
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}
