// Template context structures for Askama templates, organized by domain.
// All types are re-exported: `use clubdeck::templates_structs::*`

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_username, take_flash};
use crate::errors::AppError;

mod application;
mod common;
mod event;
mod project;

pub use application::*;
pub use common::*;
pub use event::*;
pub use project::*;

pub const APP_NAME: &str = "Clubdeck";

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.username`, `ctx.flash`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session) -> Result<Self, AppError> {
        let username = get_username(session)
            .map_err(|e| AppError::Session(format!("Failed to get username: {}", e)))?;
        let flash = take_flash(session);
        let csrf_token = csrf::get_or_create_token(session);
        let avatar_initial = username
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string();
        Ok(Self {
            username,
            avatar_initial,
            flash,
            app_name: APP_NAME.to_string(),
            csrf_token,
        })
    }
}
