use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::require_user_id;
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::models::dashboard;
use crate::templates_structs::{DashboardTemplate, PageContext};

pub async fn index(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = require_user_id(&session)?;
    let conn = pool.get()?;

    let counts = dashboard::load_counts(&conn, user_id)?;
    let ctx = PageContext::build(&session)?;
    render(DashboardTemplate { ctx, counts })
}
