use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::admin::require_project_admin;
use crate::auth::session::require_user_id;
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::models::{application, event, project};
use crate::templates_structs::{PageContext, ProjectDetailTemplate, ProjectListTemplate};

/// GET /projects — the projects the logged-in user administers.
pub async fn list(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = require_user_id(&session)?;
    let conn = pool.get()?;

    let projects = project::find_administered(&conn, user_id)?;
    let ctx = PageContext::build(&session)?;
    render(ProjectListTemplate { ctx, projects })
}

/// GET /projects/{id} — landing page linking to events and applications.
pub async fn detail(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let event_count = event::find_by_project(&conn, project_id)?.len() as i64;
    let application_count = application::find_by_project(&conn, project_id)?.len() as i64;

    let ctx = PageContext::build(&session)?;
    render(ProjectDetailTemplate {
        ctx,
        project,
        event_count,
        application_count,
    })
}
