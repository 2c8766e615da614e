use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::admin::require_project_admin;
use crate::auth::csrf;
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::{application, project};
use crate::templates_structs::{ApplicationListTemplate, ConfirmDeleteTemplate, PageContext};

#[derive(Deserialize)]
pub struct NewApplicationForm {
    pub csrf_token: String,
    pub name: String,
}

/// GET /projects/{pid}/applications
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let applications = application::find_by_project(&conn, project_id)?;

    let ctx = PageContext::build(&session)?;
    render(ApplicationListTemplate {
        ctx,
        project,
        applications,
    })
}

/// POST /projects/{pid}/applications — create an empty draft, open the editor.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<NewApplicationForm>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let app_id = application::create(&conn, project_id, form.name.trim())?;

    let details = serde_json::json!({
        "name": form.name.trim(),
        "summary": format!("Created application draft '{}'", form.name.trim()),
    });
    let _ = crate::audit::log(&conn, user_id, "application.created", "application", app_id, details);

    Ok(HttpResponse::SeeOther()
        .insert_header((
            "Location",
            format!("/projects/{project_id}/applications/{app_id}/edit"),
        ))
        .finish())
}

/// GET /projects/{pid}/applications/{id}/delete — the confirmation gate.
pub async fn confirm_delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (project_id, app_id) = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let existing = find_in_project(&conn, app_id, project_id)?;

    let ctx = PageContext::build(&session)?;
    let tmpl = ConfirmDeleteTemplate {
        ctx,
        title: "Confirm Delete".to_string(),
        description: format!(
            "Delete application '{}' and all of its questions? This cannot be undone.",
            existing.name
        ),
        form_action: format!("/projects/{project_id}/applications/{app_id}/delete"),
        cancel_href: format!("/projects/{project_id}/applications"),
    };
    render(tmpl)
}

/// POST /projects/{pid}/applications/{id}/delete
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let (project_id, app_id) = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    find_in_project(&conn, app_id, project_id)?;
    let deleted = application::delete(&conn, app_id)?.ok_or(AppError::NotFound)?;

    let details = serde_json::json!({
        "name": deleted.name,
        "summary": format!("Deleted application '{}'", deleted.name),
    });
    let _ = crate::audit::log(&conn, user_id, "application.deleted", "application", app_id, details);

    let _ = session.insert("flash", "Application deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/projects/{project_id}/applications")))
        .finish())
}

/// An application id from another project must behave like a missing id.
pub fn find_in_project(
    conn: &rusqlite::Connection,
    app_id: i64,
    project_id: i64,
) -> Result<application::ApplicationDetail, AppError> {
    let found = application::find_by_id(conn, app_id)?.ok_or(AppError::NotFound)?;
    if found.project_id != project_id {
        return Err(AppError::NotFound);
    }
    Ok(found)
}
