//! Event CRUD, scoped to a project and gated on project admin membership.
//!
//! Every handler runs `require_project_admin` before touching event data.
//! Deletion goes through the generic confirmation gate: GET renders the
//! yes/no page, only the POST (with CSRF token) removes the record.

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::admin::require_project_admin;
use crate::auth::{csrf, validate};
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::{event, project};
use crate::templates_structs::{
    ConfirmDeleteTemplate, EventFormTemplate, EventListTemplate, PageContext,
};

#[derive(Deserialize)]
pub struct EventForm {
    pub csrf_token: String,
    pub name: String,
    pub event_date: String,
    pub description: String,
    pub in_person: Option<String>, // checkbox: present means true
    pub location: String,
}

impl EventForm {
    fn to_input(&self) -> event::EventInput {
        event::EventInput {
            name: self.name.trim().to_string(),
            event_date: self.event_date.trim().to_string(),
            description: self.description.trim().to_string(),
            in_person: self.in_person.is_some(),
            location: self.location.trim().to_string(),
        }
    }

    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate::validate_required(&self.name, "Name", 200));
        errors.extend(validate::validate_date(&self.event_date, "Date"));
        errors.extend(validate::validate_optional(&self.description, "Description", 2000));
        errors.extend(validate::validate_optional(&self.location, "Location", 200));
        errors
    }

    /// Re-render the form with the submitted values so nothing is lost.
    fn refill(
        &self,
        ctx: PageContext,
        project: project::Project,
        form_action: String,
        form_title: String,
        errors: Vec<String>,
    ) -> EventFormTemplate {
        EventFormTemplate {
            ctx,
            project,
            form_action,
            form_title,
            name_value: self.name.clone(),
            date_value: self.event_date.clone(),
            description_value: self.description.clone(),
            in_person: self.in_person.is_some(),
            location_value: self.location.clone(),
            errors,
        }
    }
}

/// GET /projects/{pid}/events
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let events = event::find_by_project(&conn, project_id)?;

    let ctx = PageContext::build(&session)?;
    render(EventListTemplate { ctx, project, events })
}

/// GET /projects/{pid}/events/new
pub async fn new_form(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let ctx = PageContext::build(&session)?;
    let tmpl = EventFormTemplate::blank(
        ctx,
        project,
        format!("/projects/{project_id}/events"),
        "New Event".to_string(),
        vec![],
    );
    render(tmpl)
}

/// POST /projects/{pid}/events
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = form.validate();
    if !errors.is_empty() {
        let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
        let ctx = PageContext::build(&session)?;
        return render(form.refill(
            ctx,
            project,
            format!("/projects/{project_id}/events"),
            "New Event".to_string(),
            errors,
        ));
    }

    let created = event::create(&conn, project_id, &form.to_input())?;

    let details = serde_json::json!({
        "name": created.name,
        "event_date": created.event_date,
        "summary": format!("Created event '{}'", created.name),
    });
    let _ = crate::audit::log(&conn, user_id, "event.created", "event", created.id, details);

    let _ = session.insert("flash", "Event created successfully");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/projects/{project_id}/events")))
        .finish())
}

/// GET /projects/{pid}/events/{id}/edit
pub async fn edit_form(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (project_id, event_id) = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let existing = find_in_project(&conn, event_id, project_id)?;

    let ctx = PageContext::build(&session)?;
    let tmpl = EventFormTemplate::from_event(
        ctx,
        project,
        format!("/projects/{project_id}/events/{event_id}"),
        "Edit Event".to_string(),
        &existing,
        vec![],
    );
    render(tmpl)
}

/// POST /projects/{pid}/events/{id}
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<EventForm>,
) -> Result<HttpResponse, AppError> {
    let (project_id, event_id) = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Resolve before mutating so a cross-project id is a clean 404.
    find_in_project(&conn, event_id, project_id)?;

    let errors = form.validate();
    if !errors.is_empty() {
        let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
        let ctx = PageContext::build(&session)?;
        return render(form.refill(
            ctx,
            project,
            format!("/projects/{project_id}/events/{event_id}"),
            "Edit Event".to_string(),
            errors,
        ));
    }

    let updated = event::update(&conn, event_id, &form.to_input())?.ok_or(AppError::NotFound)?;

    let details = serde_json::json!({
        "name": updated.name,
        "event_date": updated.event_date,
        "summary": format!("Updated event '{}'", updated.name),
    });
    let _ = crate::audit::log(&conn, user_id, "event.updated", "event", event_id, details);

    let _ = session.insert("flash", "Event updated successfully");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/projects/{project_id}/events")))
        .finish())
}

/// GET /projects/{pid}/events/{id}/delete — the confirmation gate.
pub async fn confirm_delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (project_id, event_id) = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let existing = find_in_project(&conn, event_id, project_id)?;

    let ctx = PageContext::build(&session)?;
    let tmpl = ConfirmDeleteTemplate {
        ctx,
        title: "Confirm Delete".to_string(),
        description: format!(
            "Delete event '{}' on {}? This cannot be undone.",
            existing.name, existing.event_date
        ),
        form_action: format!("/projects/{project_id}/events/{event_id}/delete"),
        cancel_href: format!("/projects/{project_id}/events"),
    };
    render(tmpl)
}

/// POST /projects/{pid}/events/{id}/delete
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let (project_id, event_id) = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    find_in_project(&conn, event_id, project_id)?;
    let deleted = event::delete(&conn, event_id)?.ok_or(AppError::NotFound)?;

    let details = serde_json::json!({
        "name": deleted.name,
        "summary": format!("Deleted event '{}'", deleted.name),
    });
    let _ = crate::audit::log(&conn, user_id, "event.deleted", "event", event_id, details);

    let _ = session.insert("flash", "Event deleted");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/projects/{project_id}/events")))
        .finish())
}

/// An event id from another project must behave exactly like a missing id.
fn find_in_project(
    conn: &rusqlite::Connection,
    event_id: i64,
    project_id: i64,
) -> Result<event::Event, AppError> {
    let found = event::find_by_id(conn, event_id)?.ok_or(AppError::NotFound)?;
    if found.project_id != project_id {
        return Err(AppError::NotFound);
    }
    Ok(found)
}
