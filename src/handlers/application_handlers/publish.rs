//! The final step of the publish flow: the confirmation POST.
//!
//! Publishing is only legal from the ConfirmOpen gate state, and the draft
//! is validated again against the submitted (submit-time) state before
//! anything is persisted. Validation failure or a stale gate never leaves
//! partial state behind.

use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::admin::require_project_admin;
use crate::auth::{csrf, validate};
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::models::application::{self, draft, ConfirmationValues};
use crate::models::project;
use crate::templates_structs::{question_rows, ApplicationPublishTemplate, PageContext};

use super::crud::find_in_project;
use super::editor::{load_gate, store_gate};
use super::forms::parse_publish_form;

/// POST /projects/{pid}/applications/{id}/publish
pub async fn publish_submit(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let (project_id, app_id) = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;

    let form = parse_publish_form(&form.into_inner())?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let app = find_in_project(&conn, app_id, project_id)?;

    let gate = load_gate(&session, app_id);
    if !gate.can_publish() {
        return Err(AppError::Invalid(
            "no publish confirmation in progress".to_string(),
        ));
    }

    // Re-validate against submit-time state, never a stale snapshot.
    let mut errors = draft::validate(&form.name, &form.description, &form.questions);
    errors.extend(validate::validate_date(&form.opens_at, "Opens"));
    errors.extend(validate::validate_date(&form.closes_at, "Closes"));
    if errors.is_empty() && form.closes_at < form.opens_at {
        errors.push("Closes must not be before Opens".to_string());
    }

    if !errors.is_empty() {
        let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
        let ctx = PageContext::build(&session)?;
        return render(ApplicationPublishTemplate {
            ctx,
            project,
            application: app,
            name: form.name.clone(),
            description: form.description.clone(),
            question_count: form.questions.len(),
            rows: question_rows(&form.questions),
            opens_at: form.opens_at.clone(),
            closes_at: form.closes_at.clone(),
            errors,
        });
    }

    let confirmation = ConfirmationValues {
        opens_at: form.opens_at.clone(),
        closes_at: form.closes_at.clone(),
    };
    application::publish(
        &conn,
        app_id,
        form.name.trim(),
        form.description.trim(),
        &confirmation,
        &form.questions,
    )?;

    store_gate(&session, app_id, gate.on_cancel());

    let details = serde_json::json!({
        "name": form.name.trim(),
        "opens_at": confirmation.opens_at,
        "closes_at": confirmation.closes_at,
        "question_count": form.questions.len(),
        "summary": format!("Published application '{}'", form.name.trim()),
    });
    let _ = crate::audit::log(&conn, user_id, "application.published", "application", app_id, details);

    let _ = session.insert("flash", "Application published");
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", format!("/projects/{project_id}/applications")))
        .finish())
}
