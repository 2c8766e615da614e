//! The application editor: one page holding the whole draft, one POST
//! endpoint dispatching the requested operation against it.
//!
//! The draft in the submitted form is the single source of truth; structural
//! operations (add, delete, move) apply a pure list operation and re-render
//! without persisting. Save and publish run the validator against the
//! submitted state and refuse to persist an invalid draft.

use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::admin::require_project_admin;
use crate::auth::csrf;
use crate::db::DbPool;
use crate::errors::{render, AppError};
use crate::models::application::{self, draft};
use crate::models::application::draft::{PublishGate, QuestionDraft};
use crate::models::project;
use crate::templates_structs::{
    preview_questions, question_rows, type_options, ApplicationEditorTemplate,
    ApplicationPreviewTemplate, ApplicationPublishTemplate, PageContext,
};

use super::crud::find_in_project;
use super::forms::{parse_editor_form, EditorOp};

pub fn gate_key(app_id: i64) -> String {
    format!("publish_gate_{app_id}")
}

pub fn load_gate(session: &Session, app_id: i64) -> PublishGate {
    session
        .get::<String>(&gate_key(app_id))
        .unwrap_or(None)
        .map(|s| PublishGate::parse(&s))
        .unwrap_or_default()
}

pub fn store_gate(session: &Session, app_id: i64, gate: PublishGate) {
    let _ = session.insert(gate_key(app_id), gate.as_str());
}

/// GET /projects/{pid}/applications/{id}/edit
pub async fn edit_form(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (project_id, app_id) = path.into_inner();
    let conn = pool.get()?;
    require_project_admin(&conn, &session, project_id)?;

    let app = find_in_project(&conn, app_id, project_id)?;
    let questions = application::load_questions(&conn, app_id)?;

    // Opening the editor abandons any publish flow in progress.
    store_gate(&session, app_id, load_gate(&session, app_id).on_cancel());

    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let (name, description) = (app.name.clone(), app.description.clone());
    render_editor(&session, project, app, &name, &description, &questions, vec![])
}

/// POST /projects/{pid}/applications/{id}/edit
pub async fn edit_submit(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let (project_id, app_id) = path.into_inner();
    let conn = pool.get()?;
    let user_id = require_project_admin(&conn, &session, project_id)?;

    let form = parse_editor_form(&form.into_inner())?;
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let app = find_in_project(&conn, app_id, project_id)?;
    let project = project::find_by_id(&conn, project_id)?.ok_or(AppError::NotFound)?;
    let gate = load_gate(&session, app_id);

    match form.op {
        EditorOp::AddQuestion => {
            let next = draft::add_question(&form.questions);
            store_gate(&session, app_id, gate.on_cancel());
            render_editor(&session, project, app, &form.name, &form.description, &next, vec![])
        }
        EditorOp::DeleteQuestion(index) => {
            let next = draft::delete_question(&form.questions, index)
                .map_err(|e| AppError::Invalid(e.to_string()))?;
            store_gate(&session, app_id, gate.on_cancel());
            render_editor(&session, project, app, &form.name, &form.description, &next, vec![])
        }
        EditorOp::Move { src, dst } => {
            let next = draft::move_question(&form.questions, src, dst)
                .map_err(|e| AppError::Invalid(e.to_string()))?;
            store_gate(&session, app_id, gate.on_cancel());
            render_editor(&session, project, app, &form.name, &form.description, &next, vec![])
        }
        EditorOp::Resume => {
            store_gate(&session, app_id, gate.on_cancel());
            render_editor(&session, project, app, &form.name, &form.description, &form.questions, vec![])
        }
        EditorOp::Save => {
            let errors = draft::validate(&form.name, &form.description, &form.questions);
            if !errors.is_empty() {
                return render_editor(
                    &session, project, app, &form.name, &form.description, &form.questions, errors,
                );
            }

            application::save_draft(&conn, app_id, form.name.trim(), form.description.trim(), &form.questions)?;

            let details = serde_json::json!({
                "name": form.name.trim(),
                "question_count": form.questions.len(),
                "summary": format!("Saved application '{}'", form.name.trim()),
            });
            let _ = crate::audit::log(&conn, user_id, "application.saved", "application", app_id, details);

            let _ = session.insert("flash", "Application saved");
            Ok(HttpResponse::SeeOther()
                .insert_header((
                    "Location",
                    format!("/projects/{project_id}/applications/{app_id}/edit"),
                ))
                .finish())
        }
        EditorOp::Preview => {
            // Preview never validates; it shows the draft as respondents
            // would see it.
            store_gate(&session, app_id, gate.on_preview());
            let ctx = PageContext::build(&session)?;
            render(ApplicationPreviewTemplate {
                ctx,
                project,
                application: app,
                name: form.name.clone(),
                description: form.description.clone(),
                preview: preview_questions(&form.questions),
                rows: question_rows(&form.questions),
            })
        }
        EditorOp::Publish => {
            let errors = draft::validate(&form.name, &form.description, &form.questions);
            let next_gate = gate.on_publish_request(errors.is_empty());
            store_gate(&session, app_id, next_gate);

            if !errors.is_empty() {
                // ErrorShown: the editor re-renders with the blocking error
                // dialog; dismissing it is the return to Idle.
                let mut shown = vec!["Please make sure that all fields are filled out!".to_string()];
                shown.extend(errors);
                return render_editor(
                    &session, project, app, &form.name, &form.description, &form.questions, shown,
                );
            }

            let ctx = PageContext::build(&session)?;
            render(ApplicationPublishTemplate {
                ctx,
                project,
                application: app,
                name: form.name.clone(),
                description: form.description.clone(),
                question_count: form.questions.len(),
                rows: question_rows(&form.questions),
                opens_at: String::new(),
                closes_at: String::new(),
                errors: vec![],
            })
        }
    }
}

fn render_editor(
    session: &Session,
    project: project::Project,
    application: application::ApplicationDetail,
    name: &str,
    description: &str,
    questions: &[QuestionDraft],
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session)?;
    render(ApplicationEditorTemplate {
        ctx,
        project,
        application,
        name: name.to_string(),
        description: description.to_string(),
        rows: question_rows(questions),
        type_options: type_options(),
        errors,
    })
}
