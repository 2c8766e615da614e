use askama::Template;

use super::PageContext;
use crate::models::application::draft::{QuestionDraft, QuestionType};
use crate::models::application::types::{ApplicationDetail, ApplicationListItem};
use crate::models::project::Project;

#[derive(Template)]
#[template(path = "applications/list.html")]
pub struct ApplicationListTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub applications: Vec<ApplicationListItem>,
}

/// One question of the draft, flattened into form-friendly strings. Rendered
/// as editable inputs in the editor and as hidden fields by the preview and
/// publish pages so the draft survives the round trip.
pub struct QuestionRow {
    pub index: usize,
    pub id_value: String,
    pub prompt: String,
    pub type_value: String,
    pub required_value: String,
    pub choices_text: String,
    pub uses_choices: bool,
    pub created_value: String,
    pub updated_value: String,
    pub is_first: bool,
    pub is_last: bool,
}

/// Read-only rendering of one question for the preview page.
pub struct PreviewQuestion {
    pub prompt: String,
    pub type_label: String,
    pub required: bool,
    pub choices: Vec<String>,
}

pub struct TypeOption {
    pub code: &'static str,
    pub label: &'static str,
}

pub fn type_options() -> Vec<TypeOption> {
    QuestionType::ALL
        .iter()
        .map(|t| TypeOption {
            code: t.as_str(),
            label: t.label(),
        })
        .collect()
}

/// Flatten the draft for the templates.
pub fn question_rows(questions: &[QuestionDraft]) -> Vec<QuestionRow> {
    let len = questions.len();
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| QuestionRow {
            index: i,
            id_value: q.id.map(|id| id.to_string()).unwrap_or_default(),
            prompt: q.question.clone(),
            type_value: q.question_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
            required_value: match q.required {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => String::new(),
            },
            choices_text: q.answer_choices.join("\n"),
            uses_choices: q.question_type.map(|t| t.uses_choices()).unwrap_or(false),
            created_value: q.created_at.clone().unwrap_or_default(),
            updated_value: q.updated_at.clone().unwrap_or_default(),
            is_first: i == 0,
            is_last: i + 1 == len,
        })
        .collect()
}

pub fn preview_questions(questions: &[QuestionDraft]) -> Vec<PreviewQuestion> {
    questions
        .iter()
        .map(|q| PreviewQuestion {
            prompt: q.question.clone(),
            type_label: q
                .question_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| "(no type chosen)".to_string()),
            required: q.required.unwrap_or(false),
            choices: q.answer_choices.clone(),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "applications/editor.html")]
pub struct ApplicationEditorTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub application: ApplicationDetail,
    pub name: String,
    pub description: String,
    pub rows: Vec<QuestionRow>,
    pub type_options: Vec<TypeOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "applications/preview.html")]
pub struct ApplicationPreviewTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub application: ApplicationDetail,
    pub name: String,
    pub description: String,
    pub preview: Vec<PreviewQuestion>,
    pub rows: Vec<QuestionRow>,
}

#[derive(Template)]
#[template(path = "applications/publish.html")]
pub struct ApplicationPublishTemplate {
    pub ctx: PageContext,
    pub project: Project,
    pub application: ApplicationDetail,
    pub name: String,
    pub description: String,
    pub rows: Vec<QuestionRow>,
    pub question_count: usize,
    pub opens_at: String,
    pub closes_at: String,
    pub errors: Vec<String>,
}
