//! Wire format of the editor forms.
//!
//! The whole draft round-trips through every editor POST as indexed fields
//! (`q0_prompt`, `q0_type`, ...), so the server stays stateless between
//! edits and validation always sees the submit-time state. actix parses the
//! urlencoded body into ordered pairs; these helpers turn the pairs into a
//! `Vec<QuestionDraft>` plus the requested operation.

use crate::errors::AppError;
use crate::models::application::draft::{QuestionDraft, QuestionType};

/// What the editor POST asks for. Structural operations re-render without
/// persisting; only Save and the publish flow reach the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOp {
    Save,
    Preview,
    Publish,
    AddQuestion,
    DeleteQuestion(usize),
    Move { src: usize, dst: usize },
    /// Return from the preview page with the draft untouched.
    Resume,
}

#[derive(Debug)]
pub struct EditorForm {
    pub csrf_token: String,
    pub name: String,
    pub description: String,
    pub op: EditorOp,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug)]
pub struct PublishForm {
    pub csrf_token: String,
    pub name: String,
    pub description: String,
    pub opens_at: String,
    pub closes_at: String,
    pub questions: Vec<QuestionDraft>,
}

pub fn parse_editor_form(pairs: &[(String, String)]) -> Result<EditorForm, AppError> {
    let op = parse_op(first(pairs, "op").unwrap_or(""))?;
    Ok(EditorForm {
        csrf_token: first(pairs, "csrf_token").unwrap_or("").to_string(),
        name: first(pairs, "name").unwrap_or("").to_string(),
        description: first(pairs, "description").unwrap_or("").to_string(),
        op,
        questions: parse_questions(pairs)?,
    })
}

pub fn parse_publish_form(pairs: &[(String, String)]) -> Result<PublishForm, AppError> {
    Ok(PublishForm {
        csrf_token: first(pairs, "csrf_token").unwrap_or("").to_string(),
        name: first(pairs, "name").unwrap_or("").to_string(),
        description: first(pairs, "description").unwrap_or("").to_string(),
        opens_at: first(pairs, "opens_at").unwrap_or("").trim().to_string(),
        closes_at: first(pairs, "closes_at").unwrap_or("").trim().to_string(),
        questions: parse_questions(pairs)?,
    })
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn parse_op(value: &str) -> Result<EditorOp, AppError> {
    let mut parts = value.split(':');
    let head = parts.next().unwrap_or("");
    let op = match head {
        "save" => EditorOp::Save,
        "preview" => EditorOp::Preview,
        "publish" => EditorOp::Publish,
        "add" => EditorOp::AddQuestion,
        "resume" => EditorOp::Resume,
        "delete" => {
            let index = parse_index(parts.next(), value)?;
            EditorOp::DeleteQuestion(index)
        }
        "move" => {
            let src = parse_index(parts.next(), value)?;
            let dst = parse_index(parts.next(), value)?;
            EditorOp::Move { src, dst }
        }
        _ => return Err(AppError::Invalid(format!("unknown editor operation '{value}'"))),
    };
    if parts.next().is_some() {
        return Err(AppError::Invalid(format!("unknown editor operation '{value}'")));
    }
    Ok(op)
}

fn parse_index(part: Option<&str>, op: &str) -> Result<usize, AppError> {
    part.and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| AppError::Invalid(format!("malformed editor operation '{op}'")))
}

/// Collect `q{i}_*` fields into drafts, ordered by index. Indexes must be
/// contiguous from zero — a gap means the form was tampered with.
fn parse_questions(pairs: &[(String, String)]) -> Result<Vec<QuestionDraft>, AppError> {
    let mut count = 0usize;
    for (key, _) in pairs {
        if let Some((index, field)) = split_question_key(key) {
            if field == "prompt" {
                count = count.max(index + 1);
            }
        }
    }

    let mut questions: Vec<QuestionDraft> = (0..count)
        .map(|i| QuestionDraft::blank(i as i64))
        .collect();
    let mut seen = vec![false; count];

    for (key, value) in pairs {
        let Some((index, field)) = split_question_key(key) else {
            continue;
        };
        if index >= count {
            return Err(AppError::Invalid(format!(
                "question field '{key}' has no matching prompt"
            )));
        }
        let q = &mut questions[index];
        match field {
            "prompt" => {
                seen[index] = true;
                q.question = value.clone();
            }
            "id" => q.id = value.parse::<i64>().ok(),
            "type" => {
                q.question_type = if value.is_empty() {
                    None
                } else {
                    Some(QuestionType::parse(value).ok_or_else(|| {
                        AppError::Invalid(format!("unknown question type '{value}'"))
                    })?)
                };
            }
            "required" => {
                q.required = match value.as_str() {
                    "" => None,
                    "yes" => Some(true),
                    "no" => Some(false),
                    other => {
                        return Err(AppError::Invalid(format!(
                            "unknown required flag '{other}'"
                        )))
                    }
                };
            }
            "choices" => {
                q.answer_choices = value
                    .lines()
                    .map(|line| line.trim_end_matches('\r').to_string())
                    .collect();
            }
            "created" => {
                q.created_at = if value.is_empty() {
                    None
                } else {
                    Some(value.clone())
                };
            }
            "updated" => {
                q.updated_at = if value.is_empty() {
                    None
                } else {
                    Some(value.clone())
                };
            }
            other => {
                return Err(AppError::Invalid(format!(
                    "unrecognized question field '{other}'"
                )))
            }
        }
    }

    if let Some(missing) = seen.iter().position(|s| !s) {
        return Err(AppError::Invalid(format!(
            "question {missing} is missing its prompt field"
        )));
    }

    Ok(questions)
}

/// Split "q3_choices" into (3, "choices").
fn split_question_key(key: &str) -> Option<(usize, &str)> {
    let rest = key.strip_prefix('q')?;
    let underscore = rest.find('_')?;
    let index = rest[..underscore].parse::<usize>().ok()?;
    Some((index, &rest[underscore + 1..]))
}
