//! The in-memory question draft of one editing session.
//!
//! The draft is the single source of truth until an explicit save or publish.
//! Every structural edit is a pure operation: it takes the current list and
//! returns a fresh one, so no in-flight render or callback can observe a
//! half-applied mutation. Indexes identify questions only within one list;
//! they are not stable across reorders.

use std::fmt;

/// Answer formats a question can ask for. Closed set; the choice-based kinds
/// carry a list of answer choices, the free-text kinds ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    ShortAnswer,
    LongAnswer,
    MultipleChoice,
    MultipleSelect,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
        QuestionType::MultipleChoice,
        QuestionType::MultipleSelect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::LongAnswer => "LONG_ANSWER",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::MultipleSelect => "MULTIPLE_SELECT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::ShortAnswer => "Short answer",
            QuestionType::LongAnswer => "Long answer",
            QuestionType::MultipleChoice => "Multiple choice",
            QuestionType::MultipleSelect => "Multiple select",
        }
    }

    pub fn parse(value: &str) -> Option<QuestionType> {
        match value {
            "SHORT_ANSWER" => Some(QuestionType::ShortAnswer),
            "LONG_ANSWER" => Some(QuestionType::LongAnswer),
            "MULTIPLE_CHOICE" => Some(QuestionType::MultipleChoice),
            "MULTIPLE_SELECT" => Some(QuestionType::MultipleSelect),
            _ => None,
        }
    }

    /// Whether this kind needs a fixed set of answer choices.
    pub fn uses_choices(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoice | QuestionType::MultipleSelect
        )
    }
}

/// One question in the draft. `question_type` and `required` stay unset until
/// the editor picks them; validation refuses to persist a draft with either
/// still unset. Timestamps belong to the persistence layer and pass through
/// the editor unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: Option<i64>,
    pub question: String,
    pub question_type: Option<QuestionType>,
    pub required: Option<bool>,
    pub order_number: i64,
    pub answer_choices: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl QuestionDraft {
    /// A fresh, not-yet-persisted question appended at `order_number`.
    pub fn blank(order_number: i64) -> Self {
        QuestionDraft {
            id: None,
            question: String::new(),
            question_type: None,
            required: None,
            order_number,
            answer_choices: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// A single-field update, one variant per recognized attribute.
/// Unrecognized field names cannot be expressed.
#[derive(Debug, Clone)]
pub enum QuestionField {
    Prompt(String),
    Kind(QuestionType),
    Required(bool),
    AnswerChoices(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::IndexOutOfRange { index, len } => {
                write!(f, "question index {index} out of range for list of {len}")
            }
        }
    }
}

impl std::error::Error for DraftError {}

fn check_index(index: usize, len: usize) -> Result<(), DraftError> {
    if index >= len {
        return Err(DraftError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Move the question at `src` so it ends up at `dst`.
///
/// Delete-then-insert, not a swap: all other questions keep their relative
/// order. `src == dst` is the identity. Out-of-range indexes are a caller
/// bug and fail instead of clamping.
pub fn move_question(
    questions: &[QuestionDraft],
    src: usize,
    dst: usize,
) -> Result<Vec<QuestionDraft>, DraftError> {
    check_index(src, questions.len())?;
    check_index(dst, questions.len())?;

    let mut next = questions.to_vec();
    let moved = next.remove(src);
    next.insert(dst, moved);
    Ok(next)
}

/// Replace exactly one field of the question at `index`, leaving every other
/// field and every other question untouched.
pub fn set_field(
    questions: &[QuestionDraft],
    index: usize,
    field: QuestionField,
) -> Result<Vec<QuestionDraft>, DraftError> {
    check_index(index, questions.len())?;

    let mut next = questions.to_vec();
    match field {
        QuestionField::Prompt(value) => next[index].question = value,
        QuestionField::Kind(value) => next[index].question_type = Some(value),
        QuestionField::Required(value) => next[index].required = Some(value),
        QuestionField::AnswerChoices(value) => next[index].answer_choices = value,
    }
    Ok(next)
}

/// Remove the question at `index`, shifting later questions left by one.
/// Does not renumber `order_number`; callers renumber before persisting.
pub fn delete_question(
    questions: &[QuestionDraft],
    index: usize,
) -> Result<Vec<QuestionDraft>, DraftError> {
    check_index(index, questions.len())?;

    let mut next = questions.to_vec();
    next.remove(index);
    Ok(next)
}

/// Append a blank question at the end of the draft.
pub fn add_question(questions: &[QuestionDraft]) -> Vec<QuestionDraft> {
    let mut next = questions.to_vec();
    next.push(QuestionDraft::blank(next.len() as i64));
    next
}

/// Rewrite every `order_number` from list position. Run before persisting so
/// stored order always matches what the editor showed.
pub fn renumber(questions: &mut [QuestionDraft]) {
    for (i, q) in questions.iter_mut().enumerate() {
        q.order_number = i as i64;
    }
}

/// Validate the whole application draft: top-level fields plus every
/// question. Returns one message per failing rule; an empty list means the
/// draft may be saved or published.
///
/// The empty-choice check runs for every question type, not just the
/// choice-based kinds; stray choices on a free-text question are stale
/// editor state and blocking on them keeps saved data clean.
pub fn validate(name: &str, description: &str, questions: &[QuestionDraft]) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("Application name is required".to_string());
    }
    if description.trim().is_empty() {
        errors.push("Application description is required".to_string());
    }

    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.question.is_empty() {
            errors.push(format!("Question {n} needs a prompt"));
        }
        if q.question_type.is_none() {
            errors.push(format!("Question {n} needs an answer type"));
        }
        if q.required.is_none() {
            errors.push(format!("Question {n} must be marked required or optional"));
        }
        if q.answer_choices.iter().any(|c| c.is_empty()) {
            errors.push(format!("Question {n} has an empty answer choice"));
        }
        if let Some(t) = q.question_type {
            if t.uses_choices() && q.answer_choices.is_empty() {
                errors.push(format!("Question {n} needs at least one answer choice"));
            }
        }
    }

    errors
}

/// All-or-nothing pass/fail over the whole draft.
pub fn is_valid(name: &str, description: &str, questions: &[QuestionDraft]) -> bool {
    validate(name, description, questions).is_empty()
}

/// Publish flow state. Previewing needs no validation; requesting publish
/// runs the validator and either opens the confirmation step or shows the
/// error dialog; cancelling anywhere returns to `Idle` with no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishGate {
    #[default]
    Idle,
    PreviewOpen,
    ConfirmOpen,
    ErrorShown,
}

impl PublishGate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishGate::Idle => "idle",
            PublishGate::PreviewOpen => "preview",
            PublishGate::ConfirmOpen => "confirm",
            PublishGate::ErrorShown => "error",
        }
    }

    pub fn parse(value: &str) -> PublishGate {
        match value {
            "preview" => PublishGate::PreviewOpen,
            "confirm" => PublishGate::ConfirmOpen,
            "error" => PublishGate::ErrorShown,
            _ => PublishGate::Idle,
        }
    }

    pub fn on_preview(self) -> PublishGate {
        PublishGate::PreviewOpen
    }

    /// Publish requested: validation result decides between the confirmation
    /// step and the error dialog. No persistence happens on this transition.
    pub fn on_publish_request(self, draft_valid: bool) -> PublishGate {
        if draft_valid {
            PublishGate::ConfirmOpen
        } else {
            PublishGate::ErrorShown
        }
    }

    pub fn on_cancel(self) -> PublishGate {
        PublishGate::Idle
    }

    /// Dismissing the error dialog returns to the editor.
    pub fn on_error_dismissed(self) -> PublishGate {
        PublishGate::Idle
    }

    /// Only the confirmation step may invoke the publish persistence.
    pub fn can_publish(&self) -> bool {
        matches!(self, PublishGate::ConfirmOpen)
    }
}
