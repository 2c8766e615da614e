//! Tests for the pure draft operations: reorder, single-field update,
//! delete, add, the validator, and the publish gate state machine.

use clubdeck::models::application::draft::{
    self, DraftError, PublishGate, QuestionDraft, QuestionField, QuestionType,
};

// --- Helpers ---

fn question(prompt: &str) -> QuestionDraft {
    QuestionDraft {
        id: None,
        question: prompt.to_string(),
        question_type: Some(QuestionType::ShortAnswer),
        required: Some(false),
        order_number: 0,
        answer_choices: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

fn draft(prompts: &[&str]) -> Vec<QuestionDraft> {
    let mut qs: Vec<QuestionDraft> = prompts.iter().map(|p| question(p)).collect();
    draft::renumber(&mut qs);
    qs
}

fn prompts(questions: &[QuestionDraft]) -> Vec<&str> {
    questions.iter().map(|q| q.question.as_str()).collect()
}

// --- move_question ---

#[test]
fn move_to_same_index_is_identity() {
    let qs = draft(&["a", "b", "c"]);
    let moved = draft::move_question(&qs, 1, 1).unwrap();
    assert_eq!(moved, qs);
}

#[test]
fn move_down_keeps_relative_order_of_others() {
    let qs = draft(&["a", "b", "c", "d"]);
    let moved = draft::move_question(&qs, 0, 2).unwrap();
    assert_eq!(prompts(&moved), vec!["b", "c", "a", "d"]);
}

#[test]
fn move_up_keeps_relative_order_of_others() {
    let qs = draft(&["a", "b", "c", "d"]);
    let moved = draft::move_question(&qs, 3, 1).unwrap();
    assert_eq!(prompts(&moved), vec!["a", "d", "b", "c"]);
}

#[test]
fn move_preserves_the_question_set() {
    let qs = draft(&["a", "b", "c"]);
    let moved = draft::move_question(&qs, 2, 0).unwrap();
    assert_eq!(moved.len(), qs.len());
    let mut sorted = prompts(&moved);
    sorted.sort();
    assert_eq!(sorted, vec!["a", "b", "c"]);
}

#[test]
fn move_with_out_of_range_src_fails() {
    let qs = draft(&["a", "b"]);
    let err = draft::move_question(&qs, 5, 0).unwrap_err();
    assert_eq!(err, DraftError::IndexOutOfRange { index: 5, len: 2 });
}

#[test]
fn move_with_out_of_range_dst_fails() {
    let qs = draft(&["a", "b"]);
    let err = draft::move_question(&qs, 0, 2).unwrap_err();
    assert_eq!(err, DraftError::IndexOutOfRange { index: 2, len: 2 });
}

#[test]
fn move_on_empty_list_fails() {
    let err = draft::move_question(&[], 0, 0).unwrap_err();
    assert_eq!(err, DraftError::IndexOutOfRange { index: 0, len: 0 });
}

// --- set_field ---

#[test]
fn set_field_replaces_only_the_named_field() {
    let qs = draft(&["a", "b"]);
    let next = draft::set_field(&qs, 1, QuestionField::Prompt("b2".into())).unwrap();
    assert_eq!(next[1].question, "b2");
    assert_eq!(next[1].question_type, qs[1].question_type);
    assert_eq!(next[1].required, qs[1].required);
    assert_eq!(next[0], qs[0]);
}

#[test]
fn set_field_updates_type_required_and_choices() {
    let qs = draft(&["a"]);
    let next = draft::set_field(&qs, 0, QuestionField::Kind(QuestionType::MultipleChoice)).unwrap();
    let next = draft::set_field(&next, 0, QuestionField::Required(true)).unwrap();
    let next = draft::set_field(
        &next,
        0,
        QuestionField::AnswerChoices(vec!["yes".into(), "no".into()]),
    )
    .unwrap();
    assert_eq!(next[0].question_type, Some(QuestionType::MultipleChoice));
    assert_eq!(next[0].required, Some(true));
    assert_eq!(next[0].answer_choices, vec!["yes", "no"]);
}

#[test]
fn set_field_out_of_range_fails() {
    let qs = draft(&["a"]);
    let err = draft::set_field(&qs, 1, QuestionField::Required(true)).unwrap_err();
    assert_eq!(err, DraftError::IndexOutOfRange { index: 1, len: 1 });
}

// --- delete_question / add_question / renumber ---

#[test]
fn delete_shifts_later_questions_left() {
    let qs = draft(&["a", "b", "c"]);
    let next = draft::delete_question(&qs, 1).unwrap();
    assert_eq!(prompts(&next), vec!["a", "c"]);
}

#[test]
fn delete_out_of_range_fails() {
    let qs = draft(&["a"]);
    let err = draft::delete_question(&qs, 3).unwrap_err();
    assert_eq!(err, DraftError::IndexOutOfRange { index: 3, len: 1 });
}

#[test]
fn add_appends_a_blank_question() {
    let qs = draft(&["a"]);
    let next = draft::add_question(&qs);
    assert_eq!(next.len(), 2);
    assert_eq!(next[1].question, "");
    assert_eq!(next[1].question_type, None);
    assert_eq!(next[1].required, None);
    assert!(next[1].answer_choices.is_empty());
}

#[test]
fn renumber_rewrites_order_from_position() {
    let mut qs = draft(&["a", "b", "c"]);
    qs[0].order_number = 7;
    qs[2].order_number = 1;
    draft::renumber(&mut qs);
    let orders: Vec<i64> = qs.iter().map(|q| q.order_number).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

// --- validate ---

fn valid_draft() -> (String, String, Vec<QuestionDraft>) {
    let mut q = question("How did you hear about us?");
    q.question_type = Some(QuestionType::MultipleChoice);
    q.required = Some(true);
    q.answer_choices = vec!["friend".into(), "poster".into()];
    ("Fall intake".to_string(), "Join the club".to_string(), vec![q])
}

#[test]
fn complete_draft_validates_clean() {
    let (name, desc, qs) = valid_draft();
    assert!(draft::validate(&name, &desc, &qs).is_empty());
    assert!(draft::is_valid(&name, &desc, &qs));
}

#[test]
fn blank_name_or_description_fails() {
    let (_, desc, qs) = valid_draft();
    assert!(!draft::is_valid("   ", &desc, &qs));
    let (name, _, qs) = valid_draft();
    assert!(!draft::is_valid(&name, "", &qs));
}

#[test]
fn question_without_prompt_type_or_required_fails() {
    let (name, desc, _) = valid_draft();
    let blank = QuestionDraft::blank(0);
    let errors = draft::validate(&name, &desc, &[blank]);
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().any(|e| e.contains("prompt")));
    assert!(errors.iter().any(|e| e.contains("answer type")));
    assert!(errors.iter().any(|e| e.contains("required or optional")));
}

#[test]
fn empty_answer_choice_fails_even_on_free_text_questions() {
    let (name, desc, _) = valid_draft();
    let mut q = question("Your name?");
    q.question_type = Some(QuestionType::ShortAnswer);
    q.answer_choices = vec!["".to_string()];
    assert!(!draft::is_valid(&name, &desc, &[q]));
}

#[test]
fn choice_question_needs_at_least_one_choice() {
    let (name, desc, _) = valid_draft();
    let mut q = question("Pick one");
    q.question_type = Some(QuestionType::MultipleSelect);
    q.answer_choices = Vec::new();
    let errors = draft::validate(&name, &desc, &[q]);
    assert!(errors.iter().any(|e| e.contains("at least one answer choice")));
}

#[test]
fn validator_reports_every_failing_question() {
    let (name, desc, _) = valid_draft();
    let qs = vec![QuestionDraft::blank(0), QuestionDraft::blank(1)];
    let errors = draft::validate(&name, &desc, &qs);
    assert!(errors.iter().any(|e| e.starts_with("Question 1")));
    assert!(errors.iter().any(|e| e.starts_with("Question 2")));
}

// --- question types ---

#[test]
fn question_type_codes_round_trip() {
    for t in QuestionType::ALL {
        assert_eq!(QuestionType::parse(t.as_str()), Some(t));
    }
    assert_eq!(QuestionType::parse("ESSAY"), None);
}

#[test]
fn only_choice_kinds_use_choices() {
    assert!(!QuestionType::ShortAnswer.uses_choices());
    assert!(!QuestionType::LongAnswer.uses_choices());
    assert!(QuestionType::MultipleChoice.uses_choices());
    assert!(QuestionType::MultipleSelect.uses_choices());
}

// --- publish gate ---

#[test]
fn publish_request_on_valid_draft_opens_confirmation() {
    let gate = PublishGate::Idle.on_publish_request(true);
    assert_eq!(gate, PublishGate::ConfirmOpen);
    assert!(gate.can_publish());
}

#[test]
fn publish_request_on_invalid_draft_shows_error() {
    let gate = PublishGate::Idle.on_publish_request(false);
    assert_eq!(gate, PublishGate::ErrorShown);
    assert!(!gate.can_publish());
    assert_eq!(gate.on_error_dismissed(), PublishGate::Idle);
}

#[test]
fn cancel_always_returns_to_idle() {
    assert_eq!(PublishGate::PreviewOpen.on_cancel(), PublishGate::Idle);
    assert_eq!(PublishGate::ConfirmOpen.on_cancel(), PublishGate::Idle);
    assert_eq!(PublishGate::ErrorShown.on_cancel(), PublishGate::Idle);
}

#[test]
fn only_the_confirmation_step_may_publish() {
    assert!(!PublishGate::Idle.can_publish());
    assert!(!PublishGate::PreviewOpen.can_publish());
    assert!(!PublishGate::ErrorShown.can_publish());
    assert!(PublishGate::ConfirmOpen.can_publish());
}

#[test]
fn gate_state_survives_the_session_string() {
    for gate in [
        PublishGate::Idle,
        PublishGate::PreviewOpen,
        PublishGate::ConfirmOpen,
        PublishGate::ErrorShown,
    ] {
        assert_eq!(PublishGate::parse(gate.as_str()), gate);
    }
    // Unknown stored values fall back to idle rather than failing.
    assert_eq!(PublishGate::parse("garbage"), PublishGate::Idle);
}
