//! Application persistence tests: draft save/load round trips, order
//! renumbering, publishing, and deletion with cascade.

mod common;

use clubdeck::models::application::draft::{QuestionDraft, QuestionType};
use clubdeck::models::application::types::ConfirmationValues;
use clubdeck::models::application::{self, queries};
use common::*;

fn question(prompt: &str, kind: QuestionType, choices: &[&str]) -> QuestionDraft {
    QuestionDraft {
        id: None,
        question: prompt.to_string(),
        question_type: Some(kind),
        required: Some(true),
        order_number: 0,
        answer_choices: choices.iter().map(|c| c.to_string()).collect(),
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn new_application_starts_as_an_empty_draft() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");

    let app_id = queries::create(&db.conn, project_id, "Fall intake").expect("create");
    let detail = queries::find_by_id(&db.conn, app_id)
        .expect("lookup")
        .expect("exists");

    assert_eq!(detail.name, "Fall intake");
    assert_eq!(detail.status, "draft");
    assert!(queries::load_questions(&db.conn, app_id)
        .expect("load")
        .is_empty());
}

#[test]
fn save_then_load_round_trips_the_draft() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");
    let app_id = queries::create(&db.conn, project_id, "Fall intake").expect("create");

    let questions = vec![
        question("Why do you want to join?", QuestionType::LongAnswer, &[]),
        question(
            "Preferred weekday",
            QuestionType::MultipleChoice,
            &["Monday", "Thursday"],
        ),
    ];
    queries::save_draft(&db.conn, app_id, "Fall intake", "Join us", &questions).expect("save");

    let loaded = queries::load_questions(&db.conn, app_id).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].question, "Why do you want to join?");
    assert_eq!(loaded[0].question_type, Some(QuestionType::LongAnswer));
    assert_eq!(loaded[0].required, Some(true));
    assert_eq!(loaded[1].question, "Preferred weekday");
    assert_eq!(loaded[1].answer_choices, vec!["Monday", "Thursday"]);
    assert!(loaded.iter().all(|q| q.id.is_some()));
}

#[test]
fn save_recomputes_order_from_list_position() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");
    let app_id = queries::create(&db.conn, project_id, "Fall intake").expect("create");

    let mut questions = vec![
        question("first", QuestionType::ShortAnswer, &[]),
        question("second", QuestionType::ShortAnswer, &[]),
        question("third", QuestionType::ShortAnswer, &[]),
    ];
    // Stale order numbers from a previous load must not survive the save.
    questions[0].order_number = 9;
    questions[2].order_number = 4;
    queries::save_draft(&db.conn, app_id, "Fall intake", "d", &questions).expect("save");

    let loaded = queries::load_questions(&db.conn, app_id).expect("load");
    let prompts: Vec<&str> = loaded.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(prompts, vec!["first", "second", "third"]);
    let orders: Vec<i64> = loaded.iter().map(|q| q.order_number).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn resave_replaces_the_question_list() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");
    let app_id = queries::create(&db.conn, project_id, "Fall intake").expect("create");

    let first = vec![
        question("keep", QuestionType::ShortAnswer, &[]),
        question("drop", QuestionType::ShortAnswer, &[]),
    ];
    queries::save_draft(&db.conn, app_id, "Fall intake", "d", &first).expect("save");

    let mut loaded = queries::load_questions(&db.conn, app_id).expect("load");
    let kept_created = loaded[0].created_at.clone().expect("created_at set");
    loaded.remove(1);
    loaded[0].question = "keep (edited)".to_string();
    queries::save_draft(&db.conn, app_id, "Fall intake", "d", &loaded).expect("resave");

    let reloaded = queries::load_questions(&db.conn, app_id).expect("reload");
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].question, "keep (edited)");
    // Creation time carries through the wholesale replace.
    assert_eq!(reloaded[0].created_at.as_deref(), Some(kept_created.as_str()));
}

#[test]
fn publish_stores_the_confirmation_window_and_flips_status() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");
    let app_id = queries::create(&db.conn, project_id, "Fall intake").expect("create");

    let questions = vec![question("Your name?", QuestionType::ShortAnswer, &[])];
    let window = ConfirmationValues {
        opens_at: "2026-09-01".to_string(),
        closes_at: "2026-09-30".to_string(),
    };
    queries::publish(&db.conn, app_id, "Fall intake", "Join us", &window, &questions)
        .expect("publish");

    let detail = queries::find_by_id(&db.conn, app_id)
        .expect("lookup")
        .expect("exists");
    assert_eq!(detail.status, "published");
    assert_eq!(detail.opens_at, "2026-09-01");
    assert_eq!(detail.closes_at, "2026-09-30");
    assert!(detail.is_published());
    assert_eq!(queries::load_questions(&db.conn, app_id).expect("load").len(), 1);
}

#[test]
fn list_reports_question_counts_per_application() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");
    let with_questions = queries::create(&db.conn, project_id, "Fall intake").expect("create");
    let empty = queries::create(&db.conn, project_id, "Spring intake").expect("create");

    let questions = vec![
        question("a", QuestionType::ShortAnswer, &[]),
        question("b", QuestionType::LongAnswer, &[]),
    ];
    queries::save_draft(&db.conn, with_questions, "Fall intake", "d", &questions).expect("save");

    let items = application::find_by_project(&db.conn, project_id).expect("list");
    assert_eq!(items.len(), 2);
    let count_of = |id: i64| items.iter().find(|a| a.id == id).map(|a| a.question_count);
    assert_eq!(count_of(with_questions), Some(2));
    assert_eq!(count_of(empty), Some(0));
}

#[test]
fn delete_removes_questions_and_choices_via_cascade() {
    let db = setup_test_db();
    let project_id = insert_project(&db.conn, "Chess Club");
    let app_id = queries::create(&db.conn, project_id, "Fall intake").expect("create");

    let questions = vec![question(
        "Pick one",
        QuestionType::MultipleChoice,
        &["a", "b"],
    )];
    queries::save_draft(&db.conn, app_id, "Fall intake", "d", &questions).expect("save");
    assert_eq!(count_rows(&db.conn, "application_questions"), 1);
    assert_eq!(count_rows(&db.conn, "question_answer_choices"), 2);

    let deleted = queries::delete(&db.conn, app_id)
        .expect("delete")
        .expect("existed");
    assert_eq!(deleted.id, app_id);
    assert_eq!(count_rows(&db.conn, "applications"), 0);
    assert_eq!(count_rows(&db.conn, "application_questions"), 0);
    assert_eq!(count_rows(&db.conn, "question_answer_choices"), 0);
}

#[test]
fn delete_of_missing_application_returns_none() {
    let db = setup_test_db();
    insert_project(&db.conn, "Chess Club");
    assert!(queries::delete(&db.conn, 42).expect("delete").is_none());
}
