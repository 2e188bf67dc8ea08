//! Integration tests for quests
//!
//! Tests quests with task graphs, quiz questions, and dungeon layouts.

use dungeon_content::{DungeonGraph, Quest, game_environment};
use dungeon_foundation::{ErrorKind, Graph, Value};
use dungeon_semantic::DslEnvironment;

fn question(env: &DslEnvironment, description: &str, answers: &[&str], correct: i64) -> Value {
    env.instantiate_positional(
        "single_choice_question",
        &[
            Value::from(description),
            Value::list(answers.iter().map(|a| Value::from(*a))),
            Value::Int(correct),
        ],
        &[],
    )
    .unwrap()
}

#[test]
fn quest_with_questions_and_tasks() {
    let env = game_environment().unwrap();
    let q1 = question(&env, "Which door?", &["left", "right"], 1);
    let q2 = question(&env, "How many keys?", &["one", "two", "three"], 2);
    let tasks = Graph::parse("find_key -> open_door; open_door -> loot; find_key -> loot").unwrap();

    let value = env
        .instantiate(
            "quest",
            &[
                ("name", Value::from("The locked vault")),
                ("tasks", Value::from(tasks)),
                ("reward", Value::Int(250)),
                ("questions", Value::list(vec![q1, q2])),
            ],
            &[],
        )
        .unwrap();

    let quest = value.as_object().and_then(|obj| obj.extract::<Quest>()).unwrap();
    assert_eq!(quest.name(), "The locked vault");
    assert_eq!(quest.reward(), 250);
    assert_eq!(quest.next_tasks("find_key"), vec!["open_door", "loot"]);
    assert_eq!(quest.questions().len(), 2);
    assert!(quest.questions()[1].is_correct(2));
    assert_eq!(quest.questions()[0].answers(), ["left".to_string(), "right".to_string()]);
}

#[test]
fn question_index_out_of_range() {
    let env = game_environment().unwrap();
    let err = env
        .instantiate_positional(
            "single_choice_question",
            &[Value::from("?"), Value::list(vec![Value::from("a")]), Value::Int(3)],
            &[],
        )
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn quest_rejects_foreign_objects_in_questions() {
    let env = game_environment().unwrap();
    let not_a_question = Value::object(5_i64);
    let err = env
        .instantiate(
            "quest",
            &[("name", Value::from("x")), ("questions", Value::list(vec![not_a_question]))],
            &[],
        )
        .unwrap_err();
    assert!(
        matches!(err.kind, ErrorKind::TypeMismatch { ref expected, .. } if expected == "list<single_choice_question>")
    );
}

#[test]
fn dungeon_layout_from_text() {
    let env = game_environment().unwrap();
    let value = env
        .instantiate("dungeon_graph", &[("text", Value::from("entry -> hall -> boss"))], &[])
        .unwrap();
    let dungeon = value.as_object().and_then(|obj| obj.extract::<DungeonGraph>()).unwrap();
    assert_eq!(dungeon.start(), Some("entry"));
    assert_eq!(dungeon.room_count(), 3);
}

#[test]
fn dungeon_layout_parse_error_surfaces() {
    let env = game_environment().unwrap();
    let err = env
        .instantiate("dungeon_graph", &[("text", Value::from("entry ->"))], &[])
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ParseError { line: 1, .. }));
}
