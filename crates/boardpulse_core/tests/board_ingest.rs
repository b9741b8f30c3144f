use boardpulse_core::{
    process_board, BoardError, ProcessOptions, TaskStatus, ValidationError,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn options() -> ProcessOptions {
    ProcessOptions::new(None).evaluated_at(now())
}

fn board() -> serde_json::Value {
    json!({
        "id": "board-1",
        "name": "Marketing Q2",
        "lists": [
            { "id": "l-todo", "name": "A Fazer" },
            { "id": "l-doing", "name": "Em Andamento" },
            { "id": "l-done", "name": "Concluído" }
        ],
        "members": [
            { "id": "m-ana", "fullName": "Ana Costa", "username": "ana" },
            { "id": "m-bia", "username": "bia.lima", "initials": "BL" }
        ],
        "cards": [
            {
                "id": "c-future",
                "name": "Newsletter",
                "desc": "Draft the June issue",
                "due": "2025-06-20T12:00:00.000Z",
                "dateLastActivity": "2025-06-10T09:00:00.000Z",
                "idList": "l-todo",
                "idMembers": ["m-ana"],
                "labels": [{ "name": "email", "color": "blue" }],
                "closed": false,
                "url": "https://example.test/c/future"
            },
            {
                "id": "c-done",
                "name": "Launch post",
                "desc": "",
                "due": "2025-05-01T12:00:00.000Z",
                "idList": "l-done",
                "idMembers": ["m-ana", "m-bia"],
                "labels": [],
                "closed": false
            },
            {
                "id": "c-archived",
                "name": "Old campaign",
                "idList": "l-todo",
                "closed": true
            },
            {
                "id": "c-late",
                "name": "Press kit",
                "due": "2025-06-12T18:00:00.000Z",
                "idList": "l-todo",
                "idMembers": ["m-ghost"]
            },
            {
                "id": "c-doing-late",
                "name": "Landing page",
                "due": "2025-06-13T12:00:00.000Z",
                "idList": "l-doing"
            },
            {
                "id": "c-orphan",
                "name": "Stray card",
                "idList": "l-missing"
            }
        ]
    })
}

#[test]
fn closed_cards_are_dropped_and_order_is_preserved() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();

    let ids: Vec<&str> = snapshot.cards.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["c-future", "c-done", "c-late", "c-doing-late", "c-orphan"]
    );
    assert_eq!(snapshot.board_info.id, "board-1");
    assert_eq!(snapshot.board_info.name, "Marketing Q2");
    assert_eq!(snapshot.board_info.total_cards, 5);
    assert_eq!(snapshot.evaluated_at, now());
}

#[test]
fn future_due_in_neutral_list_is_in_progress_without_lateness() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();
    let task = &snapshot.cards[0];

    assert_eq!(task.list_name, "a fazer");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.days_late, 0);
    assert_eq!(task.observations, "Draft the June issue | Labels: email");
    assert_eq!(task.url, "https://example.test/c/future");
}

#[test]
fn done_list_wins_over_past_due_date() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();
    let task = &snapshot.cards[1];

    assert_eq!(task.list_name, "concluído");
    assert_eq!(task.status, TaskStatus::Completed);
    assert_eq!(task.days_late, 0);
    assert_eq!(task.observations, "No observations");
}

#[test]
fn past_due_classification_depends_on_list() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();

    let late = &snapshot.cards[2];
    assert_eq!(late.status, TaskStatus::Overdue);
    assert_eq!(late.days_late, 3);

    let doing_late = &snapshot.cards[3];
    assert_eq!(doing_late.status, TaskStatus::InProgress);
    assert_eq!(doing_late.days_late, 2);
}

#[test]
fn unknown_references_are_defaulted() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();

    let late = &snapshot.cards[2];
    assert_eq!(late.members.len(), 1);
    assert_eq!(late.members[0].id, "m-ghost");
    assert_eq!(late.members[0].full_name, "Unknown User");
    assert_eq!(late.members[0].initials, "UD");

    let orphan = &snapshot.cards[4];
    assert_eq!(orphan.list_name, "Unknown");
    assert_eq!(orphan.status, TaskStatus::InProgress);
    assert!(orphan.members.is_empty());
}

#[test]
fn member_profiles_are_normalized_and_shared() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();

    assert_eq!(snapshot.members.len(), 2);
    assert_eq!(snapshot.members[0].initials, "AC");
    assert_eq!(snapshot.members[1].full_name, "bia.lima");
    assert_eq!(snapshot.members[1].initials, "BL");

    let done = &snapshot.cards[1];
    assert!(std::sync::Arc::ptr_eq(&done.members[0], &snapshot.members[0]));
    assert!(std::sync::Arc::ptr_eq(&done.members[1], &snapshot.members[1]));
}

#[test]
fn lateness_is_never_negative() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();
    for task in &snapshot.cards {
        if task.status == TaskStatus::Completed {
            assert_eq!(task.days_late, 0);
        }
    }
    assert!(snapshot
        .cards
        .iter()
        .all(|task| task.due_date.is_some() || task.days_late == 0));
}

#[test]
fn malformed_text_is_reported_before_validation() {
    let err = process_board("{ not json", &options()).unwrap_err();
    assert!(matches!(err, BoardError::MalformedInput(_)));
    assert!(err.to_string().contains("malformed board export"));
}

#[test]
fn incomplete_exports_fail_validation_without_partial_results() {
    let mut payload = board();
    payload.as_object_mut().unwrap().remove("lists");
    let err = process_board(&payload.to_string(), &options()).unwrap_err();
    assert!(matches!(
        err,
        BoardError::Validation(ValidationError::MissingField("lists"))
    ));

    let mut payload = board();
    payload["cards"] = json!([]);
    let err = process_board(&payload.to_string(), &options()).unwrap_err();
    assert!(matches!(err, BoardError::Validation(ValidationError::NoCards)));
    assert_eq!(err.to_string(), "no cards found on the board");
}

#[test]
fn same_input_and_instant_give_identical_snapshots() {
    let text = board().to_string();
    let first = process_board(&text, &options()).unwrap();
    let second = process_board(&text, &options()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn snapshot_serializes_with_expected_wire_fields() {
    let snapshot = process_board(&board().to_string(), &options()).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["boardInfo"]["totalCards"], 5);
    assert_eq!(json["cards"][2]["status"], "overdue");
    assert_eq!(json["cards"][2]["daysLate"], 3);
    assert_eq!(json["cards"][3]["status"], "in_progress");
    assert_eq!(json["metrics"]["inProgress"], 3);
    assert!(json["period"].is_null());
    assert_eq!(json["members"][0]["fullName"], "Ana Costa");
}
