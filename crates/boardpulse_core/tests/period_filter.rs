use boardpulse_core::{process_board, Period, ProcessOptions};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;

fn window() -> Period {
    Period::new(
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
    )
    .unwrap()
}

fn options(period: Option<Period>) -> ProcessOptions {
    ProcessOptions::new(period).evaluated_at(Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap())
}

fn card(id: &str, last_activity: Option<&str>, due: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "name": id,
        "idList": "l1",
        "dateLastActivity": last_activity,
        "due": due
    })
}

fn board(cards: Vec<serde_json::Value>) -> String {
    json!({
        "id": "b1",
        "name": "Board",
        "lists": [{ "id": "l1", "name": "Backlog" }],
        "members": [],
        "cards": cards
    })
    .to_string()
}

fn retained_ids(text: &str, period: Option<Period>) -> Vec<String> {
    process_board(text, &options(period))
        .unwrap()
        .cards
        .iter()
        .map(|task| task.id.clone())
        .collect()
}

#[test]
fn end_of_window_is_inclusive_to_the_millisecond() {
    let text = board(vec![
        card("last-ms", Some("2025-06-10T23:59:59.999Z"), None),
        card("next-day", Some("2025-06-11T00:00:00.000Z"), None),
        card("first-ms", Some("2025-06-02T00:00:00.000Z"), None),
        card("before", Some("2025-06-01T23:59:59.999Z"), None),
    ]);

    assert_eq!(retained_ids(&text, Some(window())), vec!["last-ms", "first-ms"]);
}

#[test]
fn due_date_is_used_when_last_activity_is_absent() {
    let text = board(vec![
        card("due-inside", None, Some("2025-06-05T10:00:00.000Z")),
        card("due-outside", None, Some("2025-07-05T10:00:00.000Z")),
        card(
            "activity-wins",
            Some("2025-06-05T10:00:00.000Z"),
            Some("2025-01-01T00:00:00.000Z"),
        ),
    ]);

    assert_eq!(
        retained_ids(&text, Some(window())),
        vec!["due-inside", "activity-wins"]
    );
}

#[test]
fn dateless_tasks_are_always_retained() {
    let text = board(vec![
        card("no-dates", None, None),
        card("bad-date", Some("soon"), None),
        card("outside", Some("2024-01-01T00:00:00.000Z"), None),
    ]);

    assert_eq!(
        retained_ids(&text, Some(window())),
        vec!["no-dates", "bad-date"]
    );
}

#[test]
fn no_window_keeps_everything() {
    let text = board(vec![
        card("old", Some("2020-01-01T00:00:00.000Z"), None),
        card("new", Some("2030-01-01T00:00:00.000Z"), None),
    ]);

    assert_eq!(retained_ids(&text, None), vec!["old", "new"]);
}

#[test]
fn metrics_and_board_info_count_only_retained_tasks() {
    let text = board(vec![
        card("inside", Some("2025-06-05T10:00:00.000Z"), None),
        card("outside", Some("2025-08-05T10:00:00.000Z"), None),
    ]);

    let snapshot = process_board(&text, &options(Some(window()))).unwrap();
    assert_eq!(snapshot.metrics.total, 1);
    assert_eq!(snapshot.board_info.total_cards, 1);
    assert_eq!(snapshot.period, Some(window()));
}
