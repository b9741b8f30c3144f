//! Card normalization: raw card + reference maps -> canonical task.
//!
//! # Responsibility
//! - Classify task status from list names and due dates.
//! - Compute lateness and the observation summary.
//! - Resolve assignees without ever dropping a card for a bad reference.
//!
//! # Invariants
//! - Status priority: done list > in-progress list > past due > in progress.
//! - Every card of one pass is judged against the same `now`.
//! - Closed cards never produce tasks; output keeps input card order.

use crate::ingest::reference::ReferenceMaps;
use crate::model::raw::{RawBoard, RawCard, RawLabel};
use crate::model::task::{Label, Task, TaskStatus};
use chrono::{DateTime, Utc};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// List name used when a card points at an undeclared list.
pub const UNKNOWN_LIST_NAME: &str = "Unknown";
/// Observation text when a card has neither description nor named labels.
pub const NO_OBSERVATIONS: &str = "No observations";

const OBSERVATION_SEPARATOR: &str = " | ";
const MAX_DESCRIPTION_CHARS: usize = 100;
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

static DONE_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)concluí|done|finaliz|entregue").expect("valid done-list regex")
});
static IN_PROGRESS_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)andamento|progress|fazendo|doing").expect("valid in-progress-list regex")
});

/// Normalizes every open card of `board`, preserving card order.
pub fn normalize_cards(board: &RawBoard, maps: &ReferenceMaps, now: DateTime<Utc>) -> Vec<Task> {
    let tasks: Vec<Task> = board
        .cards
        .iter()
        .filter(|card| !card.closed)
        .map(|card| normalize_card(card, maps, now))
        .collect();

    debug!(
        "event=cards_normalized module=ingest status=ok cards_in={} tasks_out={}",
        board.cards.len(),
        tasks.len()
    );
    tasks
}

/// Builds the canonical task for one card.
///
/// Does not check `closed`; [`normalize_cards`] drops closed cards first.
pub fn normalize_card(card: &RawCard, maps: &ReferenceMaps, now: DateTime<Utc>) -> Task {
    let list_name = maps
        .list_name(&card.id_list)
        .unwrap_or(UNKNOWN_LIST_NAME)
        .to_string();
    let status = classify_status(&list_name, card.due, now);

    Task {
        id: card.id.clone(),
        name: card.name.clone(),
        desc: card.desc.clone(),
        due_date: card.due,
        date_last_activity: card.date_last_activity,
        status,
        list_name,
        members: card
            .id_members
            .iter()
            .map(|member_id| maps.resolve_member(member_id))
            .collect(),
        days_late: days_late(card.due, status, now),
        observations: extract_observations(&card.desc, &card.labels),
        url: card.url.clone(),
        labels: card
            .labels
            .iter()
            .map(|label| Label {
                name: label.name.clone(),
                color: label.color.clone(),
            })
            .collect(),
        closed: card.closed,
    }
}

/// Derives status from the list name first and the due date second.
///
/// A past-due card in an in-progress list stays `InProgress`.
pub fn classify_status(
    list_name: &str,
    due: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TaskStatus {
    if DONE_LIST_RE.is_match(list_name) {
        return TaskStatus::Completed;
    }
    if IN_PROGRESS_LIST_RE.is_match(list_name) {
        return TaskStatus::InProgress;
    }
    match due {
        Some(due) if due < now => TaskStatus::Overdue,
        _ => TaskStatus::InProgress,
    }
}

/// Whole days (rounded up) between `due` and `now`, never negative.
///
/// Returns `0` without a due date or for completed tasks.
pub fn days_late(due: Option<DateTime<Utc>>, status: TaskStatus, now: DateTime<Utc>) -> u32 {
    let Some(due) = due else {
        return 0;
    };
    if status == TaskStatus::Completed {
        return 0;
    }

    let elapsed_ms = (now - due).num_milliseconds();
    if elapsed_ms <= 0 {
        return 0;
    }
    let days = (elapsed_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Joins the truncated description and a label summary.
pub fn extract_observations(desc: &str, labels: &[RawLabel]) -> String {
    let mut parts = Vec::with_capacity(2);

    let desc = desc.trim();
    if !desc.is_empty() {
        parts.push(desc.chars().take(MAX_DESCRIPTION_CHARS).collect::<String>());
    }

    let label_names: Vec<&str> = labels
        .iter()
        .map(|label| label.name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    if !label_names.is_empty() {
        parts.push(format!("Labels: {}", label_names.join(", ")));
    }

    if parts.is_empty() {
        NO_OBSERVATIONS.to_string()
    } else {
        parts.join(OBSERVATION_SEPARATOR)
    }
}
