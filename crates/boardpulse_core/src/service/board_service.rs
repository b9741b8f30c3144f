//! Board processing use-case.
//!
//! # Responsibility
//! - Run the full pipeline: parse, validate, build maps, normalize cards,
//!   filter by period and aggregate metrics.
//! - Return an independently owned snapshot; no state survives the call.
//!
//! # Invariants
//! - The evaluation instant is captured once in `ProcessOptions` and used for
//!   every card of the pass.
//! - Tasks without any date are always kept by the period filter.

use crate::ingest::normalize::normalize_cards;
use crate::ingest::reference::ReferenceMaps;
use crate::ingest::validate::{parse_board, BoardError};
use crate::model::metrics::Metrics;
use crate::model::period::Period;
use crate::model::raw::RawBoard;
use crate::model::task::{MemberProfile, Task};
use crate::search::filter::{filter_tasks, FilteredView, TaskFilter};
use crate::service::metrics::aggregate;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-call processing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Reporting window; `None` keeps every task.
    pub period: Option<Period>,
    /// Instant used for status and lateness of every card.
    pub evaluated_at: DateTime<Utc>,
}

impl ProcessOptions {
    /// Captures the current wall-clock time as the evaluation instant.
    pub fn new(period: Option<Period>) -> Self {
        Self {
            period,
            evaluated_at: Utc::now(),
        }
    }

    /// Replaces the evaluation instant, for reproducible runs.
    pub fn evaluated_at(mut self, instant: DateTime<Utc>) -> Self {
        self.evaluated_at = instant;
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Identity of the processed board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardInfo {
    pub id: String,
    pub name: String,
    /// Number of tasks retained after the period filter.
    pub total_cards: usize,
}

/// Engine output for one processing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Retained tasks in card order.
    pub cards: Vec<Arc<Task>>,
    /// Every board member, in board order.
    pub members: Vec<Arc<MemberProfile>>,
    pub metrics: Metrics,
    pub period: Option<Period>,
    pub board_info: BoardInfo,
    pub evaluated_at: DateTime<Utc>,
}

impl BoardSnapshot {
    /// Re-filters the retained tasks and recomputes metrics for the subset.
    ///
    /// The snapshot itself is left untouched; the view shares its tasks.
    pub fn filter(&self, filter: &TaskFilter) -> FilteredView {
        filter_tasks(&self.cards, &self.members, filter)
    }
}

/// Parses and processes a board export.
///
/// # Errors
/// - `BoardError::MalformedInput` when `text` is not JSON.
/// - `BoardError::Validation` when the export shape is incomplete.
pub fn process_board(text: &str, options: &ProcessOptions) -> Result<BoardSnapshot, BoardError> {
    let board = parse_board(text)?;
    Ok(normalize(&board, options))
}

/// Processes an already-extracted board. Never fails.
pub fn normalize(board: &RawBoard, options: &ProcessOptions) -> BoardSnapshot {
    let maps = ReferenceMaps::build(board);
    let tasks = normalize_cards(board, &maps, options.evaluated_at);
    let normalized_count = tasks.len();

    let cards: Vec<Arc<Task>> = tasks
        .into_iter()
        .filter(|task| in_period(task, options.period.as_ref()))
        .map(Arc::new)
        .collect();
    let members = maps.into_members();
    let metrics = aggregate(&cards, &members);

    info!(
        "event=board_processed module=service status=ok board_id={} cards_in={} open={} retained={} members={}",
        board.id,
        board.cards.len(),
        normalized_count,
        cards.len(),
        members.len()
    );

    BoardSnapshot {
        board_info: BoardInfo {
            id: board.id.clone(),
            name: board.name.clone(),
            total_cards: cards.len(),
        },
        cards,
        members,
        metrics,
        period: options.period,
        evaluated_at: options.evaluated_at,
    }
}

/// Returns whether `task` belongs to `period`.
///
/// Uses last activity, else the due date; dateless tasks always pass, as
/// does every task when no period is set.
pub fn in_period(task: &Task, period: Option<&Period>) -> bool {
    let Some(period) = period else {
        return true;
    };
    match task.reference_date() {
        Some(instant) => period.contains(instant),
        None => true,
    }
}
