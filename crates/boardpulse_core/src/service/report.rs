//! Structured report projection.
//!
//! # Responsibility
//! - Flatten a snapshot (or a filtered view of it) into the row-oriented
//!   shape that document exporters render.
//!
//! # Invariants
//! - Building a report never recomputes classification or metrics.
//! - Rates and averages are whole numbers.

use crate::model::metrics::{MemberStat, Metrics};
use crate::model::period::Period;
use crate::model::task::{Task, TaskStatus};
use crate::search::filter::FilteredView;
use crate::service::board_service::BoardSnapshot;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Row-oriented report for one task set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub team_performance: Vec<TeamPerformanceRow>,
    pub detailed_tasks: Vec<DetailedTaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub board_name: String,
    pub period: Option<Period>,
    /// Evaluation instant of the snapshot the report was built from.
    pub generated_at: DateTime<Utc>,
    pub total_tasks: usize,
    pub total_members: usize,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub in_progress_tasks: usize,
    pub overdue_tasks: usize,
    pub completion_rate: u32,
    pub avg_days_late: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformanceRow {
    pub member_id: String,
    pub member: String,
    pub total_tasks: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub completion_rate: u32,
    pub avg_days_late: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedTaskRow {
    pub task_id: String,
    /// Assignee names joined by `", "`, or `"Unassigned"`.
    pub member: String,
    pub task_name: String,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub status_label: String,
    pub days_late: u32,
    pub observations: String,
}

impl Report {
    /// Report over every retained task of `snapshot`.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self::build(snapshot, &snapshot.cards, &snapshot.metrics)
    }

    /// Report over a filtered view taken from `snapshot`.
    pub fn from_view(snapshot: &BoardSnapshot, view: &FilteredView) -> Self {
        Self::build(snapshot, &view.cards, &view.metrics)
    }

    fn build(snapshot: &BoardSnapshot, cards: &[Arc<Task>], metrics: &Metrics) -> Self {
        Self {
            metadata: ReportMetadata {
                board_name: snapshot.board_info.name.clone(),
                period: snapshot.period,
                generated_at: snapshot.evaluated_at,
                total_tasks: metrics.total,
                total_members: metrics.member_stats.len(),
                version: crate::core_version().to_string(),
            },
            summary: ReportSummary {
                total_tasks: metrics.total,
                completed_tasks: metrics.completed,
                in_progress_tasks: metrics.in_progress,
                overdue_tasks: metrics.overdue,
                completion_rate: metrics.completed_percentage,
                avg_days_late: metrics.avg_days_late,
            },
            team_performance: metrics.member_stats.iter().map(team_row).collect(),
            detailed_tasks: cards.iter().map(|task| task_row(task)).collect(),
        }
    }
}

fn team_row(stat: &MemberStat) -> TeamPerformanceRow {
    TeamPerformanceRow {
        member_id: stat.member.id.clone(),
        member: stat.member.full_name.clone(),
        total_tasks: stat.total,
        completed: stat.completed,
        in_progress: stat.in_progress,
        overdue: stat.overdue,
        completion_rate: stat.completion_rate(),
        avg_days_late: stat.avg_days_late.round() as u32,
    }
}

fn task_row(task: &Task) -> DetailedTaskRow {
    DetailedTaskRow {
        task_id: task.id.clone(),
        member: task.responsible(),
        task_name: task.name.clone(),
        due_date: task.due_date.map(|due| due.date_naive()),
        status: task.status,
        status_label: task.status.label().to_string(),
        days_late: task.days_late,
        observations: task.observations.clone(),
    }
}
