//! Derived performance metrics.
//!
//! Metrics are pure derived data: always recomputable from a task slice and
//! never stored apart from the view that produced them.

use crate::model::task::{MemberProfile, TaskStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Overall and per-member counters for one task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    /// Integer in `[0, 100]`; `0` when `total == 0`.
    pub completed_percentage: u32,
    pub in_progress_percentage: u32,
    pub overdue_percentage: u32,
    /// Rounded mean of `days_late` over every task, late or not.
    pub avg_days_late: u32,
    pub member_stats: Vec<MemberStat>,
}

/// Per-member counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStat {
    pub member: Arc<MemberProfile>,
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    /// Running average updated on late tasks only; see `aggregate`.
    pub avg_days_late: f64,
}

impl MemberStat {
    pub(crate) fn new(member: Arc<MemberProfile>) -> Self {
        Self {
            member,
            total: 0,
            completed: 0,
            in_progress: 0,
            overdue: 0,
            avg_days_late: 0.0,
        }
    }

    /// Number of this member's tasks in `status`.
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Completed => self.completed,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Overdue => self.overdue,
        }
    }

    /// `round(completed / total * 100)`, or `0` for an empty stat.
    pub fn completion_rate(&self) -> u32 {
        percentage(self.completed, self.total)
    }
}

impl Metrics {
    /// Number of tasks in `status`.
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Completed => self.completed,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Overdue => self.overdue,
        }
    }

    /// Looks up the stat row of one member id.
    pub fn member_stat(&self, member_id: &str) -> Option<&MemberStat> {
        self.member_stats
            .iter()
            .find(|stat| stat.member.id == member_id)
    }
}

/// `round(count / total * 100)`, defined as `0` when `total == 0`.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
