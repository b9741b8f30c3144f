//! Re-filtering of normalized tasks.
//!
//! # Responsibility
//! - Narrow an existing task set by status, assignee and free text.
//! - Recompute metrics for the narrowed set without re-normalizing.
//!
//! # Invariants
//! - Filtering never mutates or copies tasks; views share the same `Arc`s.
//! - Blank member or search values disable that criterion.

use crate::model::metrics::Metrics;
use crate::model::task::{MemberProfile, Task, TaskStatus};
use crate::service::metrics::aggregate;
use serde::Serialize;
use std::sync::Arc;

/// Criteria applied together (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Member id that must be among the assignees.
    pub member: Option<String>,
    /// Case-insensitive substring of task name or observations.
    pub search: Option<String>,
}

impl TaskFilter {
    /// Filter that keeps every task.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_member(mut self, member_id: impl Into<String>) -> Self {
        self.member = Some(member_id.into());
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Returns whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.member_id().is_none() && self.search_text().is_none()
    }

    fn member_id(&self) -> Option<&str> {
        self.member.as_deref().filter(|member| !member.is_empty())
    }

    fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|text| !text.is_empty())
    }
}

/// Filtered tasks plus metrics recomputed for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredView {
    pub cards: Vec<Arc<Task>>,
    pub metrics: Metrics,
}

/// Applies `filter` to `tasks` and aggregates the result.
///
/// `members` only orders the metric rows, as in [`aggregate`].
pub fn filter_tasks(
    tasks: &[Arc<Task>],
    members: &[Arc<MemberProfile>],
    filter: &TaskFilter,
) -> FilteredView {
    let member_id = filter.member_id();
    let needle = filter.search_text().map(str::to_lowercase);

    let cards: Vec<Arc<Task>> = tasks
        .iter()
        .filter(|task| filter.status.map_or(true, |status| task.status == status))
        .filter(|task| member_id.map_or(true, |member_id| task.is_assigned_to(member_id)))
        .filter(|task| {
            needle.as_deref().map_or(true, |needle| {
                task.name.to_lowercase().contains(needle)
                    || task.observations.to_lowercase().contains(needle)
            })
        })
        .cloned()
        .collect();

    let metrics = aggregate(&cards, members);
    FilteredView { cards, metrics }
}
