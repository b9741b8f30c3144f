//! Canonical task and member records.
//!
//! # Responsibility
//! - Define the normalized `Task` shape every downstream consumer reads.
//! - Define shared `MemberProfile` records referenced by tasks and stats.
//!
//! # Invariants
//! - Records are immutable after construction; derived views share them via
//!   `Arc` instead of copying.
//! - `status` is always one of the three `TaskStatus` variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed initials used when a member has no usable name.
pub const FALLBACK_INITIALS: &str = "ND";

/// Derived task state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Card sits in a list named like "done".
    Completed,
    /// Card is being worked on, or nothing marks it otherwise.
    InProgress,
    /// Due date passed and no list rule matched.
    Overdue,
}

impl TaskStatus {
    /// Wire name (`completed|in_progress|overdue`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in_progress",
            Self::Overdue => "overdue",
        }
    }

    /// Human-readable label used by reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Overdue => "Overdue",
        }
    }

    /// Parses a wire name; returns `None` for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "in_progress" => Some(Self::InProgress),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

/// Normalized board member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub initials: String,
}

impl MemberProfile {
    /// Placeholder for an assignee id missing from the board member list.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: "Unknown User".to_string(),
            username: "unknown".to_string(),
            initials: "UD".to_string(),
        }
    }

    /// Synthetic bucket for tasks nobody is assigned to.
    pub fn unassigned() -> Self {
        Self {
            id: UNASSIGNED_MEMBER_ID.to_string(),
            full_name: "Unassigned".to_string(),
            username: "unassigned".to_string(),
            initials: "UA".to_string(),
        }
    }
}

/// Member id of the synthetic unassigned bucket.
pub const UNASSIGNED_MEMBER_ID: &str = "unassigned";

/// Label carried over from the source card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub color: Option<String>,
}

/// Canonical normalized task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub due_date: Option<DateTime<Utc>>,
    pub date_last_activity: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    /// Lower-cased name of the owning list, or `"Unknown"`.
    pub list_name: String,
    /// Assignees in card order.
    pub members: Vec<Arc<MemberProfile>>,
    /// Whole days past due; independent of `status` except for `Completed`.
    pub days_late: u32,
    pub observations: String,
    pub url: String,
    pub labels: Vec<Label>,
    pub closed: bool,
}

impl Task {
    /// Instant used for period membership: last activity, else due date.
    pub fn reference_date(&self) -> Option<DateTime<Utc>> {
        self.date_last_activity.or(self.due_date)
    }

    /// Returns whether `member_id` is among the assignees.
    pub fn is_assigned_to(&self, member_id: &str) -> bool {
        self.members.iter().any(|member| member.id == member_id)
    }

    /// Assignee display names joined by `", "`, or `"Unassigned"`.
    pub fn responsible(&self) -> String {
        if self.members.is_empty() {
            return MemberProfile::unassigned().full_name;
        }
        self.members
            .iter()
            .map(|member| member.full_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Derives up-to-two-letter initials from whitespace-separated name tokens.
///
/// Returns [`FALLBACK_INITIALS`] when `name` has no tokens.
pub fn derive_initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        FALLBACK_INITIALS.to_string()
    } else {
        initials
    }
}
