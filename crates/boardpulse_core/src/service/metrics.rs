//! Metrics aggregation over a task slice.
//!
//! # Responsibility
//! - Count tasks per status overall and per assignee in one pass.
//! - Keep an unassigned bucket so no task escapes per-member accounting.
//!
//! # Invariants
//! - `completed + in_progress + overdue == total`.
//! - A task with N assignees is counted once for each of them.
//! - Stat rows exist only for members with at least one task.
//! - Row order: board members, then unknown assignees as first seen, then
//!   the unassigned bucket.

use crate::model::metrics::{percentage, MemberStat, Metrics};
use crate::model::task::{MemberProfile, Task, TaskStatus};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Computes overall and per-member metrics for `tasks`.
///
/// `members` seeds the row order (normally the board member list); assignees
/// missing from it still get rows, appended in first-encountered order.
pub fn aggregate(tasks: &[Arc<Task>], members: &[Arc<MemberProfile>]) -> Metrics {
    let mut stats: Vec<MemberStat> = members.iter().cloned().map(MemberStat::new).collect();
    let mut row_index: HashMap<String, usize> = HashMap::with_capacity(members.len());
    for (position, member) in members.iter().enumerate() {
        row_index.entry(member.id.clone()).or_insert(position);
    }
    let mut unassigned: Option<MemberStat> = None;

    let (mut completed, mut in_progress, mut overdue) = (0usize, 0usize, 0usize);
    let mut days_late_sum: u64 = 0;

    for task in tasks {
        match task.status {
            TaskStatus::Completed => completed += 1,
            TaskStatus::InProgress => in_progress += 1,
            TaskStatus::Overdue => overdue += 1,
        }
        days_late_sum += u64::from(task.days_late);

        if task.members.is_empty() {
            let stat = unassigned
                .get_or_insert_with(|| MemberStat::new(Arc::new(MemberProfile::unassigned())));
            record(stat, task);
            continue;
        }

        for member in &task.members {
            let position = *row_index.entry(member.id.clone()).or_insert_with(|| {
                stats.push(MemberStat::new(Arc::clone(member)));
                stats.len() - 1
            });
            record(&mut stats[position], task);
        }
    }

    stats.retain(|stat| stat.total > 0);
    stats.extend(unassigned);

    let total = tasks.len();
    let avg_days_late = if total == 0 {
        0
    } else {
        (days_late_sum as f64 / total as f64).round() as u32
    };

    debug!(
        "event=metrics_aggregated module=service status=ok total={} member_rows={}",
        total,
        stats.len()
    );

    Metrics {
        total,
        completed,
        in_progress,
        overdue,
        completed_percentage: percentage(completed, total),
        in_progress_percentage: percentage(in_progress, total),
        overdue_percentage: percentage(overdue, total),
        avg_days_late,
        member_stats: stats,
    }
}

/// Counts one task for one member.
///
/// The average is updated only for late tasks, dividing by the member's
/// running total (late or not) at that moment. Reports produced by earlier
/// versions depend on this exact figure.
fn record(stat: &mut MemberStat, task: &Task) {
    stat.total += 1;
    match task.status {
        TaskStatus::Completed => stat.completed += 1,
        TaskStatus::InProgress => stat.in_progress += 1,
        TaskStatus::Overdue => stat.overdue += 1,
    }

    if task.days_late > 0 {
        let total = stat.total as f64;
        stat.avg_days_late =
            (stat.avg_days_late * (total - 1.0) + f64::from(task.days_late)) / total;
    }
}
