//! Pure ordering and reconciliation functions for the board.
//!
//! Both functions are deterministic and side-effect-free given their
//! inputs; `reorder_on_drop` takes the clock value as a parameter so the
//! refreshed `updated_at` is reproducible in tests.
//!
//! The reconciliation rule is: last local intent wins for ordering, last
//! server response wins for field values. Without it, a full-list
//! refresh that lands during the drop-confirmation window would snap the
//! dropped task back to its persisted position, visibly undoing the
//! user's action.

use chrono::{DateTime, Utc};

use taskboard_proto::task::{Task, TaskId, TaskStatus};

/// Computes the local list after `task_id` is dropped on the `target`
/// column.
///
/// The task is removed from its current position, its status set to
/// `target` and `updated_at` to `now`, and it is re-inserted immediately
/// before the first remaining task whose status equals `target` — the
/// dropped task always becomes the topmost item of its new status group.
/// When the target group is empty it is appended at the end. The
/// relative order of every other task is preserved.
///
/// Returns `None` when no task with `task_id` exists; the caller treats
/// that as an invalid drop and ignores it.
#[must_use]
pub fn reorder_on_drop(
    tasks: &[Task],
    task_id: &TaskId,
    target: TaskStatus,
    now: DateTime<Utc>,
) -> Option<Vec<Task>> {
    let mut moved = tasks.iter().find(|t| t.id == *task_id)?.clone();
    moved.status = target;
    moved.updated_at = now;

    let mut result: Vec<Task> = tasks.iter().filter(|t| t.id != *task_id).cloned().collect();

    match result.iter().position(|t| t.status == target) {
        Some(index) => result.insert(index, moved),
        None => result.push(moved),
    }

    Some(result)
}

/// Reconciles a server-confirmed list with the local list while a recent
/// drop is still protected.
///
/// For every local task whose id exists server-side, the server's full
/// field set replaces the local copy (authoritative data wins) while the
/// task keeps its local position (ordering wins locally). Server tasks
/// absent from the local list are appended at the end in the server's
/// relative order. Tasks present only locally are kept: pruning is
/// deliberately left to the next unprotected refresh, since this merge
/// only runs transiently during the drop-confirmation window.
#[must_use]
pub fn merge_server_update(local: &[Task], server: &[Task]) -> Vec<Task> {
    let mut merged: Vec<Task> = local
        .iter()
        .map(|task| {
            server
                .iter()
                .find(|s| s.id == task.id)
                .unwrap_or(task)
                .clone()
        })
        .collect();

    merged.extend(
        server
            .iter()
            .filter(|s| !local.iter().any(|t| t.id == s.id))
            .cloned(),
    );

    merged
}
