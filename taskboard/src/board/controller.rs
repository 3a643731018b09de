//! The board controller: optimistic updates, rollback, and the gate.
//!
//! Composes the [`DragSession`] state machine and the pure ordering
//! functions with the injected [`TaskApi`] and [`Notifier`]
//! collaborators. Local reordering is always applied before the network
//! call is issued; a failed call restores the last externally-supplied
//! list through a single rollback site.

use chrono::Utc;

use taskboard_proto::api::{CreateTaskRequest, UpdateTaskRequest};
use taskboard_proto::payload;
use taskboard_proto::task::{Task, TaskId, TaskStatus};

use crate::api::{ApiError, TaskApi};
use crate::config::ApiConfig;
use crate::notify::Notifier;

use super::ordering::{merge_server_update, reorder_on_drop};
use super::session::DragSession;

/// Which non-drag mutation is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `TaskApi::create` outstanding.
    Create,
    /// `TaskApi::update` outstanding.
    Update,
    /// `TaskApi::delete` outstanding.
    Delete,
}

/// How a drop was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop was defensively rejected (malformed payload, stale
    /// session, unknown task, or an update already in flight).
    Ignored,
    /// The task was reordered locally; the status did not change, so no
    /// remote call was issued.
    LocalOnly,
    /// The optimistic reorder was confirmed by the server.
    Confirmed,
    /// The remote update failed; local state was reverted to the last
    /// server-provided list.
    RolledBack,
}

/// Drives a single user's task board.
///
/// Owns the local task list (the optimistic view), the last
/// externally-supplied server list (the rollback target and merge
/// baseline), and the drag session. Single logical writer: calls are
/// serialized by the hosting event loop, and the `is_updating` gate
/// rejects a second status mutation while one is awaiting confirmation.
pub struct BoardController<A, N> {
    tasks: Vec<Task>,
    /// Last externally-supplied list; the one rollback target.
    baseline: Vec<Task>,
    session: DragSession,
    busy: Option<Operation>,
    config: ApiConfig,
    api: A,
    notifier: N,
}

impl<A: TaskApi, N: Notifier> BoardController<A, N> {
    /// Creates a controller seeded with a server-fetched task list.
    pub fn new(initial: Vec<Task>, api: A, notifier: N) -> Self {
        Self::with_config(initial, api, notifier, ApiConfig::default())
    }

    /// Creates a controller with explicit API settings.
    pub fn with_config(initial: Vec<Task>, api: A, notifier: N, config: ApiConfig) -> Self {
        Self {
            tasks: initial.clone(),
            baseline: initial,
            session: DragSession::new(),
            busy: None,
            config,
            api,
            notifier,
        }
    }

    /// The current local task list, in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks belonging to one board column, in display order.
    pub fn column(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// Read access to the drag session (for rendering highlights).
    #[must_use]
    pub const fn session(&self) -> &DragSession {
        &self.session
    }

    /// The non-drag mutation currently in flight, if any.
    #[must_use]
    pub const fn busy(&self) -> Option<Operation> {
        self.busy
    }

    /// Read access to the injected API client.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Read access to the injected notifier.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    // -- drag lifecycle ----------------------------------------------------

    /// Drag started on a task card.
    ///
    /// Starting a new drag supersedes any protection left from the
    /// previous drop; the new gesture is the latest local intent.
    pub fn on_drag_start(&mut self, task_id: TaskId) {
        tracing::debug!(task_id = %task_id, "drag start");
        if !self.session.is_updating() {
            self.session.clear_protection();
        }
        self.session.start(task_id);
    }

    /// Pointer dragged over a column.
    pub fn on_drag_over(&mut self, column: TaskStatus) {
        self.session.hover(column);
    }

    /// Pointer left a drop zone (or moved between its children).
    pub fn on_drag_leave(&mut self, pointer_still_inside: bool) {
        self.session.leave(pointer_still_inside);
    }

    /// Drag cancelled or dropped outside any zone.
    pub fn on_drag_end(&mut self) {
        self.session.end();
    }

    /// A drop landed on `target` carrying the raw drag payload.
    ///
    /// The optimistic reorder is applied synchronously for instant
    /// feedback; the remote write is only issued when the status
    /// actually changed. A failure reverts to the last
    /// externally-supplied list and surfaces one error notification.
    pub async fn on_drop(&mut self, raw_payload: &str, target: TaskStatus) -> DropOutcome {
        let payload = match payload::parse(raw_payload) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed drop payload");
                return DropOutcome::Ignored;
            }
        };

        if !self.session.is_drop_allowed(&payload.task_id) {
            // Deliberately leaves an active drag running: a payload that
            // names a different task is stale noise, and ending the
            // gesture here would swallow the genuine drop that follows.
            tracing::debug!(task_id = %payload.task_id, "drop not allowed, ignoring");
            return DropOutcome::Ignored;
        }

        let Some(reordered) = reorder_on_drop(&self.tasks, &payload.task_id, target, Utc::now())
        else {
            tracing::debug!(task_id = %payload.task_id, "dropped task not in local list");
            self.session.end();
            return DropOutcome::Ignored;
        };

        // Instant visual feedback, before any network I/O.
        self.tasks = reordered;

        if payload.current_status == target {
            // Same column: nothing to persist, settle immediately.
            self.session.end();
            return DropOutcome::LocalOnly;
        }

        let task_id = payload.task_id.clone();
        self.session.protect(task_id.clone());
        self.session.begin_confirm(task_id.clone(), target);

        let result = self
            .call_remote(self.api.update(&task_id, &UpdateTaskRequest::status(target)))
            .await;
        self.session.complete();

        match result {
            Ok(task) => {
                // Protection stays on past the confirmation. The
                // controller is serialized through `&mut self`, so no
                // refresh can land while the write is in flight; the
                // refresh this very update triggers arrives after this
                // method returns, still carrying the pre-drop ordering.
                // Clearing here would let that refresh snap the task
                // back. `apply_server_refresh` merges once under
                // protection and then ends the window.
                self.absorb(task);
                self.notifier.success("Task updated");
                DropOutcome::Confirmed
            }
            Err(e) => {
                tracing::warn!(task_id = %task_id, error = %e, "drop update failed, rolling back");
                self.session.clear_protection();
                self.rollback();
                self.notifier.error("Failed to update task");
                DropOutcome::RolledBack
            }
        }
    }

    // -- non-drag operations -----------------------------------------------

    /// Status changed through the card's buttons rather than a drag.
    ///
    /// Shares the in-flight gate with drops. No optimistic reorder: the
    /// card stays where it is and only its fields change on success.
    pub async fn on_status_change(&mut self, task_id: TaskId, status: TaskStatus) -> bool {
        if self.session.is_updating() {
            tracing::debug!(task_id = %task_id, "status change rejected, update in flight");
            return false;
        }
        if !self.tasks.iter().any(|t| t.id == task_id) {
            tracing::debug!(task_id = %task_id, "status change for unknown task");
            return false;
        }

        self.session.begin_confirm(task_id.clone(), status);
        let result = self
            .call_remote(self.api.update(&task_id, &UpdateTaskRequest::status(status)))
            .await;
        self.session.complete();

        match result {
            Ok(task) => {
                self.absorb(task);
                self.notifier.success("Task updated");
                true
            }
            Err(e) => {
                tracing::warn!(task_id = %task_id, error = %e, "status change failed");
                self.notifier.error("Failed to update status");
                false
            }
        }
    }

    /// Creates a task. The server's copy is prepended, matching the
    /// creation-time-descending list order.
    pub async fn on_create(&mut self, input: CreateTaskRequest) -> Option<Task> {
        if self.busy.is_some() {
            tracing::debug!("create rejected, operation in flight");
            return None;
        }

        self.busy = Some(Operation::Create);
        let result = self.call_remote(self.api.create(&input)).await;
        self.busy = None;

        match result {
            Ok(task) => {
                self.tasks.insert(0, task.clone());
                self.baseline.insert(0, task.clone());
                self.notifier.success("Task created");
                Some(task)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed");
                self.notifier.error("Failed to create task");
                None
            }
        }
    }

    /// Edits a task's fields. Position is unchanged.
    pub async fn on_edit(&mut self, task_id: TaskId, patch: UpdateTaskRequest) -> Option<Task> {
        if self.busy.is_some() {
            tracing::debug!(task_id = %task_id, "edit rejected, operation in flight");
            return None;
        }

        self.busy = Some(Operation::Update);
        let result = self.call_remote(self.api.update(&task_id, &patch)).await;
        self.busy = None;

        match result {
            Ok(task) => {
                self.absorb(task.clone());
                self.notifier.success("Task updated");
                Some(task)
            }
            Err(e) => {
                tracing::warn!(task_id = %task_id, error = %e, "edit failed");
                self.notifier.error("Failed to update task");
                None
            }
        }
    }

    /// Deletes a task.
    pub async fn on_delete(&mut self, task_id: TaskId) -> bool {
        if self.busy.is_some() {
            tracing::debug!(task_id = %task_id, "delete rejected, operation in flight");
            return false;
        }

        self.busy = Some(Operation::Delete);
        let result = self.call_remote(self.api.delete(&task_id)).await;
        self.busy = None;

        match result {
            Ok(deleted) => {
                self.tasks.retain(|t| t.id != deleted);
                self.baseline.retain(|t| t.id != deleted);
                self.notifier.success("Task deleted");
                true
            }
            Err(e) => {
                tracing::warn!(task_id = %task_id, error = %e, "delete failed");
                self.notifier.error("Failed to delete task");
                false
            }
        }
    }

    // -- refresh -----------------------------------------------------------

    /// A server-confirmed list arrived (poll, revalidation, ...).
    ///
    /// The baseline always advances. The local view is replaced outright
    /// when idle, left untouched mid-drag, and merged field-wise while a
    /// recent drop is protected so the dropped task does not snap back
    /// to its persisted position. Reconciling a refresh is what ends the
    /// protection window: the list that arrives after that carries the
    /// post-drop state and may be taken as-is.
    pub fn apply_server_refresh(&mut self, server: Vec<Task>) {
        if self.session.protected().is_some() {
            self.tasks = merge_server_update(&self.tasks, &server);
            self.session.clear_protection();
        } else if !self.session.is_dragging() {
            self.tasks = server.clone();
        }
        self.baseline = server;
    }

    // -- internals ---------------------------------------------------------

    /// The one place optimistic state is discarded.
    fn rollback(&mut self) {
        self.tasks = self.baseline.clone();
    }

    /// Replaces the stored copy of a task with the server's field set,
    /// keeping its position in both lists.
    fn absorb(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task.clone();
        }
        if let Some(slot) = self.baseline.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    /// Applies the configured deadline to a backend call.
    async fn call_remote<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match tokio::time::timeout(self.config.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout),
        }
    }
}
