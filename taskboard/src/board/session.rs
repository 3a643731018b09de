//! The ephemeral drag session state machine.
//!
//! Tracks which task is being dragged, which column is highlighted, and
//! whether a server write for a drop is still outstanding. All
//! transitions are pure methods on [`DragSession`], so every path is
//! deterministic and unit-testable without a UI framework.

use taskboard_proto::task::{TaskId, TaskStatus};

/// Where the session is in the drag lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase {
    /// Nothing is being dragged.
    Idle,
    /// A task is mid-drag.
    Dragging {
        /// Identity of the dragged task.
        task_id: TaskId,
    },
    /// A drop (or button-driven status change) happened and the server
    /// write has not resolved yet. Gates all further mutations.
    AwaitingConfirm {
        /// Identity of the task being written.
        task_id: TaskId,
        /// The status the write moves it to.
        target: TaskStatus,
    },
}

/// Ephemeral, client-only drag state. One per board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    phase: DragPhase,
    /// The column currently highlighted as a drop target.
    hovered_column: Option<TaskStatus>,
    /// Task whose local position is protected from stale server refreshes.
    protected: Option<TaskId>,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            hovered_column: None,
            protected: None,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// True while a task is mid-drag.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// True while a server write is outstanding.
    #[must_use]
    pub const fn is_updating(&self) -> bool {
        matches!(self.phase, DragPhase::AwaitingConfirm { .. })
    }

    /// Identity of the dragged task, if any.
    #[must_use]
    pub const fn dragging_task(&self) -> Option<&TaskId> {
        match &self.phase {
            DragPhase::Dragging { task_id } => Some(task_id),
            _ => None,
        }
    }

    /// The column currently highlighted as a drop target.
    #[must_use]
    pub const fn hovered_column(&self) -> Option<TaskStatus> {
        self.hovered_column
    }

    /// Task currently protected from stale server refreshes.
    #[must_use]
    pub const fn protected(&self) -> Option<&TaskId> {
        self.protected.as_ref()
    }

    /// Drag start: records the dragged task's identity.
    ///
    /// Ignored while a server write is outstanding; the gate applies to
    /// starting a new drag just as it does to dropping one.
    pub fn start(&mut self, task_id: TaskId) {
        if self.is_updating() {
            return;
        }
        self.phase = DragPhase::Dragging { task_id };
    }

    /// Drag over a column: updates the highlight. No-op unless dragging.
    pub fn hover(&mut self, column: TaskStatus) {
        if self.is_dragging() {
            self.hovered_column = Some(column);
        }
    }

    /// Drag leave. The highlight is cleared only when the pointer left
    /// the drop zone entirely; leaving a child element inside the same
    /// zone (`pointer_still_inside`) keeps it.
    pub fn leave(&mut self, pointer_still_inside: bool) {
        if !pointer_still_inside {
            self.hovered_column = None;
        }
    }

    /// Drag end (cancelled, or dropped outside any zone): back to idle.
    ///
    /// An outstanding server write is unaffected; it settles via
    /// [`complete`](Self::complete).
    pub fn end(&mut self) {
        if self.is_updating() {
            return;
        }
        self.phase = DragPhase::Idle;
        self.hovered_column = None;
    }

    /// Whether a drop carrying `payload_task_id` may proceed: dragging
    /// must be active, no server write in flight, and the payload id
    /// must match the task this session recorded at drag start. Defends
    /// against stale or forged drop payloads.
    #[must_use]
    pub fn is_drop_allowed(&self, payload_task_id: &TaskId) -> bool {
        match &self.phase {
            DragPhase::Dragging { task_id } => task_id == payload_task_id,
            _ => false,
        }
    }

    /// Enters the awaiting-confirm phase ahead of a server write.
    ///
    /// Reached from `Dragging` on a drop and from `Idle` on a
    /// button-driven status change; both share the same gate. Clears the
    /// hover highlight. Returns false (and changes nothing) if a write
    /// is already outstanding.
    pub fn begin_confirm(&mut self, task_id: TaskId, target: TaskStatus) -> bool {
        if self.is_updating() {
            return false;
        }
        self.phase = DragPhase::AwaitingConfirm { task_id, target };
        self.hovered_column = None;
        true
    }

    /// Settles the outstanding server write, success or failure.
    pub fn complete(&mut self) {
        self.phase = DragPhase::Idle;
        self.hovered_column = None;
    }

    /// Marks a task's local position as protected from server refreshes
    /// until the post-drop round-trip settles.
    pub fn protect(&mut self, task_id: TaskId) {
        self.protected = Some(task_id);
    }

    /// Ends the protection window.
    pub fn clear_protection(&mut self) {
        self.protected = None;
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}
