//! In-memory task backend for tests and demos.
//!
//! A fully functional [`TaskApi`] implementation over an in-process task
//! store. Keeps tasks in creation-time-descending order (the server's
//! stable list order), enforces the same validation rules as a real
//! backend, and supports one-shot failure injection so rollback paths can
//! be exercised deterministically.

use chrono::Utc;
use parking_lot::Mutex;

use taskboard_proto::api::{
    CreateTaskRequest, UpdateTaskRequest, validate_create, validate_update,
};
use taskboard_proto::task::{Task, TaskId};

use super::{ApiError, TaskApi};

/// In-process task backend backed by a `parking_lot::Mutex`.
pub struct InMemoryApi {
    state: Mutex<State>,
}

struct State {
    /// Newest first, matching the server's list order.
    tasks: Vec<Task>,
    /// Error to return from the next mutating call, then cleared.
    fail_next: Option<ApiError>,
}

impl InMemoryApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                tasks: Vec::new(),
                fail_next: None,
            }),
        }
    }

    /// Creates a backend pre-populated with the given tasks.
    ///
    /// Tasks are stored in the order given; callers that care about the
    /// server ordering contract should pass them newest-first.
    #[must_use]
    pub fn seeded(tasks: Vec<Task>) -> Self {
        let api = Self::new();
        api.state.lock().tasks = tasks;
        api
    }

    /// Makes the next mutating call fail with the given error.
    pub fn fail_next(&self, error: ApiError) {
        self.state.lock().fail_next = Some(error);
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    /// True when the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().tasks.is_empty()
    }

    fn take_injected_failure(&self) -> Option<ApiError> {
        self.state.lock().fail_next.take()
    }
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskApi for InMemoryApi {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }
        Ok(self.state.lock().tasks.clone())
    }

    async fn create(&self, input: &CreateTaskRequest) -> Result<Task, ApiError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }
        let sanitized = validate_create(input).map_err(ApiError::Validation)?;

        let now = Utc::now();
        let task = Task {
            id: TaskId::generate(),
            title: sanitized.title,
            description: sanitized.description,
            status: sanitized.status,
            priority: sanitized.priority,
            due_date: sanitized.due_date,
            created_at: now,
            updated_at: now,
        };

        // Newest first, so insert at the front.
        self.state.lock().tasks.insert(0, task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, patch: &UpdateTaskRequest) -> Result<Task, ApiError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }
        let sanitized = validate_update(patch).map_err(ApiError::Validation)?;

        let mut state = self.state.lock();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| ApiError::NotFound(id.clone()))?;

        if let Some(title) = sanitized.title {
            task.title = title;
        }
        if let Some(description) = sanitized.description {
            task.description = description;
        }
        if let Some(status) = sanitized.status {
            task.status = status;
        }
        if let Some(priority) = sanitized.priority {
            task.priority = priority;
        }
        if let Some(due_date) = sanitized.due_date {
            task.due_date = due_date;
        }
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<TaskId, ApiError> {
        if let Some(error) = self.take_injected_failure() {
            return Err(error);
        }

        let mut state = self.state.lock();
        let position = state
            .tasks
            .iter()
            .position(|t| t.id == *id)
            .ok_or_else(|| ApiError::NotFound(id.clone()))?;
        state.tasks.remove(position);
        Ok(id.clone())
    }
}
