//! Task API abstraction for the board core.
//!
//! Defines the [`TaskApi`] trait the board controller drives its remote
//! mutations through. Concrete implementations include:
//! - [`memory::InMemoryApi`] — in-process backend for tests and demos
//!
//! An HTTP-backed implementation belongs to the hosting application; the
//! board core only ever sees this trait.

pub mod memory;

use taskboard_proto::api::{CreateTaskRequest, FieldError, UpdateTaskRequest};
use taskboard_proto::task::{Task, TaskId};

/// Errors that can occur when talking to the task backend.
///
/// The board controller treats every variant uniformly as "operation
/// failed" — it rolls back optimistic state and surfaces a notification,
/// never interpreting individual codes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The input was rejected with field-level validation errors.
    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    /// No task exists with the given id.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend could not be reached or reported an internal failure.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the configured deadline.
    #[error("request timed out")]
    Timeout,
}

/// Async client for the task backend.
///
/// Implementations own transport and encoding; the board core hands them
/// already-validated requests and consumes [`Task`] values back. Every
/// operation may fail, and the caller is responsible for optimistic-state
/// rollback when one does.
pub trait TaskApi: Send + Sync {
    /// Fetch all tasks in the server's stable order (creation time,
    /// descending). The board treats this list as the authoritative
    /// baseline for merges and rollback.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Task>, ApiError>> + Send;

    /// Create a task. The server mints the identity and both timestamps.
    fn create(
        &self,
        input: &CreateTaskRequest,
    ) -> impl std::future::Future<Output = Result<Task, ApiError>> + Send;

    /// Apply a partial update, returning the full updated task.
    fn update(
        &self,
        id: &TaskId,
        patch: &UpdateTaskRequest,
    ) -> impl std::future::Future<Output = Result<Task, ApiError>> + Send;

    /// Delete a task, returning the deleted id on success.
    fn delete(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<TaskId, ApiError>> + Send;
}
