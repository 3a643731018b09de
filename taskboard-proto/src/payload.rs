//! Drag payload wire format.
//!
//! Browsers carry drag data as an opaque string; this module gives it an
//! explicit tagged structure with a fallible parse step, so a stale or
//! malformed payload is a value the caller can reject instead of a
//! silently wrong shape.

use serde::{Deserialize, Serialize};

use crate::task::{TaskId, TaskStatus};

/// Error type for drag payload encode/parse operations.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Serialization or deserialization failed.
    #[error("drag payload error: {0}")]
    Serialization(String),
}

/// The data attached to a drag: which task is moving and which column it
/// currently lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    /// Identity of the dragged task.
    pub task_id: TaskId,
    /// The task's status at drag start, used to detect same-column drops.
    pub current_status: TaskStatus,
}

impl DragPayload {
    /// Creates a payload for the given task and its current column.
    #[must_use]
    pub const fn new(task_id: TaskId, current_status: TaskStatus) -> Self {
        Self {
            task_id,
            current_status,
        }
    }
}

/// Encodes a [`DragPayload`] into its JSON string form.
///
/// # Errors
///
/// Returns `PayloadError::Serialization` if the payload cannot be
/// serialized.
pub fn encode(payload: &DragPayload) -> Result<String, PayloadError> {
    serde_json::to_string(payload).map_err(|e| PayloadError::Serialization(e.to_string()))
}

/// Parses a [`DragPayload`] from the raw string a drop event carries.
///
/// # Errors
///
/// Returns `PayloadError::Serialization` if the string is not a valid
/// payload.
pub fn parse(raw: &str) -> Result<DragPayload, PayloadError> {
    serde_json::from_str(raw).map_err(|e| PayloadError::Serialization(e.to_string()))
}
