//! Request types and input validation for the task API.
//!
//! Validation mirrors the server's rules so the client can reject bad
//! input before issuing a network call. Errors are collected per field
//! rather than failing on the first problem.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{TaskPriority, TaskStatus};

/// Maximum allowed title length in characters (after trimming).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed description length in characters (after trimming).
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (`title`, `description`, `general`, ...).
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input for creating a task. All fields required except the due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title (1..=200 characters after trimming).
    pub title: String,
    /// Task description (1..=1000 characters after trimming).
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Optional due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Partial update for a task. Every field optional; at least one must be
/// present for the update to be valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New priority, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    /// New due date. `Some(None)` clears an existing due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTaskRequest {
    /// Returns a patch that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

fn validate_title(title: &str) -> Result<String, FieldError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new("title", "Title cannot be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(FieldError::new(
            "title",
            format!("Title cannot exceed {MAX_TITLE_LENGTH} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> Result<String, FieldError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new("description", "Description cannot be empty"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(FieldError::new(
            "description",
            format!("Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validates and sanitizes a creation request.
///
/// Title and description are trimmed; both must be non-empty and within
/// their length limits.
///
/// # Errors
///
/// Returns every field-level problem found, not just the first.
pub fn validate_create(input: &CreateTaskRequest) -> Result<CreateTaskRequest, Vec<FieldError>> {
    let mut errors = Vec::new();
    let title = validate_title(&input.title).map_err(|e| errors.push(e)).ok();
    let description = validate_description(&input.description)
        .map_err(|e| errors.push(e))
        .ok();

    if let (Some(title), Some(description), true) = (title, description, errors.is_empty()) {
        Ok(CreateTaskRequest {
            title,
            description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
        })
    } else {
        Err(errors)
    }
}

/// Validates and sanitizes a partial update.
///
/// Only provided fields are checked; an update naming no fields at all is
/// itself invalid.
///
/// # Errors
///
/// Returns every field-level problem found, not just the first.
pub fn validate_update(input: &UpdateTaskRequest) -> Result<UpdateTaskRequest, Vec<FieldError>> {
    if input.is_empty() {
        return Err(vec![FieldError::new(
            "general",
            "At least one field must be provided for update",
        )]);
    }

    let mut errors = Vec::new();
    let mut sanitized = input.clone();

    if let Some(title) = &input.title {
        match validate_title(title) {
            Ok(t) => sanitized.title = Some(t),
            Err(e) => errors.push(e),
        }
    }
    if let Some(description) = &input.description {
        match validate_description(description) {
            Ok(d) => sanitized.description = Some(d),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() { Ok(sanitized) } else { Err(errors) }
}
