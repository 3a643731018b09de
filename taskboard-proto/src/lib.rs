//! Shared task model and wire types for `Taskboard`.

pub mod api;
pub mod payload;
pub mod task;
