//! `Taskboard` — kanban board core with optimistic drag-and-drop state.

pub mod api;
pub mod board;
pub mod config;
pub mod notify;
