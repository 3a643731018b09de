//! Board state management: drag session, ordering, and the controller.
//!
//! The drag-and-drop lifecycle is split into three layers:
//! - [`session`] — the ephemeral drag state machine (what is being
//!   dragged, which column is highlighted, whether a server write is in
//!   flight).
//! - [`ordering`] — pure functions that compute the optimistic list
//!   after a drop and reconcile server refreshes with protected local
//!   ordering.
//! - [`controller`] — composes both with the [`TaskApi`](crate::api::TaskApi)
//!   and [`Notifier`](crate::notify::Notifier) collaborators to drive
//!   optimistic updates and rollback.

pub mod controller;
pub mod ordering;
pub mod session;

pub use controller::{BoardController, DropOutcome, Operation};
pub use ordering::{merge_server_update, reorder_on_drop};
pub use session::{DragPhase, DragSession};
