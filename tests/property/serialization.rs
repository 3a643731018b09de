//! Property-based serialization round-trip tests for the task wire types.
//!
//! Uses proptest to verify:
//! 1. Any valid `Task` survives a JSON round-trip.
//! 2. Any valid `DragPayload` survives encode → parse.
//! 3. Arbitrary strings never cause a panic in `payload::parse` (they
//!    return `Err` gracefully).

use chrono::{DateTime, NaiveDate, Utc};
use proptest::prelude::*;

use taskboard_proto::payload::{self, DragPayload};
use taskboard_proto::task::{Task, TaskId, TaskPriority, TaskStatus};

// --- Arbitrary implementations for protocol types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    "[a-zA-Z0-9-]{1,36}".prop_map(TaskId::new)
}

/// Strategy for generating arbitrary `TaskStatus` values.
fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

/// Strategy for generating arbitrary `TaskPriority` values.
fn arb_priority() -> impl Strategy<Value = TaskPriority> {
    prop_oneof![
        Just(TaskPriority::Low),
        Just(TaskPriority::Medium),
        Just(TaskPriority::High),
    ]
}

/// Strategy for generating arbitrary UTC timestamps (second precision,
/// which is all the wire format needs to preserve here).
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=4_102_444_800)
        .prop_filter_map("valid unix timestamp", |secs| DateTime::from_timestamp(secs, 0))
}

/// Strategy for generating arbitrary optional due dates.
fn arb_due_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((2020i32..2040, 1u32..=12, 1u32..=28).prop_filter_map(
        "valid calendar date",
        |(y, m, d)| NaiveDate::from_ymd_opt(y, m, d),
    ))
}

/// Strategy for generating arbitrary `Task` values.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        "[^\x00]{1,64}",
        "[^\x00]{0,256}",
        arb_status(),
        arb_priority(),
        arb_due_date(),
        arb_timestamp(),
        arb_timestamp(),
    )
        .prop_map(
            |(id, title, description, status, priority, due_date, created_at, updated_at)| Task {
                id,
                title,
                description,
                status,
                priority,
                due_date,
                created_at,
                updated_at,
            },
        )
}

proptest! {
    #[test]
    fn task_round_trips_through_json(task in arb_task()) {
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(task, decoded);
    }

    #[test]
    fn drag_payload_round_trips(id in arb_task_id(), status in arb_status()) {
        let original = DragPayload::new(id, status);
        let raw = payload::encode(&original).unwrap();
        let parsed = payload::parse(&raw).unwrap();
        prop_assert_eq!(original, parsed);
    }

    #[test]
    fn parse_never_panics_on_arbitrary_input(raw in ".*") {
        // Malformed payloads must come back as Err, never a panic.
        let _ = payload::parse(&raw);
    }

    #[test]
    fn status_wire_strings_are_stable(status in arb_status()) {
        let wire = serde_json::to_string(&status).unwrap();
        prop_assert_eq!(wire, format!("\"{status}\""));
    }
}
