//! Server refresh reconciliation: wholesale replacement when idle,
//! stability mid-drag, and the post-drop protection window that keeps a
//! just-dropped task from snapping back to its persisted position.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::redundant_clone)]

use chrono::{TimeZone, Utc};

use taskboard::api::memory::InMemoryApi;
use taskboard::board::{BoardController, DropOutcome};
use taskboard::notify::RecordingNotifier;
use taskboard_proto::payload::{DragPayload, encode};
use taskboard_proto::task::{Task, TaskId, TaskPriority, TaskStatus};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_task(id: &str, status: TaskStatus) -> Task {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).single().unwrap();
    Task {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        description: "details".to_string(),
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        created_at: at,
        updated_at: at,
    }
}

fn make_board(tasks: Vec<Task>) -> BoardController<InMemoryApi, RecordingNotifier> {
    let api = InMemoryApi::seeded(tasks.clone());
    BoardController::new(tasks, api, RecordingNotifier::new())
}

fn payload(id: &str, status: TaskStatus) -> String {
    encode(&DragPayload::new(TaskId::new(id), status)).unwrap()
}

fn ids(board: &BoardController<InMemoryApi, RecordingNotifier>) -> Vec<String> {
    board.tasks().iter().map(|t| t.id.to_string()).collect()
}

/// Runs a confirmed cross-column drop, leaving the protection window open.
async fn confirmed_drop(
    board: &mut BoardController<InMemoryApi, RecordingNotifier>,
    id: &str,
    from: TaskStatus,
    to: TaskStatus,
) {
    board.on_drag_start(TaskId::new(id));
    let outcome = board.on_drop(&payload(id, from), to).await;
    assert_eq!(outcome, DropOutcome::Confirmed);
    assert!(board.session().protected().is_some());
}

// ---------------------------------------------------------------------------
// Refresh while idle / dragging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn idle_refresh_replaces_the_local_list() {
    let mut board = make_board(vec![make_task("a", TaskStatus::Todo)]);

    let server = vec![
        make_task("b", TaskStatus::InProgress),
        make_task("a", TaskStatus::Todo),
    ];
    board.apply_server_refresh(server.clone());

    assert_eq!(board.tasks(), server.as_slice());
}

#[tokio::test]
async fn refresh_mid_drag_leaves_the_local_list_alone() {
    let mut board = make_board(vec![
        make_task("a", TaskStatus::Todo),
        make_task("b", TaskStatus::Todo),
    ]);

    board.on_drag_start(TaskId::new("a"));
    board.apply_server_refresh(vec![make_task("b", TaskStatus::Todo)]);

    // Visual stability while the card is in the air.
    assert_eq!(ids(&board), vec!["a", "b"]);

    // Once the drag is cancelled the next refresh lands normally.
    board.on_drag_end();
    board.apply_server_refresh(vec![make_task("b", TaskStatus::Todo)]);
    assert_eq!(ids(&board), vec!["b"]);
}

// ---------------------------------------------------------------------------
// The protection window after a drop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn protected_refresh_keeps_local_order_but_takes_server_fields() {
    let mut board = make_board(vec![
        make_task("a", TaskStatus::Todo),
        make_task("b", TaskStatus::InProgress),
    ]);

    confirmed_drop(&mut board, "a", TaskStatus::Todo, TaskStatus::InProgress).await;
    assert_eq!(ids(&board), vec!["a", "b"]);

    // The refresh triggered by that update still lists the persisted
    // creation order (a after b) and carries a server-side rename.
    let mut server_a = make_task("a", TaskStatus::InProgress);
    server_a.title = "Renamed on server".to_string();
    let server = vec![make_task("b", TaskStatus::InProgress), server_a];
    board.apply_server_refresh(server);

    // No snap-back: a stays on top, with the server's fields.
    assert_eq!(ids(&board), vec!["a", "b"]);
    assert_eq!(board.tasks()[0].title, "Renamed on server");
    assert!(board.session().protected().is_none());
}

#[tokio::test]
async fn protected_task_missing_from_server_is_not_pruned() {
    let mut board = make_board(vec![
        make_task("a", TaskStatus::Todo),
        make_task("b", TaskStatus::Todo),
    ]);

    confirmed_drop(&mut board, "a", TaskStatus::Todo, TaskStatus::Completed).await;

    // A refresh that is missing the just-dropped task (e.g. a stale
    // replica) must not erase it while the protection window is open.
    board.apply_server_refresh(vec![make_task("b", TaskStatus::Todo)]);

    assert!(board.tasks().iter().any(|t| t.id == TaskId::new("a")));
}

#[tokio::test]
async fn protection_window_ends_after_one_refresh() {
    let mut board = make_board(vec![
        make_task("a", TaskStatus::Todo),
        make_task("b", TaskStatus::InProgress),
    ]);

    confirmed_drop(&mut board, "a", TaskStatus::Todo, TaskStatus::InProgress).await;

    let server = vec![
        make_task("b", TaskStatus::InProgress),
        make_task("a", TaskStatus::InProgress),
    ];
    board.apply_server_refresh(server.clone());
    assert_eq!(ids(&board), vec!["a", "b"]);

    // The second refresh is post-drop truth and is taken as-is.
    board.apply_server_refresh(server.clone());
    assert_eq!(board.tasks(), server.as_slice());
}

#[tokio::test]
async fn protected_refresh_appends_concurrently_created_tasks() {
    let mut board = make_board(vec![make_task("a", TaskStatus::Todo)]);

    confirmed_drop(&mut board, "a", TaskStatus::Todo, TaskStatus::InProgress).await;

    let server = vec![
        make_task("new-1", TaskStatus::Todo),
        make_task("a", TaskStatus::InProgress),
        make_task("new-2", TaskStatus::Completed),
    ];
    board.apply_server_refresh(server);

    assert_eq!(ids(&board), vec!["a", "new-1", "new-2"]);
}

#[tokio::test]
async fn starting_a_new_drag_supersedes_stale_protection() {
    let mut board = make_board(vec![
        make_task("a", TaskStatus::Todo),
        make_task("b", TaskStatus::Todo),
    ]);

    confirmed_drop(&mut board, "a", TaskStatus::Todo, TaskStatus::InProgress).await;
    assert!(board.session().protected().is_some());

    board.on_drag_start(TaskId::new("b"));
    assert!(board.session().protected().is_none());
}
