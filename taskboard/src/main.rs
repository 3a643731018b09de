//! `Taskboard` demo — drives the board core against the in-memory backend.
//!
//! Seeds a handful of tasks, walks through a drag-and-drop with server
//! confirmation, then repeats the drop with an injected backend failure
//! to show the optimistic rollback.
//!
//! ```bash
//! cargo run --bin taskboard
//! cargo run --bin taskboard -- --seed 10 --log-level taskboard=debug
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskboard::api::memory::InMemoryApi;
use taskboard::api::{ApiError, TaskApi};
use taskboard::board::BoardController;
use taskboard::config::{CliArgs, ClientConfig};
use taskboard::notify::TracingNotifier;
use taskboard_proto::api::CreateTaskRequest;
use taskboard_proto::payload::{self, DragPayload};
use taskboard_proto::task::{Task, TaskPriority, TaskStatus};

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .init();

    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load config file, using defaults");
            ClientConfig::default()
        }
    };

    tracing::info!(seed_tasks = config.demo.seed_tasks, "taskboard demo starting");

    let api = InMemoryApi::new();
    for n in 0..config.demo.seed_tasks {
        let input = CreateTaskRequest {
            title: format!("Demo task {}", n + 1),
            description: "Seeded by the demo binary".to_string(),
            status: TaskStatus::ALL[n % TaskStatus::ALL.len()],
            priority: match n % 3 {
                0 => TaskPriority::Low,
                1 => TaskPriority::Medium,
                _ => TaskPriority::High,
            },
            due_date: None,
        };
        if let Err(e) = api.create(&input).await {
            tracing::error!(error = %e, "failed to seed demo task");
            return;
        }
    }

    let initial = match api.list().await {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch initial task list");
            return;
        }
    };

    let mut board = BoardController::with_config(initial, api, TracingNotifier, config.api);
    print_board("initial board", &board);

    // A drag-and-drop that the backend confirms.
    let Some(first_todo) = board.column(TaskStatus::Todo).next().cloned() else {
        tracing::info!("no todo tasks to drag, nothing to demo");
        return;
    };
    drag_and_drop(&mut board, &first_todo, TaskStatus::Completed).await;
    print_board("after confirmed drop", &board);

    // The same gesture, but the backend rejects the write: the board
    // reverts to the last server-provided list.
    let in_progress = board.column(TaskStatus::InProgress).next().cloned();
    if let Some(task) = in_progress {
        board
            .api()
            .fail_next(ApiError::Unavailable("demo outage".to_string()));
        drag_and_drop(&mut board, &task, TaskStatus::Todo).await;
        print_board("after rolled-back drop", &board);
    }
}

/// Runs the full drag gesture for one task.
async fn drag_and_drop(
    board: &mut BoardController<InMemoryApi, TracingNotifier>,
    task: &Task,
    target: TaskStatus,
) {
    board.on_drag_start(task.id.clone());
    board.on_drag_over(target);

    let raw = match payload::encode(&DragPayload::new(task.id.clone(), task.status)) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode drag payload");
            return;
        }
    };

    let outcome = board.on_drop(&raw, target).await;
    tracing::info!(task_id = %task.id, %target, ?outcome, "drop settled");
}

fn print_board<N: taskboard::notify::Notifier>(
    label: &str,
    board: &BoardController<InMemoryApi, N>,
) {
    println!("-- {label} --");
    for status in TaskStatus::ALL {
        println!("  [{status}]");
        for task in board.column(status) {
            println!("    {} ({})", task.title, task.priority);
        }
    }
    println!();
}
