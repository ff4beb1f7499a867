//! Invariants of the board state machine and the filter evaluator

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashMap;
use taskboard::{
    BoardStore, LabelCatalog, Status, Task, TaskDraft, TaskFilter, TaskId, TaskboardError,
    TicketStatus,
};

// Generators for test data

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    /// Task index (mod task count), column index; 4 is not a column
    Move(usize, usize),
    Update(usize, String),
    Comment(usize, String),
}

fn column_name(index: usize) -> &'static str {
    match index {
        0 => "todo",
        1 => "in-progress",
        2 => "review",
        3 => "done",
        _ => "archive",
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Op::Add),
        (any::<usize>(), 0usize..5).prop_map(|(t, c)| Op::Move(t, c)),
        (any::<usize>(), "[a-z]{1,8}").prop_map(|(t, s)| Op::Update(t, s)),
        (any::<usize>(), "[a-z ]{0,8}").prop_map(|(t, s)| Op::Comment(t, s)),
    ]
}

fn counts(store: &BoardStore) -> HashMap<Status, usize> {
    store
        .board()
        .columns()
        .iter()
        .map(|c| (c.id, c.len()))
        .collect()
}

fn pick(store: &BoardStore, index: usize) -> Option<TaskId> {
    let ids: Vec<_> = store.board().tasks().map(|t| t.id.clone()).collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        0i64..30,
        prop::option::of(prop::sample::select(vec!["Ann Lee", "bob", "JOANNA", ""])),
        prop::option::of(prop::sample::select(vec!["Acme", "Initech", "acme west"])),
        prop::option::of(prop::sample::select(TicketStatus::ALL.to_vec())),
        prop::collection::vec(prop::sample::select(vec!["1", "2", "3", "4", "5"]), 0..3),
    )
        .prop_map(|(day, assignee, client, ticket, label_ids)| {
            let catalog = LabelCatalog::default();
            let mut task = Task::new("generated")
                .with_created_at(base_time() + Duration::days(day))
                .with_labels(
                    label_ids
                        .iter()
                        .filter_map(|id| catalog.get(id).cloned())
                        .collect(),
                );
            task.assignee = assignee.map(str::to_string);
            task.client_name = client.map(str::to_string);
            task.ticket_status = ticket;
            task
        })
}

fn filter_strategy() -> impl Strategy<Value = TaskFilter> {
    (
        prop::option::of(0i64..30),
        prop::option::of(0i64..30),
        prop::option::of(prop::sample::select(vec!["ann", "BOB", "o", ""])),
        prop::option::of(prop::collection::vec(
            prop::sample::select(vec!["1", "2", "3", "4", "5"]),
            0..3,
        )),
        prop::option::of(prop::sample::select(vec!["acme", "INIT", ""])),
        prop::option::of(prop::sample::select(TicketStatus::ALL.to_vec())),
    )
        .prop_map(|(from, to, assignee, labels, client, ticket)| TaskFilter {
            date_from: from.map(|d| base_time() + Duration::days(d)),
            date_to: to.map(|d| base_time() + Duration::days(d)),
            assignee: assignee.map(str::to_string),
            labels: labels.map(|ids| ids.into_iter().map(Into::into).collect()),
            client_name: client.map(str::to_string),
            ticket_status: ticket,
        })
}

/// `base` with every unset field filled from `extra`
fn tighten(base: &TaskFilter, extra: &TaskFilter) -> TaskFilter {
    TaskFilter {
        date_from: base.date_from.or(extra.date_from),
        date_to: base.date_to.or(extra.date_to),
        assignee: base.assignee.clone().or_else(|| extra.assignee.clone()),
        labels: base.labels.clone().or_else(|| extra.labels.clone()),
        client_name: base.client_name.clone().or_else(|| extra.client_name.clone()),
        ticket_status: base.ticket_status.or(extra.ticket_status),
    }
}

proptest! {
    /// Property: every task sits in exactly one column matching its status
    #[test]
    fn prop_partition_invariant_holds(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = BoardStore::new();
        let mut created = 0usize;

        for op in ops {
            let before = counts(&store);
            let total_before = store.board().task_count();

            match op {
                Op::Add(title) => {
                    store.create_task(TaskDraft::new(title)).unwrap();
                    created += 1;
                }
                Op::Move(t, c) => {
                    if let Some(id) = pick(&store, t) {
                        let result = store.move_task(id.clone(), column_name(c));
                        if c < 4 {
                            let moved = result.unwrap();
                            prop_assert_eq!(moved.status.as_str(), column_name(c));
                        } else {
                            let rejected = matches!(
                                result,
                                Err(TaskboardError::InvalidTargetColumn { .. })
                            );
                            prop_assert!(rejected);
                            prop_assert!(store.board().find_task(&id).is_some());
                        }
                    }
                }
                Op::Update(t, title) => {
                    if let Some(id) = pick(&store, t) {
                        let (_, task) = store.board().find_task(&id).unwrap();
                        let mut edited = (**task).clone();
                        edited.title = title;
                        store.update_task(edited).unwrap();
                        prop_assert_eq!(counts(&store), before.clone());
                    }
                }
                Op::Comment(t, content) => {
                    if let Some(id) = pick(&store, t) {
                        let result = store.add_comment(id, content.clone());
                        prop_assert_eq!(result.is_ok(), !content.trim().is_empty());
                        prop_assert_eq!(counts(&store), before.clone());
                    }
                }
            }

            prop_assert!(store.board().is_consistent());
            prop_assert!(store.board().task_count() >= total_before);
        }

        // Tasks are never deleted
        prop_assert_eq!(store.board().task_count(), created);
    }

    /// Property: the empty filter accepts every task
    #[test]
    fn prop_empty_filter_accepts_all(task in task_strategy()) {
        prop_assert!(TaskFilter::new().matches(&task));
    }

    /// Property: adding constraints never widens the accepted set
    #[test]
    fn prop_filter_is_monotone(
        tasks in prop::collection::vec(task_strategy(), 0..20),
        base in filter_strategy(),
        extra in filter_strategy(),
    ) {
        let tighter = tighten(&base, &extra);
        for task in &tasks {
            if tighter.matches(task) {
                prop_assert!(base.matches(task));
            }
        }
    }
}

#[test]
fn test_create_then_move_scenario() {
    let mut store = BoardStore::new();
    for status in Status::ALL {
        assert!(store.board().column(status).unwrap().is_empty());
    }

    let a = store.create_task(TaskDraft::new("A")).unwrap();
    let todo = store.board().column(Status::Todo).unwrap();
    assert_eq!(todo.len(), 1);
    assert_eq!(todo.tasks[0].title, "A");

    store.move_task(a.id.clone(), "in-progress").unwrap();
    assert!(store.board().column(Status::Todo).unwrap().is_empty());
    let in_progress = store.board().column(Status::InProgress).unwrap();
    assert_eq!(in_progress.len(), 1);
    assert_eq!(in_progress.tasks[0].id, a.id);
    assert_eq!(in_progress.tasks[0].status, Status::InProgress);
}

#[test]
fn test_assignee_filter_scenario() {
    let filter = TaskFilter::new().with_assignee("ann");
    assert!(!filter.matches(&Task::new("unassigned")));
    assert!(filter.matches(&Task::new("assigned").with_assignee("Ann Lee")));
}

#[test]
fn test_move_round_trip_restores_column() {
    let mut store = BoardStore::new();
    let a = store.create_task(TaskDraft::new("A")).unwrap();
    store.create_task(TaskDraft::new("B")).unwrap();

    store.move_task(a.id.clone(), Status::Done).unwrap();
    store.move_task(a.id.clone(), Status::Todo).unwrap();

    let todo = store.board().column(Status::Todo).unwrap();
    let titles: Vec<_> = todo.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);
}

#[test]
fn test_visible_board_per_column() {
    let mut store = BoardStore::new();
    let a = store
        .create_task(TaskDraft::new("A").with_client_name("Acme"))
        .unwrap();
    store
        .create_task(TaskDraft::new("B").with_client_name("Initech"))
        .unwrap();
    store.move_task(a.id.clone(), "review").unwrap();

    let visible = store.visible(&TaskFilter::new().with_client_name("acme"));
    assert!(visible.column(Status::Todo).unwrap().is_empty());
    assert_eq!(visible.column(Status::Review).unwrap().len(), 1);
    assert_eq!(store.board().task_count(), 2);
}
