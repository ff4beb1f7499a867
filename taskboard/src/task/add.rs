//! AddTask command

use crate::error::{Result, TaskboardError};
use crate::operation::{operation, Applied, Execute};
use crate::types::{Board, Status, TaskDraft};
use std::sync::Arc;

/// Create a new task at the tail of the `todo` column
#[derive(Debug, Clone)]
pub struct AddTask {
    pub draft: TaskDraft,
}

operation!(
    AddTask,
    verb = "add",
    noun = "task",
    description = "Create a new task in the todo column"
);

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            draft: TaskDraft::new(title),
        }
    }

    /// Create a new AddTask command from a full draft
    pub fn from_draft(draft: TaskDraft) -> Self {
        Self { draft }
    }
}

impl Execute for AddTask {
    fn execute(&self, board: &Board) -> Result<Applied> {
        let index = board
            .column_index(Status::Todo)
            .ok_or_else(|| TaskboardError::InvalidTargetColumn {
                id: Status::Todo.to_string(),
            })?;

        let task = Arc::new(self.draft.clone().into_task());

        let mut column = (*board.columns()[index]).clone();
        column.tasks.push(Arc::clone(&task));

        Ok(Applied {
            board: board.with_column(index, column),
            task,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    #[test]
    fn test_add_task() {
        let board = Board::new();
        let applied = AddTask::new("A").execute(&board).unwrap();

        assert_eq!(applied.task.title, "A");
        assert_eq!(applied.task.status, Status::Todo);
        let todo = applied.board.column(Status::Todo).unwrap();
        assert_eq!(todo.len(), 1);
        assert_eq!(todo.tasks[0].id, applied.task.id);

        // Input snapshot untouched
        assert_eq!(board.task_count(), 0);
    }

    #[test]
    fn test_add_multiple_tasks_ordering() {
        let board = Board::new();
        let first = AddTask::new("Task 1").execute(&board).unwrap();
        let second = AddTask::new("Task 2").execute(&first.board).unwrap();

        let todo = second.board.column(Status::Todo).unwrap();
        let titles: Vec<_> = todo.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Task 1", "Task 2"]);
        assert_ne!(first.task.id, second.task.id);
    }

    #[test]
    fn test_add_task_keeps_draft_fields() {
        let draft = TaskDraft::new("Draft")
            .with_priority(Priority::Low)
            .with_assignee("Ann");
        let applied = AddTask::from_draft(draft).execute(&Board::new()).unwrap();

        assert_eq!(applied.task.priority, Priority::Low);
        assert_eq!(applied.task.assignee.as_deref(), Some("Ann"));
        assert!(applied.task.comments.is_empty());
        assert!(applied.task.attachments.is_empty());
    }

    #[test]
    fn test_add_task_shares_other_columns() {
        let board = Board::new();
        let applied = AddTask::new("A").execute(&board).unwrap();
        for i in 1..4 {
            assert!(Arc::ptr_eq(&board.columns()[i], &applied.board.columns()[i]));
        }
    }
}
