//! MoveTask command

use crate::error::{Result, TaskboardError};
use crate::operation::{operation, Applied, Execute};
use crate::types::{Board, Status, Task, TaskId};
use std::sync::Arc;

/// Move a task to the tail of another column
#[derive(Debug, Clone)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Target column id, as delivered by the drop gesture
    pub column: String,
}

operation!(
    MoveTask,
    verb = "move",
    noun = "task",
    description = "Move a task to the end of a different column"
);

impl MoveTask {
    /// Create a MoveTask command to move to a column (at the end)
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
        }
    }
}

impl Execute for MoveTask {
    fn execute(&self, board: &Board) -> Result<Applied> {
        // Target first: an invalid drop leaves the board untouched
        let target: Status = self.column.parse()?;
        let target_index = board.column_index(target).ok_or_else(|| {
            TaskboardError::InvalidTargetColumn {
                id: self.column.clone(),
            }
        })?;

        let (source_index, task_index) = board
            .locate(&self.id)
            .ok_or_else(|| TaskboardError::task_not_found(&self.id))?;

        let mut source = (*board.columns()[source_index]).clone();
        let removed = source.tasks.remove(task_index);

        let task = Arc::new(Task {
            status: target,
            ..(*removed).clone()
        });

        let board = if source_index == target_index {
            source.tasks.push(Arc::clone(&task));
            board.with_column(source_index, source)
        } else {
            let mut destination = (*board.columns()[target_index]).clone();
            destination.tasks.push(Arc::clone(&task));
            board
                .with_column(source_index, source)
                .with_column(target_index, destination)
        };

        Ok(Applied { board, task })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;

    fn board_with(titles: &[&str]) -> (Board, Vec<TaskId>) {
        let mut board = Board::new();
        let mut ids = Vec::new();
        for title in titles {
            let applied = AddTask::new(*title).execute(&board).unwrap();
            ids.push(applied.task.id.clone());
            board = applied.board;
        }
        (board, ids)
    }

    #[test]
    fn test_move_task_to_column() {
        let (board, ids) = board_with(&["A"]);

        let applied = MoveTask::to_column(ids[0].clone(), "in-progress")
            .execute(&board)
            .unwrap();

        assert_eq!(applied.task.status, Status::InProgress);
        assert!(applied.board.column(Status::Todo).unwrap().is_empty());
        let in_progress = applied.board.column(Status::InProgress).unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress.tasks[0].id, ids[0]);
        assert!(applied.board.is_consistent());
    }

    #[test]
    fn test_move_task_lands_at_tail() {
        let (board, ids) = board_with(&["A", "B"]);
        let board = MoveTask::to_column(ids[0].clone(), Status::Done)
            .execute(&board)
            .unwrap()
            .board;
        let board = MoveTask::to_column(ids[1].clone(), Status::Done)
            .execute(&board)
            .unwrap()
            .board;

        let done = board.column(Status::Done).unwrap();
        assert_eq!(done.tasks[0].id, ids[0]);
        assert_eq!(done.tasks[1].id, ids[1]);
    }

    #[test]
    fn test_move_within_same_column_goes_to_tail() {
        let (board, ids) = board_with(&["A", "B", "C"]);
        let applied = MoveTask::to_column(ids[0].clone(), "todo")
            .execute(&board)
            .unwrap();

        let todo = applied.board.column(Status::Todo).unwrap();
        let order: Vec<_> = todo.tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(order, vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);
    }

    #[test]
    fn test_move_task_invalid_column() {
        let (board, ids) = board_with(&["A"]);

        let result = MoveTask::to_column(ids[0].clone(), "nonexistent").execute(&board);

        assert!(matches!(
            result,
            Err(TaskboardError::InvalidTargetColumn { .. })
        ));
        // Task is still where it was
        assert_eq!(board.column(Status::Todo).unwrap().len(), 1);
    }

    #[test]
    fn test_move_task_not_found() {
        let (board, _) = board_with(&["A"]);

        let result = MoveTask::to_column("missing", "done").execute(&board);

        assert!(matches!(result, Err(TaskboardError::TaskNotFound { id }) if id == "missing"));
    }

    #[test]
    fn test_move_away_and_back_restores_membership() {
        let (board, ids) = board_with(&["A", "B"]);
        let moved = MoveTask::to_column(ids[0].clone(), "review")
            .execute(&board)
            .unwrap()
            .board;
        let back = MoveTask::to_column(ids[0].clone(), "todo")
            .execute(&moved)
            .unwrap()
            .board;

        let (column, task) = back.find_task(&ids[0]).unwrap();
        assert_eq!(column.id, Status::Todo);
        assert_eq!(task.status, Status::Todo);
        // Membership restored, position is the tail
        assert_eq!(column.tasks.last().unwrap().id, ids[0]);
    }
}
