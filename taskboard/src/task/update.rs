//! UpdateTask command

use crate::error::{Result, TaskboardError};
use crate::operation::{operation, Applied, Execute};
use crate::types::{Board, Task};
use std::sync::Arc;

/// Replace a task by value, in place.
///
/// The task keeps its column and its index. Changing columns is MoveTask's
/// job: an update whose `status` disagrees with the holding column is
/// rejected with [`TaskboardError::StatusConflict`].
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub task: Task,
}

operation!(
    UpdateTask,
    verb = "update",
    noun = "task",
    description = "Replace a task's fields without changing its column"
);

impl UpdateTask {
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

impl Execute for UpdateTask {
    fn execute(&self, board: &Board) -> Result<Applied> {
        let (column_index, task_index) = board
            .locate(&self.task.id)
            .ok_or_else(|| TaskboardError::task_not_found(&self.task.id))?;

        let mut column = (*board.columns()[column_index]).clone();
        if self.task.status != column.id {
            return Err(TaskboardError::StatusConflict {
                id: self.task.id.to_string(),
                column: column.id.to_string(),
                status: self.task.status.to_string(),
            });
        }

        let task = Arc::new(self.task.clone());
        column.tasks[task_index] = Arc::clone(&task);

        Ok(Applied {
            board: board.with_column(column_index, column),
            task,
        })
    }
}
