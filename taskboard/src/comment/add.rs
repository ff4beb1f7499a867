//! AddComment command

use crate::error::{Result, TaskboardError};
use crate::operation::{operation, Applied, Execute};
use crate::task::UpdateTask;
use crate::types::{Board, Comment, Task, TaskId, User, UserId};

/// Author recorded when no signed-in user is supplied
pub const PLACEHOLDER_USER_ID: &str = "1";
/// Display name recorded when no signed-in user is supplied
pub const PLACEHOLDER_USER_NAME: &str = "Current User";

/// Append a comment to a task's thread
#[derive(Debug, Clone)]
pub struct AddComment {
    /// The task ID to comment on
    pub task_id: TaskId,
    /// The comment body
    pub content: String,
    pub user_id: UserId,
    pub user_name: String,
}

operation!(
    AddComment,
    verb = "add",
    noun = "comment",
    description = "Add a comment to a task"
);

impl AddComment {
    /// Comment attributed to the placeholder author
    pub fn new(task_id: impl Into<TaskId>, content: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            content: content.into(),
            user_id: UserId::from_string(PLACEHOLDER_USER_ID),
            user_name: PLACEHOLDER_USER_NAME.to_string(),
        }
    }

    /// Attribute the comment to a signed-in user
    pub fn with_author(mut self, user: &User) -> Self {
        self.user_id = user.id.clone();
        self.user_name = user.display_name().to_string();
        self
    }
}

impl Execute for AddComment {
    fn execute(&self, board: &Board) -> Result<Applied> {
        if self.content.trim().is_empty() {
            return Err(TaskboardError::invalid_value(
                "content",
                "comment must not be blank",
            ));
        }

        let (_, current) = board
            .find_task(&self.task_id)
            .ok_or_else(|| TaskboardError::task_not_found(&self.task_id))?;

        let mut task: Task = (**current).clone();
        task.comments.push(Comment::new(
            &self.content,
            self.user_id.clone(),
            &self.user_name,
        ));

        UpdateTask::new(task).execute(board)
    }
}
