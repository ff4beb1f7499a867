//! Board-level types: Status, Column, Board

use super::ids::TaskId;
use super::task::Task;
use crate::error::TaskboardError;
use crate::filter::TaskFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Workflow stage of a task. Each status is the id of exactly one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Review,
    Done,
}

impl Status {
    /// All statuses in board order
    pub const ALL: [Status; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Display title of the column for this status
    pub fn title(&self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TaskboardError::InvalidTargetColumn { id: s.to_string() })
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

/// A column is an ordered bucket of tasks for one status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub id: Status,
    pub title: String,
    pub tasks: Vec<Arc<Task>>,
}

impl Column {
    /// Create an empty column for a status
    pub fn new(id: Status) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task in this column
    pub fn find_task(&self, id: &TaskId) -> Option<&Arc<Task>> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub(crate) fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }
}

/// An immutable snapshot of the board.
///
/// Columns and tasks are shared through `Arc`, so cloning a board is cheap
/// and an operation only copies the columns it touches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Board {
    columns: Vec<Arc<Column>>,
}

impl Board {
    /// A board with the four fixed columns, all empty
    pub fn new() -> Self {
        Self {
            columns: Status::ALL
                .into_iter()
                .map(|status| Arc::new(Column::new(status)))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    /// Get the column for a status
    pub fn column(&self, id: Status) -> Option<&Arc<Column>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Find a task and the column that holds it
    pub fn find_task(&self, id: &TaskId) -> Option<(&Column, &Arc<Task>)> {
        self.columns
            .iter()
            .find_map(|c| c.find_task(id).map(|t| (c.as_ref(), t)))
    }

    /// All tasks, column by column
    pub fn tasks(&self) -> impl Iterator<Item = &Arc<Task>> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.len()).sum()
    }

    /// The visible board: every column reduced to the tasks the filter accepts.
    /// The snapshot itself is left untouched.
    pub fn filtered(&self, filter: &TaskFilter) -> Board {
        if filter.is_empty() {
            return self.clone();
        }

        Board {
            columns: self
                .columns
                .iter()
                .map(|c| {
                    Arc::new(Column {
                        id: c.id,
                        title: c.title.clone(),
                        tasks: c
                            .tasks
                            .iter()
                            .filter(|t| filter.matches(t))
                            .cloned()
                            .collect(),
                    })
                })
                .collect(),
        }
    }

    /// Check the partition invariant: every task sits in exactly one column
    /// and that column's id equals the task's status.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        self.columns.iter().all(|c| {
            c.tasks
                .iter()
                .all(|t| t.status == c.id && seen.insert(t.id.clone()))
        })
    }

    pub(crate) fn column_index(&self, id: Status) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Locate a task as (column index, task index)
    pub(crate) fn locate(&self, id: &TaskId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(ci, c)| c.position_of(id).map(|ti| (ci, ti)))
    }

    /// New snapshot sharing every column except the replaced one
    pub(crate) fn with_column(&self, index: usize, column: Column) -> Board {
        let mut columns = self.columns.clone();
        columns[index] = Arc::new(column);
        Board { columns }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        let board = Board::new();
        let ids: Vec<_> = board.columns().iter().map(|c| c.id).collect();
        assert_eq!(ids, Status::ALL.to_vec());
        assert_eq!(board.columns()[1].title, "In Progress");
        assert_eq!(board.task_count(), 0);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
        let err = "backlog".parse::<Status>().unwrap_err();
        assert!(matches!(err, TaskboardError::InvalidTargetColumn { id } if id == "backlog"));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
    }

    #[test]
    fn test_with_column_shares_untouched_columns() {
        let board = Board::new();
        let mut todo = (*board.columns()[0]).clone();
        todo.tasks.push(Arc::new(Task::new("A")));

        let next = board.with_column(0, todo);
        assert_eq!(next.task_count(), 1);
        assert_eq!(board.task_count(), 0);
        for i in 1..4 {
            assert!(Arc::ptr_eq(&board.columns()[i], &next.columns()[i]));
        }
    }

    #[test]
    fn test_inconsistent_board_detected() {
        let board = Board::new();
        let mut review = (*board.columns()[2]).clone();
        // Task claims todo but sits in review
        review.tasks.push(Arc::new(Task::new("misplaced")));
        let broken = board.with_column(2, review);
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_board_serializes_as_column_list() {
        let json = serde_json::to_value(Board::new()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[0]["id"], "todo");
        assert_eq!(json[0]["title"], "To Do");
    }
}
