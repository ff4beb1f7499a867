//! BoardStore - the current board snapshot plus the label catalog.
//!
//! The presentation layer forwards gestures and form submissions here and
//! re-renders from [`BoardStore::snapshot`] or [`BoardStore::visible`].

use crate::comment::AddComment;
use crate::error::Result;
use crate::filter::TaskFilter;
use crate::operation::Execute;
use crate::processor::BoardProcessor;
use crate::task::{AddTask, MoveTask, UpdateTask};
use crate::types::{Board, LabelCatalog, Task, TaskDraft, TaskId, User};
use std::sync::Arc;

/// Owner of the current board snapshot
#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Board,
    labels: LabelCatalog,
    processor: BoardProcessor,
}

impl BoardStore {
    /// An empty board with the default label catalog
    pub fn new() -> Self {
        Self::with_labels(LabelCatalog::default())
    }

    pub fn with_labels(labels: LabelCatalog) -> Self {
        Self {
            board: Board::new(),
            labels,
            processor: BoardProcessor::new(),
        }
    }

    /// Use a processor that attributes operations to an actor
    pub fn with_processor(mut self, processor: BoardProcessor) -> Self {
        self.processor = processor;
        self
    }

    /// The current snapshot. Cheap: columns and tasks are shared.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn labels(&self) -> &LabelCatalog {
        &self.labels
    }

    pub fn processor_mut(&mut self) -> &mut BoardProcessor {
        &mut self.processor
    }

    /// The filtered view used for rendering
    pub fn visible(&self, filter: &TaskFilter) -> Board {
        self.board.filtered(filter)
    }

    /// Run any operation; on success the store advances to the new snapshot
    pub fn apply<O>(&mut self, op: &O) -> Result<Arc<Task>>
    where
        O: Execute + ?Sized,
    {
        let applied = self.processor.process(op, &self.board)?;
        self.board = applied.board;
        Ok(applied.task)
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Arc<Task>> {
        self.apply(&AddTask::from_draft(draft))
    }

    pub fn move_task(
        &mut self,
        id: impl Into<TaskId>,
        column: impl Into<String>,
    ) -> Result<Arc<Task>> {
        self.apply(&MoveTask::to_column(id, column))
    }

    pub fn update_task(&mut self, task: Task) -> Result<Arc<Task>> {
        self.apply(&UpdateTask::new(task))
    }

    /// Comment as the placeholder author
    pub fn add_comment(
        &mut self,
        id: impl Into<TaskId>,
        content: impl Into<String>,
    ) -> Result<Arc<Task>> {
        self.apply(&AddComment::new(id, content))
    }

    /// Comment as a signed-in user
    pub fn add_comment_as(
        &mut self,
        id: impl Into<TaskId>,
        content: impl Into<String>,
        author: &User,
    ) -> Result<Arc<Task>> {
        self.apply(&AddComment::new(id, content).with_author(author))
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new()
    }
}
