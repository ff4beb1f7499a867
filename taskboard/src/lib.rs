//! Kanban task board core
//!
//! This crate holds the state behind a task board UI: four fixed status
//! columns of tasks, a conjunctive task filter, and a mock session store.
//! Rendering is left to the caller, which forwards gestures into the stores
//! and re-renders from the snapshots they hand back.
//!
//! ## Overview
//!
//! - **Immutable snapshots** - every operation returns a new [`Board`]; columns
//!   and tasks that did not change are shared with the previous snapshot
//! - **Explicit outcomes** - unknown tasks and unknown target columns are
//!   errors, never silent drops
//! - **Filtering is a view** - [`TaskFilter`] never mutates the board
//! - **Injected session** - [`session::SessionStore`] takes its identity provider
//!   and user-record storage from the caller
//!
//! ## Basic Usage
//!
//! ```rust
//! use taskboard::{BoardStore, Status, TaskDraft, TaskFilter};
//!
//! # fn example() -> taskboard::Result<()> {
//! let mut store = BoardStore::new();
//!
//! let task = store.create_task(TaskDraft::new("Write release notes").with_assignee("Ann Lee"))?;
//! store.move_task(task.id.clone(), "in-progress")?;
//! store.add_comment(task.id.clone(), "Draft is up")?;
//!
//! let visible = store.visible(&TaskFilter::new().with_assignee("ann"));
//! assert_eq!(visible.column(Status::InProgress).unwrap().len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Sessions
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard::config::SessionConfig;
//! use taskboard::session::{FileUserStore, SessionStore};
//!
//! # async fn example() -> taskboard::Result<()> {
//! let users = Arc::new(FileUserStore::new("/tmp/taskboard/user.json"));
//! let session = SessionStore::mock(&SessionConfig::default(), users);
//!
//! if session.restore_session().await.is_none() {
//!     session.login("bob@x.com", "hunter2").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod comment;
pub mod config;
mod error;
pub mod filter;
mod operation;
mod processor;
pub mod session;
mod store;
pub mod task;
pub mod types;

pub use config::TaskboardConfig;
pub use error::{Result, TaskboardError};
pub use filter::TaskFilter;
pub use operation::{Applied, Execute, Operation};
pub use processor::BoardProcessor;
pub use store::BoardStore;

// Re-export commonly used types
pub use types::{
    Attachment, AttachmentKind, Board, Column, Comment, CommentId, Label, LabelCatalog, LabelId,
    Priority, Provider, Status, Task, TaskDraft, TaskId, TicketStatus, User, UserId,
};
