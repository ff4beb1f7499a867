//! Core types for the task board

mod board;
mod ids;
mod label;
mod task;
mod user;

// Re-export all types
pub use board::{Board, Column, Status};
pub use ids::{AttachmentId, CommentId, LabelId, TaskId, UserId};
pub use label::{Label, LabelCatalog};
pub use task::{Attachment, AttachmentKind, Comment, Priority, Task, TaskDraft, TicketStatus};
pub use user::{Provider, User};
