//! Task types: Task, TaskDraft, Comment, Attachment

use super::board::Status;
use super::ids::{AttachmentId, CommentId, TaskId, UserId};
use super::label::Label;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskboardError;

/// How urgent a task is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                TaskboardError::invalid_value("priority", format!("unknown priority '{s}'"))
            })
    }
}

/// Secondary status dimension, independent of the board column.
/// Only used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    PendingTech,
    PendingClient,
    Done,
    InReview,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        Self::PendingTech,
        Self::PendingClient,
        Self::InReview,
        Self::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingTech => "pending-tech",
            Self::PendingClient => "pending-client",
            Self::Done => "done",
            Self::InReview => "in-review",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                TaskboardError::invalid_value(
                    "ticket_status",
                    format!("unknown ticket status '{s}'"),
                )
            })
    }
}

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Id of the column that holds this task
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_status: Option<TicketStatus>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Discussion thread, append-only
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Task {
    /// Create a new `todo` task with the given title, stamped now
    pub fn new(title: impl Into<String>) -> Self {
        TaskDraft::new(title).into_task()
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the client name
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    /// Set the ticket status
    pub fn with_ticket_status(mut self, ticket_status: TicketStatus) -> Self {
        self.ticket_status = Some(ticket_status);
        self
    }

    /// Set the labels
    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    /// Override the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check whether the task carries a label with the given id
    pub fn has_label(&self, id: &str) -> bool {
        self.labels.iter().any(|l| l.id.as_str() == id)
    }
}

/// The fields a caller supplies when creating a task.
///
/// Id, timestamps, comments and attachments are filled in by the board, and
/// every new task starts in `todo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub ticket_status: Option<TicketStatus>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_ticket_status(mut self, ticket_status: TicketStatus) -> Self {
        self.ticket_status = Some(ticket_status);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    /// Materialize the draft: fresh id, `created_at = now`, status `todo`,
    /// empty comments and attachments.
    pub fn into_task(self) -> Task {
        Task {
            id: TaskId::new(),
            title: self.title,
            description: self.description,
            status: Status::Todo,
            ticket_status: self.ticket_status,
            priority: self.priority,
            assignee: self.assignee,
            created_at: Utc::now(),
            due_date: self.due_date,
            client_name: self.client_name,
            labels: self.labels,
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

/// A comment on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub user_id: UserId,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Comment {
    /// Create a new comment stamped now
    pub fn new(content: impl Into<String>, user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            content: content.into(),
            user_id,
            user_name: user_name.into(),
            created_at: Utc::now(),
            attachments: Vec::new(),
        }
    }
}

/// What an attachment points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentKind {
    Image,
    Link,
    Media,
}

/// An attachment on a task or comment. Created externally, never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub name: String,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(kind: AttachmentKind, url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(),
            kind,
            url: url.into(),
            name: name.into(),
        }
    }
}
