//! Error types for the task board

use thiserror::Error;

/// Result type for task board operations
pub type Result<T> = std::result::Result<T, TaskboardError>;

/// Errors that can occur in board and session operations
#[derive(Debug, Error)]
pub enum TaskboardError {
    /// No column holds a task with this id
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Move target names no column on the board
    #[error("invalid target column: {id}")]
    InvalidTargetColumn { id: String },

    /// An update tried to change a task's status in place
    #[error("task '{id}' is in column '{column}' but the update carries status '{status}'")]
    StatusConflict {
        id: String,
        column: String,
        status: String,
    },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Email/password login rejected
    #[error("authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// Login through an external identity provider failed
    #[error("login with {provider} failed: {message}")]
    ProviderLoginFailed { provider: String, message: String },

    /// A login or logout is already in flight
    #[error("session busy - another login or logout in progress")]
    SessionBusy,

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskboardError {
    /// Create a task-not-found error
    pub fn task_not_found(id: impl ToString) -> Self {
        Self::TaskNotFound { id: id.to_string() }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SessionBusy)
    }
}

impl From<figment::Error> for TaskboardError {
    fn from(error: figment::Error) -> Self {
        Self::Config(Box::new(error))
    }
}
