//! Operation traits.
//!
//! Operations are structs where the fields ARE the parameters. Each one takes
//! a board snapshot and yields the next snapshot plus the task it touched;
//! the input snapshot is never modified.

use crate::error::Result;
use crate::types::{Board, Task};
use std::sync::Arc;

/// Metadata describing an operation
pub trait Operation {
    /// The action, e.g. "move"
    fn verb(&self) -> &'static str;

    /// The thing acted upon, e.g. "task"
    fn noun(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Canonical op string (e.g., "move task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// An operation that can be applied to a board snapshot
pub trait Execute: Operation {
    fn execute(&self, board: &Board) -> Result<Applied>;
}

/// Outcome of a successful operation
#[derive(Debug, Clone)]
pub struct Applied {
    /// The new snapshot
    pub board: Board,
    /// The task as it stands in the new snapshot
    pub task: Arc<Task>,
}

/// Implement [`Operation`] for a command struct
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }

            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

pub(crate) use operation;
