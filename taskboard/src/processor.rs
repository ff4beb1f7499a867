//! Runs board operations and logs them

use crate::error::Result;
use crate::operation::{Applied, Execute};
use crate::types::Board;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Applies operations to snapshots, attributing each to an optional actor.
///
/// Successful operations are logged at `info`, failures at `warn`. A failed
/// operation produces no new snapshot.
#[derive(Debug, Clone, Default)]
pub struct BoardProcessor {
    actor: Option<String>,
}

impl BoardProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every processed operation to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    pub fn set_actor(&mut self, actor: Option<String>) {
        self.actor = actor;
    }

    pub fn process<O>(&self, op: &O, board: &Board) -> Result<Applied>
    where
        O: Execute + ?Sized,
    {
        let op_string = op.op_string();
        let actor = self.actor.as_deref().unwrap_or("anonymous");
        debug!(op = %op_string, actor, "processing operation");

        let start = Instant::now();
        let result = op.execute(board);
        let duration_ms = millis(start.elapsed());

        match &result {
            Ok(applied) => info!(
                op = %op_string,
                actor,
                task_id = %applied.task.id,
                status = %applied.task.status,
                duration_ms,
                "operation applied"
            ),
            Err(error) => warn!(
                op = %op_string,
                actor,
                %error,
                duration_ms,
                "operation rejected"
            ),
        }

        result
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
