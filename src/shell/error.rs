//! Executor error kinds.

use thiserror::Error;

/// Failure modes when launching an external command. Each maps to the
/// conventional shell status code surfaced by the dispatch loop.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("not found")]
    NotFound,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("cannot spawn: {0}")]
    Spawn(#[source] std::io::Error),
}

impl ExecError {
    pub fn status(&self) -> i32 {
        match self {
            ExecError::NotFound => 127,
            ExecError::PermissionDenied => 126,
            ExecError::Spawn(_) => 1,
        }
    }
}
