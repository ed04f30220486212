//! Runtime error types.

use combat_core::{ActionError, SetupError};

/// Errors surfaced to session handles.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The combat core rejected the intent; state is untouched and the
    /// caller may re-prompt.
    #[error("action rejected: {0}")]
    Action(#[from] ActionError),

    /// The encounter could not be constructed.
    #[error("encounter setup failed: {0}")]
    Setup(#[from] SetupError),

    /// Content data could not be loaded or resolved.
    #[error("content loading failed: {0}")]
    Content(#[from] anyhow::Error),

    /// The session worker has terminated (encounter over or task dropped).
    #[error("combat session is closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
