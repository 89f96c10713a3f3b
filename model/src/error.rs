use crate::Position;
use thiserror::Error;

/// Failure of any pipeline stage. Every variant is fatal to the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{position}: ERROR: {message}")]
    Lexical { position: Position, message: String },

    #[error("{position}: ERROR: {message}")]
    Syntax { position: Position, message: String },

    /// A variable was read before any assignment established it.
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    /// A node reached a back end in a shape the parser never builds.
    #[error("internal error: {0}")]
    Unreachable(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn lexical(position: Position, message: impl Into<String>) -> Self {
        Self::Lexical { position, message: message.into() }
    }

    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::Syntax { position, message: message.into() }
    }

    /// Whether the message already carries a `file:line:col` prefix.
    pub fn has_position(&self) -> bool {
        matches!(self, Self::Lexical { .. } | Self::Syntax { .. })
    }
}
