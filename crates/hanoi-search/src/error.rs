//! Error types for the Hanoi search crate.

use thiserror::Error;

use crate::puzzle::{Move, Peg};

/// Why a move was rejected against a configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveReason {
    #[error("source and destination are both peg {0}")]
    SamePeg(Peg),

    #[error("peg {0} is empty")]
    EmptySource(Peg),

    #[error("disk {disk} cannot be placed on smaller disk {onto}")]
    LargerOnSmaller { disk: u32, onto: u32 },
}

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HanoiError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("illegal move {mv}: {reason}")]
    IllegalMove {
        mv: Move,
        reason: IllegalMoveReason,
    },

    #[error("disk count must be at least 1, got {got}")]
    DiskCount { got: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HanoiError {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        HanoiError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        HanoiError::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, HanoiError>;
