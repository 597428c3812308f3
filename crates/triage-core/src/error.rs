use thiserror::Error;

use crate::stage::StageKind;
use crate::value::Value;

/// Canonical result type shared by every triage crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Static configuration error raised during pipeline compilation. These
    /// prevent the pipeline from coming into existence at all.
    #[error("invalid pipeline definition: {0}")]
    Definition(String),

    #[error("{kind} callback declares {declared} non-receiver parameters, requires at least {required}")]
    Arity {
        kind: StageKind,
        declared: usize,
        required: usize,
    },

    #[error("conflicting defaults for keyword '{name}': {first} vs {second}")]
    KeywordConflict {
        name: String,
        first: Value,
        second: Value,
    },

    /// Call-time mismatch against the unified signature (wrong positional
    /// count, unexpected keyword, missing dynamic count, wrong input shape).
    #[error("invocation error: {0}")]
    Invocation(String),

    /// Failure reported by a user-supplied stage callback. Propagated to the
    /// caller unmodified; a failing stage aborts the whole invocation.
    #[error("{kind} callback '{name}' failed: {message}")]
    Stage {
        kind: StageKind,
        name: String,
        message: String,
    },

    #[error("hashing error: {0}")]
    Hash(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Hash(e.to_string())
    }
}
