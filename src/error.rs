use thiserror::Error;

/// Fatal conditions that abort a write.
///
/// A fatal error surfaces immediately and no partial output is returned.
/// Recoverable conditions (an empty buffer) are reported through the `log`
/// facade instead and do not prevent completion.
#[derive(Debug, Error)]
pub enum Error {
    #[error("attribute or index accessors must be used only for that purpose: {name:?}")]
    AccessorRoleConflict { name: String },
    #[error("interleaved accessors must share one element count: expected {expected}, found {found}")]
    InterleaveCountMismatch { expected: usize, found: usize },
    #[error("a binary container holds at most one buffer, found {0}")]
    GlbBufferCount(usize),
    #[error("{0}")]
    Unsupported(&'static str),
    #[error("glTF JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
