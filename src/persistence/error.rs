//! Persistence errors
//!
//! Every variant is recoverable: callers log it and keep their current state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    /// Text is not valid JSON, or a card is missing one of its string fields
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON, but neither a tagged map nor a card array
    #[error("unsupported document shape, expected a tagged map or a card array")]
    UnsupportedShape,

    /// Tagged object whose `dataType` is not `Map`
    #[error("unknown data type tag `{0}`")]
    UnknownTag(String),

    #[error("workspace `{0}` appears more than once")]
    DuplicateWorkspace(String),

    #[error("workspace name is empty")]
    EmptyWorkspaceName,

    /// Import file holds a card array with no cards
    #[error("import contains no cards")]
    EmptyImport,

    #[error("no workspace named `{0}`")]
    MissingWorkspace(String),

    /// Backing key/value store refused a read or write
    #[error("storage error: {0}")]
    Storage(String),
}
