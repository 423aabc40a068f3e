//! Content errors

use std::path::PathBuf;

use thiserror::Error;

use crate::content::PostId;

/// Errors raised while building the post corpus
#[derive(Debug, Error)]
pub enum ContentError {
    /// Two posts share the same identifier
    #[error("duplicate post id {id}: {first} and {second}")]
    DuplicateId {
        id: PostId,
        first: String,
        second: String,
    },

    /// A required front-matter field is absent
    #[error("{path:?}: missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    /// Icon name that does not map to any known icon
    #[error("unknown icon `{0}`")]
    UnknownIcon(String),

    /// Front-matter could not be parsed
    #[error("{path:?}: malformed front-matter: {message}")]
    FrontMatter { path: PathBuf, message: String },
}
