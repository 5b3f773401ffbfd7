//! Error types for export operations

use thiserror::Error;

/// Errors that can occur while configuring or running an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// An inline rule was declared without any attribute to match on
    #[error("inline rule '{0}' needs at least one attribute")]
    EmptyRule(String),
    /// A priority name outside highest/high/normal/low/lowest
    #[error("unknown priority '{0}'")]
    UnknownPriority(String),
    /// Strict lockstep found the model and view walks out of step
    #[error("model position {model} and view position {view} are out of step")]
    Desynchronized { model: String, view: String },
    /// The input document could not be decoded or encoded
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),
}
