//! Error types for sqlrenderlib

use thiserror::Error;

/// Errors that can occur while building or rendering a result set.
///
/// Every variant is terminal for the render call: nothing is written when
/// one is returned.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A raw row does not have one value per column
    #[error("row {row} has {actual} values but the result has {expected} columns")]
    MalformedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Two columns share the same name
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A value cannot be represented in the target format
    #[error("cannot encode result as {format}: {message}")]
    Encoding { format: String, message: String },

    /// No renderer is registered under the requested identifier
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),
}

impl RenderError {
    pub(crate) fn encoding(format: impl Into<String>, message: impl ToString) -> Self {
        RenderError::Encoding {
            format: format.into(),
            message: message.to_string(),
        }
    }
}
