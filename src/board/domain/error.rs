//! Error types for board domain parsing.

use thiserror::Error;

/// Error returned while parsing a column from a string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown kanban column: {0}")]
pub struct ParseColumnError(pub String);
