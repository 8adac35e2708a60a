//! Error types for typed CSV ingest and output.

use thiserror::Error;

use scour_core::FrameError;

/// Errors that can occur when reading or writing typed CSV tables.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file ended before all three header rows were read.
    #[error("missing header row: expected {expected}")]
    MissingHeader { expected: &'static str },

    /// The kind row carried a token the dialect does not know.
    #[error("unknown kind token {token:?} for column {column}")]
    UnknownKind { column: String, token: String },

    /// The role row carried a token the dialect does not know.
    #[error("unknown role token {token:?} for column {column}")]
    UnknownRole { column: String, token: String },

    /// A cell of a continuous column failed to parse as a number.
    #[error("non-numeric value {value:?} in continuous column {column}, data row {row}")]
    NonNumericCell {
        column: String,
        row: usize,
        value: String,
    },

    /// Two kept columns share a name.
    #[error("duplicate column name: {name}")]
    DuplicateColumn { name: String },

    /// Frame assembly rejected the parsed table.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Columnar storage error while rendering cells.
    #[error(transparent)]
    Storage(#[from] polars::prelude::PolarsError),

    /// CSV-level parse or write failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    pub fn missing_header(expected: &'static str) -> Self {
        Self::MissingHeader { expected }
    }

    pub fn unknown_kind(column: impl Into<String>, token: impl Into<String>) -> Self {
        Self::UnknownKind {
            column: column.into(),
            token: token.into(),
        }
    }

    pub fn unknown_role(column: impl Into<String>, token: impl Into<String>) -> Self {
        Self::UnknownRole {
            column: column.into(),
            token: token.into(),
        }
    }

    pub fn non_numeric_cell(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::NonNumericCell {
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }
}
