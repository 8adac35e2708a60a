//! Error types for frame construction and domain transforms.

use polars::prelude::PolarsError;
use scour_model::DomainError;
use thiserror::Error;

/// Errors raised when a domain and its backing storage disagree.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Column count differs between domain and storage.
    #[error("domain describes {expected} columns but storage holds {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Column at `index` is named differently in domain and storage.
    #[error("column {index} is {domain:?} in the domain but {data:?} in storage")]
    ColumnNameMismatch {
        index: usize,
        domain: String,
        data: String,
    },

    /// Column storage dtype does not match its declared kind.
    #[error("column {column:?}: expected {expected} storage, found {actual}")]
    DtypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    /// A categorical code points past the declared value list.
    #[error("column {column:?} holds code {code} but declares only {len} values")]
    CodeOutOfRange {
        column: String,
        code: u32,
        len: usize,
    },

    /// Domain-level validation failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage-level failure while assembling or inspecting columns.
    #[error(transparent)]
    Storage(#[from] PolarsError),
}

impl FrameError {
    pub fn name_mismatch(index: usize, domain: impl Into<String>, data: impl Into<String>) -> Self {
        Self::ColumnNameMismatch {
            index,
            domain: domain.into(),
            data: data.into(),
        }
    }

    pub fn dtype_mismatch(
        column: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::DtypeMismatch {
            column: column.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn code_out_of_range(column: impl Into<String>, code: u32, len: usize) -> Self {
        Self::CodeOutOfRange {
            column: column.into(),
            code,
            len,
        }
    }
}

/// Errors from re-expressing a table under a target domain.
///
/// The transformer either returns a fully assembled frame or one of
/// these; it never hands back a partially converted table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No source column, resolved target or derivation input for `name`.
    #[error("no source column for {name:?}")]
    MissingColumn { name: String },

    /// Source and target column kinds disagree.
    #[error("column {column:?}: expected a {expected} source, found {actual}")]
    KindMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A source value string is absent from the target's value list.
    #[error("column {column:?}: value {value:?} is not in the target value list")]
    UnmappableValue { column: String, value: String },

    /// A resolution pass made no progress while columns were pending.
    #[error("derivation inputs never resolve for: {}", columns.join(", "))]
    UnresolvedDerivation { columns: Vec<String> },

    /// The assembled output failed frame validation.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Storage-level failure while reading source columns.
    #[error(transparent)]
    Storage(#[from] PolarsError),
}

impl TransformError {
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumn { name: name.into() }
    }

    pub fn kind_mismatch(
        column: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::KindMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }

    pub fn unmappable_value(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnmappableValue {
            column: column.into(),
            value: value.into(),
        }
    }
}
