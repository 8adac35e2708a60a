use thiserror::Error;

/// Result type for domain model operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors raised while validating or querying a domain.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("duplicate column name: {name}")]
    DuplicateColumn { name: String },

    #[error("unknown column: {name}")]
    UnknownColumn { name: String },
}

impl DomainError {
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }

    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }
}
