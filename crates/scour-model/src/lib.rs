//! Typed schema and configuration for the Scour workbench core.
//!
//! This crate is plain data: column descriptions, domains, transform
//! switches and the purge report. The engines that move cells around live
//! in `scour-core`; nothing here depends on the storage layer.

pub mod column;
pub mod domain;
pub mod error;
pub mod options;
pub mod report;

pub use column::{Column, ColumnKind, Derivation};
pub use domain::{ColumnGroup, Domain};
pub use error::{DomainError, Result};
pub use options::{BinningOptions, PurgeConfig, PurgeOptions, ShuffleParts, TieBreak};
pub use report::{GroupCounts, PurgeReport};
