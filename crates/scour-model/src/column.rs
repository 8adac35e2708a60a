use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage and semantics class of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Index-coded values drawn from an ordered list of distinct labels.
    Categorical { values: Vec<String> },
    /// 64-bit floating point measurements.
    Continuous,
    /// Free-form strings. Empty strings count as missing.
    Text,
}

impl ColumnKind {
    /// Lowercase kind token, as written in table headers and errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Categorical { .. } => "categorical",
            Self::Continuous => "continuous",
            Self::Text => "text",
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical { .. })
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Continuous)
    }

    /// Whether two kinds agree structurally, ignoring categorical value
    /// lists.
    pub fn same_class(&self, other: &ColumnKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

/// Recipe for computing a column's cells from another table when the
/// owning domain is applied as a transform target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Values copied (recast, for categoricals) from a differently named
    /// source column of the same kind.
    Alias { source: String },
    /// Categorical index remap. `table[old]` is the new index; `None`
    /// entries and indices past the table's end become missing.
    Recode {
        source: String,
        table: Vec<Option<u32>>,
    },
    /// Interval binning of a continuous source. A value lands in the
    /// first bin `i` with `v < thresholds[i]`, else in the last bin; the
    /// owning column carries `thresholds.len() + 1` labels.
    Bin { source: String, thresholds: Vec<f64> },
}

impl Derivation {
    /// Name of the column this derivation reads from.
    pub fn source(&self) -> &str {
        match self {
            Self::Alias { source }
            | Self::Recode { source, .. }
            | Self::Bin { source, .. } => source,
        }
    }
}

/// A named, typed column description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    /// How to compute this column when its domain is used as a transform
    /// target. `None` means plain lookup by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation: Option<Derivation>,
}

impl Column {
    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical {
                values: values.into_iter().map(Into::into).collect(),
            },
            derivation: None,
        }
    }

    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Continuous,
            derivation: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            derivation: None,
        }
    }

    pub fn with_derivation(mut self, derivation: Derivation) -> Self {
        self.derivation = Some(derivation);
        self
    }

    /// Declared labels of a categorical column, empty for other kinds.
    pub fn values(&self) -> &[String] {
        match &self.kind {
            ColumnKind::Categorical { values } => values,
            _ => &[],
        }
    }
}
