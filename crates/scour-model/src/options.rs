use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ColumnGroup;

/// Switches for purging one column group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeOptions {
    /// Reorder categorical value lists into ascending natural order.
    pub sort_values: bool,
    /// Drop declared categorical values no row uses.
    pub remove_unused_values: bool,
    /// Drop columns with at most one distinct non-missing value.
    pub remove_constant: bool,
}

impl PurgeOptions {
    /// Every switch enabled.
    pub fn all() -> Self {
        Self {
            sort_values: true,
            remove_unused_values: true,
            remove_constant: true,
        }
    }

    /// Every switch disabled; purging becomes an identity pass.
    pub fn none() -> Self {
        Self {
            sort_values: false,
            remove_unused_values: false,
            remove_constant: false,
        }
    }
}

impl Default for PurgeOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Purge switches per column group.
///
/// Defaults mirror the workbench dialog: everything on, except meta value
/// lists are never sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeConfig {
    pub attributes: PurgeOptions,
    pub class_vars: PurgeOptions,
    pub metas: PurgeOptions,
}

impl PurgeConfig {
    pub fn group(&self, group: ColumnGroup) -> &PurgeOptions {
        match group {
            ColumnGroup::Attributes => &self.attributes,
            ColumnGroup::ClassVars => &self.class_vars,
            ColumnGroup::Metas => &self.metas,
        }
    }
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            attributes: PurgeOptions::all(),
            class_vars: PurgeOptions::all(),
            metas: PurgeOptions {
                sort_values: false,
                ..PurgeOptions::all()
            },
        }
    }
}

/// Which row survives when several share one key tuple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the last occurrence (the workbench default).
    #[default]
    Last,
    /// Keep the first occurrence.
    First,
    /// Keep the occurrence at `group_len / 2`.
    Middle,
    /// Keep one occurrence chosen by the injected RNG.
    Random,
    /// Drop every group holding more than one row.
    DiscardNonUnique,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last => "last",
            Self::First => "first",
            Self::Middle => "middle",
            Self::Random => "random",
            Self::DiscardNonUnique => "discard-non-unique",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" => Ok(Self::Last),
            "first" => Ok(Self::First),
            "middle" => Ok(Self::Middle),
            "random" => Ok(Self::Random),
            "discard-non-unique" => Ok(Self::DiscardNonUnique),
            other => Err(format!("unknown tie-break: {other}")),
        }
    }
}

/// Which column groups the shuffler permutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleParts {
    pub class_vars: bool,
    pub attributes: bool,
    pub metas: bool,
}

impl Default for ShuffleParts {
    /// The workbench default: shuffle class columns only.
    fn default() -> Self {
        Self {
            class_vars: true,
            attributes: false,
            metas: false,
        }
    }
}

/// Group toggles for the equal-width binner. Attributes are always binned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinningOptions {
    /// Also bin class columns.
    pub class_vars: bool,
    /// Also bin meta columns.
    pub metas: bool,
    /// Drop continuous columns without two distinct finite values.
    pub remove_constant: bool,
}

impl Default for BinningOptions {
    fn default() -> Self {
        Self {
            class_vars: false,
            metas: false,
            remove_constant: true,
        }
    }
}
