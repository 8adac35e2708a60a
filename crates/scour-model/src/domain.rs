use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::{DomainError, Result};

/// Placement of a column within a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroup {
    Attributes,
    ClassVars,
    Metas,
}

impl ColumnGroup {
    pub const ALL: [ColumnGroup; 3] = [Self::Attributes, Self::ClassVars, Self::Metas];

    /// Group label as the workbench prints it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attributes => "features",
            Self::ClassVars => "classes",
            Self::Metas => "metas",
        }
    }
}

impl fmt::Display for ColumnGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered column schema: attributes (features), class variables, metas.
///
/// A domain is plain data. Name uniqueness across the three groups is
/// checked by [`Domain::validate`], which frame construction calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub attributes: Vec<Column>,
    pub class_vars: Vec<Column>,
    pub metas: Vec<Column>,
}

impl Domain {
    pub fn new(attributes: Vec<Column>, class_vars: Vec<Column>, metas: Vec<Column>) -> Self {
        Self {
            attributes,
            class_vars,
            metas,
        }
    }

    /// All columns in attribute, class, meta order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.attributes
            .iter()
            .chain(&self.class_vars)
            .chain(&self.metas)
    }

    pub fn group(&self, group: ColumnGroup) -> &[Column] {
        match group {
            ColumnGroup::Attributes => &self.attributes,
            ColumnGroup::ClassVars => &self.class_vars,
            ColumnGroup::Metas => &self.metas,
        }
    }

    /// Total column count across all groups.
    pub fn len(&self) -> usize {
        self.attributes.len() + self.class_vars.len() + self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a column by name across all groups.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.iter().find(|column| column.name == name)
    }

    /// Look up a column by name, failing with `UnknownColumn`.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| DomainError::unknown_column(name))
    }

    /// Check that no column name repeats across the three groups.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for column in self.iter() {
            if !seen.insert(column.name.as_str()) {
                return Err(DomainError::duplicate_column(&column.name));
            }
        }
        Ok(())
    }
}
