use serde::{Deserialize, Serialize};

use crate::domain::ColumnGroup;

/// Change counters for one purged column group.
///
/// A counter moves only when the pass actually changed something: a value
/// list that was already sorted does not count as sorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCounts {
    /// Columns whose value list was reordered.
    pub sorted: usize,
    /// Columns that lost unused values but survived.
    pub reduced: usize,
    /// Columns dropped outright.
    pub removed: usize,
}

impl GroupCounts {
    pub fn is_unchanged(&self) -> bool {
        self.sorted == 0 && self.reduced == 0 && self.removed == 0
    }
}

/// What a purge pass did, group by group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReport {
    pub attributes: GroupCounts,
    pub class_vars: GroupCounts,
    pub metas: GroupCounts,
}

impl PurgeReport {
    pub fn group(&self, group: ColumnGroup) -> &GroupCounts {
        match group {
            ColumnGroup::Attributes => &self.attributes,
            ColumnGroup::ClassVars => &self.class_vars,
            ColumnGroup::Metas => &self.metas,
        }
    }

    /// True when the pass changed nothing in any group.
    pub fn is_unchanged(&self) -> bool {
        self.attributes.is_unchanged()
            && self.class_vars.is_unchanged()
            && self.metas.is_unchanged()
    }
}
