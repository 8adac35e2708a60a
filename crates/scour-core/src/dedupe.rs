use std::collections::BTreeMap;

use anyhow::Result;
use polars::prelude::UInt32Chunked;
use rand::Rng;
use scour_model::{Column, ColumnKind, TieBreak};
use tracing::{debug, warn};

use crate::data_utils::normalize_bits;
use crate::frame::Frame;

/// One key cell in a form with total equality and ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyPart {
    Missing,
    Code(u32),
    Number(u64),
    Text(String),
}

/// Keep one row per distinct key tuple, in original row order.
///
/// Empty `keys` falls back to the attribute group; unknown names are
/// skipped with a warning. Missing cells compare equal to missing cells
/// of the same column. When no row is chosen, because no key column was
/// left or every group was discarded, the result is `None` rather than
/// a zero-row table.
pub fn deduplicate<R: Rng + ?Sized>(
    frame: &Frame,
    keys: &[String],
    tiebreak: TieBreak,
    rng: &mut R,
) -> Result<Option<Frame>> {
    let selected = select_keys(frame, keys);
    if selected.is_empty() {
        return Ok(None);
    }

    let mut key_columns = Vec::with_capacity(selected.len());
    for column in &selected {
        key_columns.push(key_parts(frame, column)?);
    }

    let mut groups: BTreeMap<Vec<KeyPart>, Vec<usize>> = BTreeMap::new();
    for row in 0..frame.height() {
        let key: Vec<KeyPart> = key_columns.iter().map(|cells| cells[row].clone()).collect();
        groups.entry(key).or_default().push(row);
    }

    let mut chosen: Vec<u32> = groups
        .values()
        .filter_map(|rows| pick(rows, tiebreak, rng))
        .map(|row| row as u32)
        .collect();
    chosen.sort_unstable();
    debug!(
        rows = frame.height(),
        groups = groups.len(),
        kept = chosen.len(),
        "deduplicated"
    );

    if chosen.is_empty() {
        return Ok(None);
    }
    let indices = UInt32Chunked::from_vec("rows".into(), chosen);
    let data = frame.data().take(&indices)?;
    Ok(Some(Frame::new(frame.domain().clone(), data)?))
}

fn select_keys<'a>(frame: &'a Frame, keys: &[String]) -> Vec<&'a Column> {
    if keys.is_empty() {
        return frame.domain().attributes.iter().collect();
    }
    let mut selected = Vec::with_capacity(keys.len());
    for name in keys {
        match frame.domain().column(name) {
            Some(column) => selected.push(column),
            None => warn!(column = %name, "skipping unknown key column"),
        }
    }
    selected
}

fn key_parts(frame: &Frame, column: &Column) -> Result<Vec<KeyPart>> {
    let parts = match &column.kind {
        ColumnKind::Categorical { .. } => frame
            .categorical_cells(&column.name)?
            .into_iter()
            .map(|cell| cell.map_or(KeyPart::Missing, KeyPart::Code))
            .collect(),
        ColumnKind::Continuous => frame
            .continuous_cells(&column.name)?
            .into_iter()
            .map(|cell| cell.map_or(KeyPart::Missing, |v| KeyPart::Number(normalize_bits(v))))
            .collect(),
        ColumnKind::Text => frame
            .text_cells(&column.name)?
            .into_iter()
            .map(|cell| cell.map_or(KeyPart::Missing, KeyPart::Text))
            .collect(),
    };
    Ok(parts)
}

fn pick<R: Rng + ?Sized>(rows: &[usize], tiebreak: TieBreak, rng: &mut R) -> Option<usize> {
    match tiebreak {
        TieBreak::Last => rows.last().copied(),
        TieBreak::First => rows.first().copied(),
        TieBreak::Middle => rows.get(rows.len() / 2).copied(),
        TieBreak::Random => rows.get(rng.gen_range(0..rows.len())).copied(),
        TieBreak::DiscardNonUnique => match rows {
            [only] => Some(*only),
            _ => None,
        },
    }
}
