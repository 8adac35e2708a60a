//! Re-express a table under a target domain.

use std::collections::BTreeMap;

use polars::prelude::{Column as PolarsColumn, NamedFrom, Series};
use scour_model::{Column, ColumnKind, Derivation, Domain};
use tracing::debug;

use crate::error::{FrameError, TransformError};
use crate::frame::Frame;

/// What a target column resolves from: a kind plus backing storage,
/// borrowed from the source frame or from an already resolved target.
struct Input<'a> {
    kind: &'a ColumnKind,
    data: &'a PolarsColumn,
}

/// Compute a frame holding `target`'s columns with cells derived from
/// `source`.
///
/// Per column: a derivation resolves first (inputs are searched in the
/// source frame, then among already resolved target columns), otherwise a
/// same-named source column of the same kind is copied, with categoricals
/// recast by value string. Derived-from-derived chains settle over
/// multiple passes; a pass that resolves nothing while columns remain
/// pending fails. All or nothing: no partially converted frame escapes.
pub fn apply_domain(source: &Frame, target: &Domain) -> Result<Frame, TransformError> {
    let targets: Vec<&Column> = target.iter().collect();
    let position: BTreeMap<&str, usize> = targets
        .iter()
        .enumerate()
        .map(|(index, column)| (column.name.as_str(), index))
        .collect();
    let mut resolved: Vec<Option<PolarsColumn>> = (0..targets.len()).map(|_| None).collect();

    let mut pending: Vec<usize> = (0..targets.len()).collect();
    while !pending.is_empty() {
        let mut still_pending = Vec::new();
        let mut progressed = false;
        for index in pending {
            let column = targets[index];
            match resolve(source, column, &targets, &position, &resolved)? {
                Some(data) => {
                    resolved[index] = Some(data);
                    progressed = true;
                }
                None => still_pending.push(index),
            }
        }
        if !progressed && !still_pending.is_empty() {
            return Err(TransformError::UnresolvedDerivation {
                columns: still_pending
                    .iter()
                    .map(|&index| targets[index].name.clone())
                    .collect(),
            });
        }
        pending = still_pending;
    }

    let columns: Vec<PolarsColumn> = resolved.into_iter().flatten().collect();
    let frame = Frame::from_columns(target.clone(), columns, source.height())?;
    debug!(width = frame.width(), rows = frame.height(), "domain applied");
    Ok(frame)
}

/// Resolve one target column, or `None` when its derivation input is a
/// target column that has not settled yet.
fn resolve(
    source: &Frame,
    column: &Column,
    targets: &[&Column],
    position: &BTreeMap<&str, usize>,
    resolved: &[Option<PolarsColumn>],
) -> Result<Option<PolarsColumn>, TransformError> {
    if let Some(derivation) = &column.derivation {
        let input_name = derivation.source();
        let input = if let Some(source_column) = source.domain().column(input_name) {
            Input {
                kind: &source_column.kind,
                data: source.data().column(input_name)?,
            }
        } else if let Some(&pos) = position.get(input_name) {
            match &resolved[pos] {
                Some(data) => Input {
                    kind: &targets[pos].kind,
                    data,
                },
                None => return Ok(None),
            }
        } else {
            return Err(TransformError::missing_column(input_name));
        };
        return derive(column, derivation, &input).map(Some);
    }

    let Some(source_column) = source.domain().column(&column.name) else {
        return Err(TransformError::missing_column(&column.name));
    };
    let input = Input {
        kind: &source_column.kind,
        data: source.data().column(&column.name)?,
    };
    copy_as(column, &input).map(Some)
}

fn derive(
    column: &Column,
    derivation: &Derivation,
    input: &Input<'_>,
) -> Result<PolarsColumn, TransformError> {
    match derivation {
        Derivation::Alias { .. } => copy_as(column, input),
        Derivation::Recode { table, .. } => recode(column, input, table),
        Derivation::Bin { thresholds, .. } => bin(column, input, thresholds),
    }
}

/// Copy `input` under `column`'s name, recasting categoricals by value
/// string.
fn copy_as(column: &Column, input: &Input<'_>) -> Result<PolarsColumn, TransformError> {
    if !column.kind.same_class(input.kind) {
        return Err(TransformError::kind_mismatch(
            &column.name,
            column.kind.kind_name(),
            input.kind.kind_name(),
        ));
    }
    match (&column.kind, input.kind) {
        (
            ColumnKind::Categorical { values: target_values },
            ColumnKind::Categorical { values: source_values },
        ) => recast(column, input, source_values, target_values),
        _ => Ok(input.data.clone().with_name(column.name.as_str().into())),
    }
}

/// Re-encode categorical codes against a new value list. Source values
/// missing from the target list fail on the first row that uses them;
/// declared-but-unused values never trip the error.
fn recast(
    column: &Column,
    input: &Input<'_>,
    source_values: &[String],
    target_values: &[String],
) -> Result<PolarsColumn, TransformError> {
    let remap: Vec<Option<u32>> = source_values
        .iter()
        .map(|value| {
            target_values
                .iter()
                .position(|target| target == value)
                .map(|index| index as u32)
        })
        .collect();
    let mut cells = Vec::with_capacity(input.data.len());
    for cell in input.data.u32()? {
        let mapped = match cell {
            None => None,
            Some(code) => match remap[code as usize] {
                Some(new_code) => Some(new_code),
                None => {
                    return Err(TransformError::unmappable_value(
                        &column.name,
                        &source_values[code as usize],
                    ));
                }
            },
        };
        cells.push(mapped);
    }
    Ok(Series::new(column.name.as_str().into(), cells).into())
}

fn recode(
    column: &Column,
    input: &Input<'_>,
    table: &[Option<u32>],
) -> Result<PolarsColumn, TransformError> {
    if !input.kind.is_categorical() {
        return Err(TransformError::kind_mismatch(
            &column.name,
            "categorical",
            input.kind.kind_name(),
        ));
    }
    // Every code the table can produce must fit the owning value list.
    let len = column.values().len();
    if let Some(code) = table.iter().flatten().copied().find(|&code| code as usize >= len) {
        return Err(FrameError::code_out_of_range(&column.name, code, len).into());
    }
    // Codes past the table's end fold into missing, like None entries.
    let cells: Vec<Option<u32>> = input
        .data
        .u32()?
        .into_iter()
        .map(|cell| cell.and_then(|code| table.get(code as usize).copied().flatten()))
        .collect();
    Ok(Series::new(column.name.as_str().into(), cells).into())
}

fn bin(
    column: &Column,
    input: &Input<'_>,
    thresholds: &[f64],
) -> Result<PolarsColumn, TransformError> {
    if !input.kind.is_continuous() {
        return Err(TransformError::kind_mismatch(
            &column.name,
            "continuous",
            input.kind.kind_name(),
        ));
    }
    // One label per interval, so the last bin's code stays in range.
    let bins = thresholds.len() + 1;
    if column.values().len() < bins {
        return Err(FrameError::code_out_of_range(
            &column.name,
            thresholds.len() as u32,
            column.values().len(),
        )
        .into());
    }
    let cells: Vec<Option<u32>> = input
        .data
        .f64()?
        .into_iter()
        .map(|cell| {
            cell.filter(|v| !v.is_nan())
                .map(|v| thresholds.partition_point(|&t| v >= t) as u32)
        })
        .collect();
    Ok(Series::new(column.name.as_str().into(), cells).into())
}
