//! Domain purge: drop constant columns, drop unused categorical values,
//! sort value lists.

use std::collections::BTreeSet;

use anyhow::Result;
use polars::prelude::{Column as PolarsColumn, NamedFrom, Series};
use scour_model::{
    Column, ColumnKind, Derivation, Domain, GroupCounts, PurgeConfig, PurgeOptions, PurgeReport,
};
use tracing::debug;

use crate::data_utils::{normalize_bits, sort_labels};
use crate::frame::Frame;

/// Run one purge pass over `frame`, group by group.
///
/// Counters in the report move only on actual change, so a second pass
/// with the same switches reports all zeros. Row count is never touched;
/// dropping every column leaves a zero-width frame of the same height.
pub fn purge(frame: &Frame, config: &PurgeConfig) -> Result<(Frame, PurgeReport)> {
    let mut report = PurgeReport::default();
    let mut columns = Vec::new();

    let attributes = purge_group(
        frame,
        &frame.domain().attributes,
        &config.attributes,
        &mut report.attributes,
        &mut columns,
    )?;
    let class_vars = purge_group(
        frame,
        &frame.domain().class_vars,
        &config.class_vars,
        &mut report.class_vars,
        &mut columns,
    )?;
    let metas = purge_group(
        frame,
        &frame.domain().metas,
        &config.metas,
        &mut report.metas,
        &mut columns,
    )?;

    let domain = Domain::new(attributes, class_vars, metas);
    let purged = Frame::from_columns(domain, columns, frame.height())?;
    debug!(
        width_before = frame.width(),
        width_after = purged.width(),
        "purge pass complete"
    );
    Ok((purged, report))
}

fn purge_group(
    frame: &Frame,
    group: &[Column],
    opts: &PurgeOptions,
    counts: &mut GroupCounts,
    columns: &mut Vec<PolarsColumn>,
) -> Result<Vec<Column>> {
    let mut kept = Vec::with_capacity(group.len());
    for column in group {
        match purge_column(frame, column, opts, counts)? {
            Some((new_column, data)) => {
                kept.push(new_column);
                columns.push(data);
            }
            None => {
                counts.removed += 1;
                debug!(column = %column.name, "removed column");
            }
        }
    }
    Ok(kept)
}

fn purge_column(
    frame: &Frame,
    column: &Column,
    opts: &PurgeOptions,
    counts: &mut GroupCounts,
) -> Result<Option<(Column, PolarsColumn)>> {
    match &column.kind {
        ColumnKind::Categorical { values } => {
            purge_categorical(frame, column, values, opts, counts)
        }
        ColumnKind::Continuous => {
            if opts.remove_constant && continuous_is_constant(frame, &column.name)? {
                return Ok(None);
            }
            Ok(Some(passthrough(frame, column)?))
        }
        ColumnKind::Text => {
            if opts.remove_constant && text_is_constant(frame, &column.name)? {
                return Ok(None);
            }
            Ok(Some(passthrough(frame, column)?))
        }
    }
}

fn purge_categorical(
    frame: &Frame,
    column: &Column,
    values: &[String],
    opts: &PurgeOptions,
    counts: &mut GroupCounts,
) -> Result<Option<(Column, PolarsColumn)>> {
    let cells = frame.categorical_cells(&column.name)?;
    let used: BTreeSet<u32> = cells.iter().flatten().copied().collect();

    if opts.remove_constant && used.len() <= 1 {
        return Ok(None);
    }

    // Retained values keep their original relative order until sorting.
    let mut retained: Vec<(u32, String)> = if opts.remove_unused_values {
        used.iter()
            .map(|&code| (code, values[code as usize].clone()))
            .collect()
    } else {
        values
            .iter()
            .enumerate()
            .map(|(code, value)| (code as u32, value.clone()))
            .collect()
    };
    let reduced = retained.len() < values.len();

    if opts.sort_values {
        let before: Vec<u32> = retained.iter().map(|pair| pair.0).collect();
        sort_labels(&mut retained);
        let after: Vec<u32> = retained.iter().map(|pair| pair.0).collect();
        if after != before {
            counts.sorted += 1;
        }
    }

    // Old code -> new code; values that fell away map to missing.
    let mut table: Vec<Option<u32>> = vec![None; values.len()];
    for (new_code, (old_code, _)) in retained.iter().enumerate() {
        table[*old_code as usize] = Some(new_code as u32);
    }
    let identity = retained.len() == values.len()
        && table
            .iter()
            .enumerate()
            .all(|(old, new)| *new == Some(old as u32));
    if identity {
        return Ok(Some(passthrough(frame, column)?));
    }

    if reduced {
        counts.reduced += 1;
        debug!(
            column = %column.name,
            kept = retained.len(),
            declared = values.len(),
            "dropped unused values"
        );
    }

    let remapped: Vec<Option<u32>> = cells
        .iter()
        .map(|&cell| cell.and_then(|code| table[code as usize]))
        .collect();
    let new_values: Vec<String> = retained.into_iter().map(|(_, value)| value).collect();

    let new_column = Column {
        name: column.name.clone(),
        kind: ColumnKind::Categorical { values: new_values },
        derivation: Some(Derivation::Recode {
            source: column.name.clone(),
            table,
        }),
    };
    let data = Series::new(column.name.as_str().into(), remapped).into();
    Ok(Some((new_column, data)))
}

fn passthrough(frame: &Frame, column: &Column) -> Result<(Column, PolarsColumn)> {
    let data = frame.data().column(&column.name)?.clone();
    Ok((column.clone(), data))
}

fn continuous_is_constant(frame: &Frame, name: &str) -> Result<bool> {
    let mut distinct = BTreeSet::new();
    for v in frame.continuous_cells(name)?.into_iter().flatten() {
        distinct.insert(normalize_bits(v));
        if distinct.len() > 1 {
            return Ok(false);
        }
    }
    Ok(true)
}

fn text_is_constant(frame: &Frame, name: &str) -> Result<bool> {
    let mut distinct = BTreeSet::new();
    for s in frame.text_cells(name)?.into_iter().flatten() {
        distinct.insert(s);
        if distinct.len() > 1 {
            return Ok(false);
        }
    }
    Ok(true)
}
