use anyhow::Result;
use scour_model::{BinningOptions, Column, ColumnKind, Derivation, Domain};
use tracing::debug;

use crate::data_utils::format_numeric;
use crate::frame::Frame;

/// Build a target domain that bins every continuous column of the
/// enabled groups into `bins` equal-width categories.
///
/// Attributes are always binned; classes and metas opt in via `opts`.
/// The result is a template: run it through
/// [`apply_domain`](crate::apply_domain) to materialize the discretized
/// table. Pass-through columns shed any derivation they carried so the
/// transformer resolves them by plain name copy. `bins` is clamped to at
/// least one.
pub fn equal_width_template(frame: &Frame, bins: usize, opts: &BinningOptions) -> Result<Domain> {
    let bins = bins.max(1);
    let attributes = bin_group(frame, &frame.domain().attributes, true, bins, opts)?;
    let class_vars = bin_group(frame, &frame.domain().class_vars, opts.class_vars, bins, opts)?;
    let metas = bin_group(frame, &frame.domain().metas, opts.metas, bins, opts)?;
    Ok(Domain::new(attributes, class_vars, metas))
}

fn bin_group(
    frame: &Frame,
    group: &[Column],
    enabled: bool,
    bins: usize,
    opts: &BinningOptions,
) -> Result<Vec<Column>> {
    let mut out = Vec::with_capacity(group.len());
    for column in group {
        if enabled && column.kind.is_continuous() {
            match bin_column(frame, column, bins, opts.remove_constant)? {
                Some(binned) => out.push(binned),
                None => debug!(column = %column.name, "dropped constant column"),
            }
        } else {
            out.push(passthrough(column));
        }
    }
    Ok(out)
}

fn passthrough(column: &Column) -> Column {
    Column {
        name: column.name.clone(),
        kind: column.kind.clone(),
        derivation: None,
    }
}

fn bin_column(
    frame: &Frame,
    column: &Column,
    bins: usize,
    remove_constant: bool,
) -> Result<Option<Column>> {
    let cells = frame.continuous_cells(&column.name)?;
    let finite: Vec<f64> = cells
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();

    let Some((min, max)) = bounds(&finite) else {
        return Ok((!remove_constant).then(|| single_bin(column, "?")));
    };
    if min == max {
        return Ok((!remove_constant).then(|| single_bin(column, &format_numeric(min))));
    }
    if bins == 1 {
        let label = format!("{} - {}", format_numeric(min), format_numeric(max));
        return Ok(Some(single_bin(column, &label)));
    }

    let width = (max - min) / bins as f64;
    let thresholds: Vec<f64> = (1..bins).map(|i| min + width * i as f64).collect();
    let mut values = Vec::with_capacity(bins);
    values.push(format!("< {}", format_numeric(thresholds[0])));
    for pair in thresholds.windows(2) {
        values.push(format!(
            "{} - {}",
            format_numeric(pair[0]),
            format_numeric(pair[1])
        ));
    }
    values.push(format!(
        "≥ {}",
        format_numeric(thresholds[thresholds.len() - 1])
    ));

    Ok(Some(Column {
        name: column.name.clone(),
        kind: ColumnKind::Categorical { values },
        derivation: Some(Derivation::Bin {
            source: column.name.clone(),
            thresholds,
        }),
    }))
}

/// A one-bucket categorical over `column`; every non-missing value lands
/// in it.
fn single_bin(column: &Column, label: &str) -> Column {
    Column {
        name: column.name.clone(),
        kind: ColumnKind::Categorical {
            values: vec![label.to_string()],
        },
        derivation: Some(Derivation::Bin {
            source: column.name.clone(),
            thresholds: Vec::new(),
        }),
    }
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    let mut min = first;
    let mut max = first;
    for v in iter {
        min = min.min(v);
        max = max.max(v);
    }
    Some((min, max))
}
