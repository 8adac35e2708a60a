use anyhow::Result;
use polars::prelude::{Column as PolarsColumn, NamedFrom, Series};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use scour_model::{Column, ColumnKind, ShuffleParts};
use tracing::debug;

use crate::frame::Frame;

/// Independently permute the cells of every column in each enabled group.
///
/// A master RNG (seeded or entropy) hands one sub-seed to each group in a
/// fixed order: classes, attributes, metas. Under a fixed seed, toggling
/// one group never changes another group's permutation. Schema, row count
/// and disabled groups come through untouched.
pub fn shuffle(frame: &Frame, parts: &ShuffleParts, seed: Option<u64>) -> Result<Frame> {
    let mut master = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let class_seed = master.r#gen::<u64>();
    let attribute_seed = master.r#gen::<u64>();
    let meta_seed = master.r#gen::<u64>();

    let mut columns = Vec::with_capacity(frame.width());
    shuffle_group(
        frame,
        &frame.domain().attributes,
        parts.attributes,
        attribute_seed,
        &mut columns,
    )?;
    shuffle_group(
        frame,
        &frame.domain().class_vars,
        parts.class_vars,
        class_seed,
        &mut columns,
    )?;
    shuffle_group(frame, &frame.domain().metas, parts.metas, meta_seed, &mut columns)?;
    debug!(
        classes = parts.class_vars,
        attributes = parts.attributes,
        metas = parts.metas,
        "shuffled"
    );

    Ok(Frame::from_columns(
        frame.domain().clone(),
        columns,
        frame.height(),
    )?)
}

fn shuffle_group(
    frame: &Frame,
    group: &[Column],
    enabled: bool,
    seed: u64,
    columns: &mut Vec<PolarsColumn>,
) -> Result<()> {
    if !enabled {
        for column in group {
            columns.push(frame.data().column(&column.name)?.clone());
        }
        return Ok(());
    }
    let mut rng = StdRng::seed_from_u64(seed);
    for column in group {
        columns.push(shuffle_column(frame, column, &mut rng)?);
    }
    Ok(())
}

fn shuffle_column(frame: &Frame, column: &Column, rng: &mut StdRng) -> Result<PolarsColumn> {
    let name = column.name.as_str();
    let data = match &column.kind {
        ColumnKind::Categorical { .. } => {
            let mut cells = frame.categorical_cells(name)?;
            cells.shuffle(rng);
            Series::new(name.into(), cells).into()
        }
        ColumnKind::Continuous => {
            let mut cells = frame.continuous_cells(name)?;
            cells.shuffle(rng);
            Series::new(name.into(), cells).into()
        }
        ColumnKind::Text => {
            let mut cells = frame.text_cells(name)?;
            cells.shuffle(rng);
            Series::new(name.into(), cells).into()
        }
    };
    Ok(data)
}
