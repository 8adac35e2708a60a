//! Integration tests for row deduplication.

use polars::prelude::{Column as PolarsColumn, DataFrame, IntoColumn, NamedFrom, Series};
use rand::SeedableRng;
use rand::rngs::StdRng;
use scour_core::{Frame, deduplicate};
use scour_model::{Column, Domain, TieBreak};

fn cat(name: &str, values: &[&str], cells: &[Option<u32>]) -> (Column, PolarsColumn) {
    (
        Column::categorical(name, values.iter().copied()),
        Series::new(name.into(), cells.to_vec()).into_column(),
    )
}

fn cont(name: &str, cells: &[Option<f64>]) -> (Column, PolarsColumn) {
    (
        Column::continuous(name),
        Series::new(name.into(), cells.to_vec()).into_column(),
    )
}

fn build(
    attributes: Vec<(Column, PolarsColumn)>,
    metas: Vec<(Column, PolarsColumn)>,
) -> Frame {
    let mut data = Vec::new();
    let mut split = |group: Vec<(Column, PolarsColumn)>| -> Vec<Column> {
        group
            .into_iter()
            .map(|(column, cells)| {
                data.push(cells);
                column
            })
            .collect()
    };
    let attributes = split(attributes);
    let metas = split(metas);
    Frame::new(
        Domain::new(attributes, vec![], metas),
        DataFrame::new(data).unwrap(),
    )
    .unwrap()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn first_tiebreak_keeps_first_occurrence() {
    let frame = build(
        vec![cat("buying", &["v-high", "low"], &[Some(0), Some(0), Some(1)])],
        vec![cont("id", &[Some(10.0), Some(20.0), Some(5.0)])],
    );
    let result = deduplicate(&frame, &keys(&["buying"]), TieBreak::First, &mut rng())
        .unwrap()
        .unwrap();

    assert_eq!(result.height(), 2);
    assert_eq!(
        result.continuous_cells("id").unwrap(),
        vec![Some(10.0), Some(5.0)]
    );
}

#[test]
fn last_tiebreak_keeps_final_occurrence() {
    let frame = build(
        vec![cat("buying", &["v-high", "low"], &[Some(0), Some(0), Some(1)])],
        vec![cont("id", &[Some(10.0), Some(20.0), Some(5.0)])],
    );
    let result = deduplicate(&frame, &keys(&["buying"]), TieBreak::Last, &mut rng())
        .unwrap()
        .unwrap();

    // row order is preserved even though the survivors changed
    assert_eq!(
        result.continuous_cells("id").unwrap(),
        vec![Some(20.0), Some(5.0)]
    );
}

#[test]
fn middle_tiebreak_takes_the_floor_midpoint() {
    let frame = build(
        vec![cat("k", &["a"], &[Some(0), Some(0), Some(0), Some(0)])],
        vec![cont("id", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)])],
    );
    let result = deduplicate(&frame, &keys(&["k"]), TieBreak::Middle, &mut rng())
        .unwrap()
        .unwrap();

    // four occurrences: index 4 / 2 = 2, the third row
    assert_eq!(result.continuous_cells("id").unwrap(), vec![Some(3.0)]);
}

#[test]
fn random_tiebreak_is_deterministic_under_a_seed() {
    let frame = build(
        vec![cat(
            "k",
            &["a", "b"],
            &[Some(0), Some(0), Some(1), Some(1), Some(0)],
        )],
        vec![cont(
            "id",
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
        )],
    );
    let mut first_rng = StdRng::seed_from_u64(99);
    let mut second_rng = StdRng::seed_from_u64(99);
    let first = deduplicate(&frame, &keys(&["k"]), TieBreak::Random, &mut first_rng)
        .unwrap()
        .unwrap();
    let second = deduplicate(&frame, &keys(&["k"]), TieBreak::Random, &mut second_rng)
        .unwrap()
        .unwrap();

    assert_eq!(first.height(), 2);
    assert_eq!(
        first.continuous_cells("id").unwrap(),
        second.continuous_cells("id").unwrap()
    );
}

#[test]
fn discard_non_unique_keeps_only_singletons() {
    let frame = build(
        vec![cat("k", &["a", "b"], &[Some(0), Some(0), Some(1)])],
        vec![cont("id", &[Some(1.0), Some(2.0), Some(3.0)])],
    );
    let result = deduplicate(
        &frame,
        &keys(&["k"]),
        TieBreak::DiscardNonUnique,
        &mut rng(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(result.continuous_cells("id").unwrap(), vec![Some(3.0)]);
}

#[test]
fn discard_non_unique_can_drop_everything() {
    let frame = build(
        vec![cat("k", &["a"], &[Some(0), Some(0)])],
        vec![cont("id", &[Some(1.0), Some(2.0)])],
    );
    let result = deduplicate(
        &frame,
        &keys(&["k"]),
        TieBreak::DiscardNonUnique,
        &mut rng(),
    )
    .unwrap();

    // no group survives: that is no data, not an empty table
    assert!(result.is_none());
}

#[test]
fn empty_keys_default_to_the_attribute_group() {
    let frame = build(
        vec![
            cat("a", &["x", "y"], &[Some(0), Some(0), Some(1)]),
            cat("b", &["p"], &[Some(0), Some(0), Some(0)]),
        ],
        vec![cont("id", &[Some(1.0), Some(2.0), Some(3.0)])],
    );
    // meta "id" differs per row but is not part of the default key
    let result = deduplicate(&frame, &[], TieBreak::First, &mut rng())
        .unwrap()
        .unwrap();

    assert_eq!(result.height(), 2);
    assert_eq!(
        result.continuous_cells("id").unwrap(),
        vec![Some(1.0), Some(3.0)]
    );
}

#[test]
fn unknown_keys_are_skipped() {
    let frame = build(
        vec![cat("k", &["a", "b"], &[Some(0), Some(0), Some(1)])],
        vec![],
    );
    let result = deduplicate(
        &frame,
        &keys(&["ghost", "k"]),
        TieBreak::First,
        &mut rng(),
    )
    .unwrap()
    .unwrap();
    assert_eq!(result.height(), 2);
}

#[test]
fn only_unknown_keys_yield_no_data() {
    let frame = build(
        vec![cat("k", &["a"], &[Some(0)])],
        vec![],
    );
    let result = deduplicate(&frame, &keys(&["ghost"]), TieBreak::First, &mut rng()).unwrap();
    assert!(result.is_none());
}

#[test]
fn no_attributes_and_no_keys_yield_no_data() {
    let frame = build(vec![], vec![cont("id", &[Some(1.0), Some(2.0)])]);
    let result = deduplicate(&frame, &[], TieBreak::First, &mut rng()).unwrap();
    assert!(result.is_none());
}

#[test]
fn missing_cells_share_a_group() {
    // null and NaN are the same missing value; -0.0 groups with 0.0
    let frame = build(
        vec![cont(
            "k",
            &[None, Some(f64::NAN), Some(0.0), Some(-0.0), Some(1.0)],
        )],
        vec![cont(
            "id",
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)],
        )],
    );
    let result = deduplicate(&frame, &keys(&["k"]), TieBreak::First, &mut rng())
        .unwrap()
        .unwrap();

    // groups: {missing}, {0.0}, {1.0}
    assert_eq!(result.height(), 3);
    assert_eq!(
        result.continuous_cells("id").unwrap(),
        vec![Some(1.0), Some(3.0), Some(5.0)]
    );
}

#[test]
fn multi_column_keys_group_on_the_tuple() {
    let frame = build(
        vec![
            cat("a", &["x", "y"], &[Some(0), Some(0), Some(1), Some(0)]),
            cat("b", &["p", "q"], &[Some(0), Some(1), Some(0), Some(0)]),
        ],
        vec![cont("id", &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)])],
    );
    let result = deduplicate(&frame, &keys(&["a", "b"]), TieBreak::Last, &mut rng())
        .unwrap()
        .unwrap();

    // tuples: (x,p) twice, (x,q), (y,p); Last keeps row 4 for (x,p)
    assert_eq!(result.height(), 3);
    assert_eq!(
        result.continuous_cells("id").unwrap(),
        vec![Some(2.0), Some(3.0), Some(4.0)]
    );
}
