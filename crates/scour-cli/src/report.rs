//! Rendering of schema summaries and purge reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use scour_core::Frame;
use scour_model::{ColumnGroup, ColumnKind, PurgeConfig, PurgeReport};

/// Plain-text sketch of a frame: row count, then each group's columns.
pub fn describe_frame(frame: &Frame) -> String {
    let mut out = format!("{} rows\n", frame.height());
    for group in ColumnGroup::ALL {
        let columns = frame.domain().group(group);
        if columns.is_empty() {
            out.push_str(&format!("{group}: none\n"));
            continue;
        }
        out.push_str(&format!("{group}:\n"));
        for column in columns {
            out.push_str(&format!(
                "  {}: {}\n",
                column.name,
                describe_kind(&column.kind)
            ));
        }
    }
    out
}

fn describe_kind(kind: &ColumnKind) -> String {
    match kind {
        ColumnKind::Categorical { values } => format!("categorical ({} values)", values.len()),
        ColumnKind::Continuous => "continuous".to_string(),
        ColumnKind::Text => "text".to_string(),
    }
}

/// The nine purge counters as a table, one row per group.
///
/// A counter whose switch was off never ran; its cell renders "-".
pub fn purge_report_table(report: &PurgeReport, config: &PurgeConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Sorted"),
        header_cell("Reduced"),
        header_cell("Removed"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for group in ColumnGroup::ALL {
        let counts = report.group(group);
        let opts = config.group(group);
        table.add_row(vec![
            Cell::new(group.as_str()),
            count_cell(opts.sort_values.then_some(counts.sorted)),
            count_cell(opts.remove_unused_values.then_some(counts.reduced)),
            count_cell(opts.remove_constant.then_some(counts.removed)),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
