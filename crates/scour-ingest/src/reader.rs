//! Reader for the three-header-row typed CSV dialect.
//!
//! Row 1 names the columns, row 2 declares their kinds and row 3 their
//! roles. Columns whose role is `ignore` are dropped at load; everything
//! else lands in the frame's attribute, class or meta group.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIter};
use polars::prelude::{Column as PolarsColumn, NamedFrom, Series};
use tracing::debug;

use scour_core::{Frame, parse_f64};
use scour_model::{Column, ColumnGroup, Domain};

use crate::error::{IngestError, Result};

/// Kind token of a column before its value list is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawKind {
    Categorical,
    Continuous,
    Text,
}

/// A kept column: its position in the raw records plus parsed headers.
#[derive(Debug)]
struct DeclaredColumn {
    index: usize,
    name: String,
    kind: RawKind,
    group: ColumnGroup,
}

/// Cells of one column, accumulated while scanning data records.
enum CellBuffer {
    Categorical {
        values: Vec<String>,
        lookup: BTreeMap<String, u32>,
        cells: Vec<Option<u32>>,
    },
    Continuous {
        cells: Vec<Option<f64>>,
    },
    Text {
        cells: Vec<Option<String>>,
    },
}

impl CellBuffer {
    fn new(kind: RawKind) -> Self {
        match kind {
            RawKind::Categorical => Self::Categorical {
                values: Vec::new(),
                lookup: BTreeMap::new(),
                cells: Vec::new(),
            },
            RawKind::Continuous => Self::Continuous { cells: Vec::new() },
            RawKind::Text => Self::Text { cells: Vec::new() },
        }
    }

    /// Append one trimmed cell; `row` is the 1-based data record number.
    fn push(&mut self, column: &str, row: usize, raw: &str) -> Result<()> {
        let value = raw.trim();
        match self {
            Self::Categorical {
                values,
                lookup,
                cells,
            } => {
                if value.is_empty() {
                    cells.push(None);
                } else if let Some(code) = lookup.get(value) {
                    cells.push(Some(*code));
                } else {
                    let code = values.len() as u32;
                    values.push(value.to_string());
                    lookup.insert(value.to_string(), code);
                    cells.push(Some(code));
                }
            }
            Self::Continuous { cells } => {
                if value.is_empty() {
                    cells.push(None);
                } else if let Some(parsed) = parse_f64(value) {
                    cells.push(Some(parsed));
                } else {
                    return Err(IngestError::non_numeric_cell(column, row, value));
                }
            }
            Self::Text { cells } => {
                if value.is_empty() {
                    cells.push(None);
                } else {
                    cells.push(Some(value.to_string()));
                }
            }
        }
        Ok(())
    }

    fn finish(self, name: &str) -> (Column, PolarsColumn) {
        match self {
            Self::Categorical { values, cells, .. } => (
                Column::categorical(name, values),
                Series::new(name.into(), cells).into(),
            ),
            Self::Continuous { cells } => (
                Column::continuous(name),
                Series::new(name.into(), cells).into(),
            ),
            Self::Text { cells } => (
                Column::text(name),
                Series::new(name.into(), cells).into(),
            ),
        }
    }
}

fn parse_kind(column: &str, token: &str) -> Result<RawKind> {
    match token.trim().to_ascii_lowercase().as_str() {
        "categorical" | "discrete" | "d" => Ok(RawKind::Categorical),
        "continuous" | "c" => Ok(RawKind::Continuous),
        "text" | "string" | "s" => Ok(RawKind::Text),
        _ => Err(IngestError::unknown_kind(column, token.trim())),
    }
}

/// Parse a role token; `None` marks a column dropped at load.
fn parse_role(column: &str, token: &str) -> Result<Option<ColumnGroup>> {
    match token.trim().to_ascii_lowercase().as_str() {
        "" | "attribute" => Ok(Some(ColumnGroup::Attributes)),
        "class" => Ok(Some(ColumnGroup::ClassVars)),
        "meta" => Ok(Some(ColumnGroup::Metas)),
        "ignore" => Ok(None),
        _ => Err(IngestError::unknown_role(column, token.trim())),
    }
}

fn normalize_name(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn next_header<R: Read>(
    records: &mut StringRecordsIter<'_, R>,
    expected: &'static str,
) -> Result<StringRecord> {
    match records.next() {
        Some(record) => Ok(record?),
        None => Err(IngestError::missing_header(expected)),
    }
}

/// Read a typed table from `path`.
pub fn read_frame(path: &Path) -> Result<Frame> {
    let reader = ReaderBuilder::new().has_headers(false).from_path(path)?;
    let frame = read_typed(reader)?;
    debug!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded typed csv"
    );
    Ok(frame)
}

/// Read a typed table from any reader carrying the same dialect.
pub fn read_frame_from<R: Read>(input: R) -> Result<Frame> {
    let reader = ReaderBuilder::new().has_headers(false).from_reader(input);
    read_typed(reader)
}

fn read_typed<R: Read>(mut reader: csv::Reader<R>) -> Result<Frame> {
    let mut records = reader.records();

    let names = next_header(&mut records, "column names")?;
    let kinds = next_header(&mut records, "column kinds")?;
    let roles = next_header(&mut records, "column roles")?;

    let mut seen = BTreeSet::new();
    let mut declared: Vec<DeclaredColumn> = Vec::with_capacity(names.len());
    for (index, raw_name) in names.iter().enumerate() {
        let name = normalize_name(raw_name);
        let Some(group) = parse_role(&name, roles.get(index).unwrap_or(""))? else {
            continue;
        };
        let kind = parse_kind(&name, kinds.get(index).unwrap_or(""))?;
        if !seen.insert(name.clone()) {
            return Err(IngestError::duplicate_column(name));
        }
        declared.push(DeclaredColumn {
            index,
            name,
            kind,
            group,
        });
    }

    let mut buffers: Vec<CellBuffer> = declared.iter().map(|decl| CellBuffer::new(decl.kind)).collect();
    let mut height = 0usize;
    for (data_row, record) in records.enumerate() {
        let record = record?;
        height += 1;
        for (decl, buffer) in declared.iter().zip(buffers.iter_mut()) {
            let raw = record.get(decl.index).unwrap_or("");
            buffer.push(&decl.name, data_row + 1, raw)?;
        }
    }

    let mut attributes = Vec::new();
    let mut class_vars = Vec::new();
    let mut metas = Vec::new();
    let mut attr_data = Vec::new();
    let mut class_data = Vec::new();
    let mut meta_data = Vec::new();
    for (decl, buffer) in declared.into_iter().zip(buffers) {
        let (column, data) = buffer.finish(&decl.name);
        match decl.group {
            ColumnGroup::Attributes => {
                attributes.push(column);
                attr_data.push(data);
            }
            ColumnGroup::ClassVars => {
                class_vars.push(column);
                class_data.push(data);
            }
            ColumnGroup::Metas => {
                metas.push(column);
                meta_data.push(data);
            }
        }
    }

    let domain = Domain::new(attributes, class_vars, metas);
    let mut columns = attr_data;
    columns.extend(class_data);
    columns.extend(meta_data);
    Ok(Frame::from_columns(domain, columns, height)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tokens_accept_aliases() {
        for token in ["categorical", "discrete", "d", "D", " discrete "] {
            assert_eq!(parse_kind("x", token).unwrap(), RawKind::Categorical);
        }
        for token in ["continuous", "c"] {
            assert_eq!(parse_kind("x", token).unwrap(), RawKind::Continuous);
        }
        for token in ["text", "string", "s"] {
            assert_eq!(parse_kind("x", token).unwrap(), RawKind::Text);
        }
        assert!(matches!(
            parse_kind("x", "numeric"),
            Err(IngestError::UnknownKind { .. })
        ));
    }

    #[test]
    fn role_tokens_map_to_groups() {
        assert_eq!(parse_role("x", "").unwrap(), Some(ColumnGroup::Attributes));
        assert_eq!(
            parse_role("x", "attribute").unwrap(),
            Some(ColumnGroup::Attributes)
        );
        assert_eq!(parse_role("x", "class").unwrap(), Some(ColumnGroup::ClassVars));
        assert_eq!(parse_role("x", "META").unwrap(), Some(ColumnGroup::Metas));
        assert_eq!(parse_role("x", "ignore").unwrap(), None);
        assert!(matches!(
            parse_role("x", "target"),
            Err(IngestError::UnknownRole { .. })
        ));
    }

    #[test]
    fn name_normalization_strips_bom_and_spaces() {
        assert_eq!(normalize_name("\u{feff}sepal length "), "sepal length");
    }
}
