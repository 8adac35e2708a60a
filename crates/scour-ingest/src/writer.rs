//! Writer emitting the same three-header-row dialect the reader accepts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use scour_core::{Frame, format_numeric};
use scour_model::{Column, ColumnGroup, ColumnKind};

use crate::error::Result;

fn role_token(group: ColumnGroup) -> &'static str {
    match group {
        ColumnGroup::Attributes => "",
        ColumnGroup::ClassVars => "class",
        ColumnGroup::Metas => "meta",
    }
}

/// Render one column's cells as output strings, missing as "".
fn render_cells(frame: &Frame, column: &Column) -> Result<Vec<String>> {
    let rendered = match &column.kind {
        ColumnKind::Categorical { values } => frame
            .categorical_cells(&column.name)?
            .into_iter()
            .map(|cell| match cell {
                Some(code) => values.get(code as usize).cloned().unwrap_or_default(),
                None => String::new(),
            })
            .collect(),
        ColumnKind::Continuous => frame
            .continuous_cells(&column.name)?
            .into_iter()
            .map(|cell| cell.map(format_numeric).unwrap_or_default())
            .collect(),
        ColumnKind::Text => frame
            .text_cells(&column.name)?
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect(),
    };
    Ok(rendered)
}

/// Write `frame` as a typed CSV table at `path`.
pub fn write_frame(path: &Path, frame: &Frame) -> Result<()> {
    let file = File::create(path)?;
    write_frame_to(file, frame)?;
    debug!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "wrote typed csv"
    );
    Ok(())
}

/// Write `frame` to any sink. A table with no columns serializes to an
/// empty file.
pub fn write_frame_to<W: Write>(output: W, frame: &Frame) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(output);
    let domain = frame.domain();
    if domain.is_empty() {
        writer.flush()?;
        return Ok(());
    }

    writer.write_record(domain.iter().map(|column| column.name.as_str()))?;
    writer.write_record(domain.iter().map(|column| column.kind.kind_name()))?;
    let roles = ColumnGroup::ALL
        .iter()
        .flat_map(|&group| domain.group(group).iter().map(move |_| role_token(group)));
    writer.write_record(roles)?;

    let mut rendered = Vec::with_capacity(domain.len());
    for column in domain.iter() {
        rendered.push(render_cells(frame, column)?);
    }
    for row in 0..frame.height() {
        writer.write_record(rendered.iter().map(|cells| cells[row].as_str()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{NamedFrom, Series};
    use scour_model::Domain;

    use super::*;

    #[test]
    fn renders_headers_then_decoded_cells() {
        let domain = Domain::new(
            vec![
                Column::categorical("color", ["red", "blue"]),
                Column::continuous("size"),
            ],
            vec![Column::categorical("grade", ["ok"])],
            vec![Column::text("note")],
        );
        let columns = vec![
            Series::new("color".into(), vec![Some(1u32), None]).into(),
            Series::new("size".into(), vec![Some(2.5f64), Some(100.0)]).into(),
            Series::new("grade".into(), vec![Some(0u32), Some(0u32)]).into(),
            Series::new("note".into(), vec![Some("fine"), None]).into(),
        ];
        let frame = Frame::from_columns(domain, columns, 2).unwrap();

        let mut out = Vec::new();
        write_frame_to(&mut out, &frame).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "color,size,grade,note\n\
             categorical,continuous,categorical,text\n\
             ,,class,meta\n\
             blue,2.5,ok,fine\n\
             ,100,ok,\n"
        );
    }

    #[test]
    fn zero_column_frame_writes_nothing() {
        let frame = Frame::from_columns(Domain::new(vec![], vec![], vec![]), vec![], 4).unwrap();
        let mut out = Vec::new();
        write_frame_to(&mut out, &frame).unwrap();
        assert!(out.is_empty());
    }
}
