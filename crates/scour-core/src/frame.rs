//! Typed table: a domain plus its polars backing storage.

use polars::prelude::{Column as PolarsColumn, DataFrame, DataType, PolarsResult};
use scour_model::{ColumnKind, Domain};

use crate::error::FrameError;

/// Storage dtype a column kind maps to.
fn storage_dtype(kind: &ColumnKind) -> DataType {
    match kind {
        ColumnKind::Categorical { .. } => DataType::UInt32,
        ColumnKind::Continuous => DataType::Float64,
        ColumnKind::Text => DataType::String,
    }
}

/// A table whose columns are described by a [`Domain`].
///
/// Storage conventions, checked at construction:
///   - categorical columns are `UInt32` codes into the declared value
///     list; null is missing;
///   - continuous columns are `Float64`; null and NaN are missing;
///   - text columns are `String`; null and the empty string are missing.
///
/// Height is tracked separately from storage so a frame that lost every
/// column still reports its row count.
#[derive(Debug, Clone)]
pub struct Frame {
    domain: Domain,
    data: DataFrame,
    height: usize,
}

impl Frame {
    /// Bind `domain` to `data`, checking that they conform.
    pub fn new(domain: Domain, data: DataFrame) -> Result<Self, FrameError> {
        domain.validate()?;
        if domain.len() != data.width() {
            return Err(FrameError::WidthMismatch {
                expected: domain.len(),
                actual: data.width(),
            });
        }
        for (index, (column, stored)) in domain.iter().zip(data.get_columns()).enumerate() {
            if column.name != stored.name().as_str() {
                return Err(FrameError::name_mismatch(
                    index,
                    &column.name,
                    stored.name().as_str(),
                ));
            }
            let expected = storage_dtype(&column.kind);
            if stored.dtype() != &expected {
                return Err(FrameError::dtype_mismatch(
                    &column.name,
                    expected.to_string(),
                    stored.dtype().to_string(),
                ));
            }
            if let ColumnKind::Categorical { values } = &column.kind {
                for code in stored.u32()?.into_iter().flatten() {
                    if code as usize >= values.len() {
                        return Err(FrameError::code_out_of_range(
                            &column.name,
                            code,
                            values.len(),
                        ));
                    }
                }
            }
        }
        let height = data.height();
        Ok(Self {
            domain,
            data,
            height,
        })
    }

    /// A frame with no columns that still reports `height` rows.
    pub fn empty(domain: Domain, height: usize) -> Result<Self, FrameError> {
        domain.validate()?;
        if !domain.is_empty() {
            return Err(FrameError::WidthMismatch {
                expected: domain.len(),
                actual: 0,
            });
        }
        Ok(Self {
            domain,
            data: DataFrame::empty(),
            height,
        })
    }

    /// Assemble a frame from freshly built storage columns, keeping
    /// `height` when every column was dropped.
    pub fn from_columns(
        domain: Domain,
        columns: Vec<PolarsColumn>,
        height: usize,
    ) -> Result<Self, FrameError> {
        if columns.is_empty() {
            Self::empty(domain, height)
        } else {
            Self::new(domain, DataFrame::new(columns)?)
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.domain.len()
    }

    /// Categorical codes of column `name`, one cell per row.
    pub fn categorical_cells(&self, name: &str) -> PolarsResult<Vec<Option<u32>>> {
        Ok(self.data.column(name)?.u32()?.into_iter().collect())
    }

    /// Continuous cells of column `name`; NaN folds into missing.
    pub fn continuous_cells(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        Ok(self
            .data
            .column(name)?
            .f64()?
            .into_iter()
            .map(|cell| cell.filter(|v| !v.is_nan()))
            .collect())
    }

    /// Text cells of column `name`; empty strings fold into missing.
    pub fn text_cells(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        Ok(self
            .data
            .column(name)?
            .str()?
            .into_iter()
            .map(|cell| cell.filter(|s| !s.is_empty()).map(ToString::to_string))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use scour_model::Column;

    use super::*;

    fn two_column_frame() -> Frame {
        let domain = Domain::new(
            vec![Column::categorical("color", ["red", "green"])],
            vec![Column::continuous("price")],
            vec![],
        );
        let data = DataFrame::new(vec![
            Series::new("color".into(), vec![Some(0u32), Some(1), None]).into_column(),
            Series::new("price".into(), vec![Some(1.5f64), None, Some(f64::NAN)]).into_column(),
        ])
        .unwrap();
        Frame::new(domain, data).unwrap()
    }

    #[test]
    fn accessors_normalize_missing() {
        let frame = two_column_frame();
        assert_eq!(frame.height(), 3);
        assert_eq!(
            frame.categorical_cells("color").unwrap(),
            vec![Some(0), Some(1), None]
        );
        // NaN comes back as missing
        assert_eq!(
            frame.continuous_cells("price").unwrap(),
            vec![Some(1.5), None, None]
        );
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let domain = Domain::new(vec![Column::continuous("a")], vec![], vec![]);
        let err = Frame::new(domain, DataFrame::empty()).unwrap_err();
        assert!(matches!(
            err,
            FrameError::WidthMismatch {
                expected: 1,
                actual: 0
            }
        ));
    }

    #[test]
    fn name_and_dtype_must_line_up() {
        let domain = Domain::new(vec![Column::continuous("a")], vec![], vec![]);
        let data = DataFrame::new(vec![
            Series::new("b".into(), vec![Some(1.0f64)]).into_column(),
        ])
        .unwrap();
        assert!(matches!(
            Frame::new(domain, data),
            Err(FrameError::ColumnNameMismatch { index: 0, .. })
        ));

        let domain = Domain::new(vec![Column::text("a")], vec![], vec![]);
        let data = DataFrame::new(vec![
            Series::new("a".into(), vec![Some(1.0f64)]).into_column(),
        ])
        .unwrap();
        assert!(matches!(
            Frame::new(domain, data),
            Err(FrameError::DtypeMismatch { .. })
        ));
    }

    #[test]
    fn categorical_codes_must_stay_in_range() {
        let domain = Domain::new(vec![Column::categorical("color", ["red"])], vec![], vec![]);
        let data = DataFrame::new(vec![
            Series::new("color".into(), vec![Some(0u32), Some(3)]).into_column(),
        ])
        .unwrap();
        assert!(matches!(
            Frame::new(domain, data),
            Err(FrameError::CodeOutOfRange { code: 3, len: 1, .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected_at_construction() {
        let domain = Domain::new(
            vec![Column::continuous("a")],
            vec![],
            vec![Column::text("a")],
        );
        let data = DataFrame::new(vec![
            Series::new("a".into(), vec![Some(1.0f64)]).into_column(),
            Series::new("a".into(), vec![Some("x")]).into_column(),
        ]);
        // polars itself may refuse duplicate names; either layer must.
        if let Ok(data) = data {
            assert!(Frame::new(domain, data).is_err());
        }
    }

    #[test]
    fn empty_frame_keeps_height() {
        let frame = Frame::empty(Domain::default(), 42).unwrap();
        assert_eq!(frame.height(), 42);
        assert_eq!(frame.width(), 0);

        let err = Frame::empty(
            Domain::new(vec![Column::continuous("a")], vec![], vec![]),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::WidthMismatch { .. }));
    }
}
