use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx};
use tracing::{debug, instrument};

use crate::error::{Result, ReviewError};
use crate::io::GridSource;
use crate::model::{CellValue, Row, TabularGrid};

/// Reads budget grids from `.xlsx` files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelGridSource;

impl GridSource for ExcelGridSource {
    #[instrument(level = "debug", skip_all, fields(path = %path.display()))]
    fn load_grid(&self, path: &Path) -> Result<Option<TabularGrid>> {
        let mut file = File::open(path)?;
        load(Some(&mut file))
    }
}

/// Flattens the first worksheet of the workbook in `stream` into a grid.
///
/// The grid starts at cell A1 and runs to the last used cell, so grid column
/// `n` is always worksheet column `n`. The stream is borrowed and left open
/// for the caller to release. A missing stream yields `Ok(None)`.
pub fn load<R: Read + Seek>(stream: Option<&mut R>) -> Result<Option<TabularGrid>> {
    let Some(stream) = stream else {
        return Ok(None);
    };

    let mut workbook: Xlsx<_> = Xlsx::new(stream)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReviewError::InvalidWorkbook("workbook has no worksheets".into()))?
        .map_err(ReviewError::from)?;

    let grid = grid_from_range(&range);
    debug!(
        rows = grid.row_count(),
        columns = grid.column_count(),
        "loaded first worksheet"
    );
    Ok(Some(grid))
}

fn grid_from_range(range: &Range<DataType>) -> TabularGrid {
    let Some((last_row, last_col)) = range.end() else {
        return TabularGrid::default();
    };

    let rows: Vec<Row> = (0..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| cell_value(range.get_value((row, col))))
                .collect()
        })
        .collect();

    TabularGrid::from_rows(rows)
}

fn cell_value(cell: Option<&DataType>) -> CellValue {
    match cell {
        Some(DataType::String(value)) => CellValue::Text(value.clone()),
        Some(DataType::Float(value)) => CellValue::Number(*value),
        Some(DataType::Int(value)) => CellValue::Integer(*value),
        Some(DataType::Bool(value)) => CellValue::Bool(*value),
        Some(DataType::Empty) | None => CellValue::Empty,
        Some(other) => CellValue::Other(other.to_string()),
    }
}
