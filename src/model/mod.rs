mod amount;

use serde::Serialize;

use crate::error::{Result, ReviewError};

pub use amount::{Amount, AmountParseError};

/// Name given to subawards whose row does not carry a usable name.
pub const NAME_MISSING: &str = "Name Missing";

/// A subaward budget line: the collaborating institution and the amount
/// awarded to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subaward {
    /// Institution name. Aggregation matches on this exactly.
    pub name: String,
    /// Amount read from the "Total" column.
    pub amount: Amount,
    /// File the subaward was first read from.
    pub file_name: String,
}

impl Subaward {
    pub fn new(name: impl Into<String>, amount: Amount, file_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            file_name: file_name.into(),
        }
    }

    /// Returns `true` when the subaward carries the [`NAME_MISSING`] sentinel.
    pub fn is_name_missing(&self) -> bool {
        self.name == NAME_MISSING
    }
}

/// Sum of the amounts of `subawards`, sentinel entries included.
pub fn total_amount(subawards: &[Subaward]) -> Result<Amount> {
    Amount::checked_sum(subawards.iter().map(|subaward| subaward.amount))
        .ok_or_else(|| ReviewError::AmountOverflow("grand total".to_string()))
}

/// A raw worksheet cell as handed over by the workbook decoder.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    /// Whole numbers the decoder reports as integers, kept exact.
    Integer(i64),
    Bool(bool),
    /// Dates, durations and error cells, kept in their rendered form.
    Other(String),
}

impl CellValue {
    /// Returns the text for string cells only.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Renders the cell the way it would read in the sheet.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(value) | CellValue::Other(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
        }
    }

    /// Empty cells and zero-length strings both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(value) => value.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

/// Cells of one worksheet row, aligned to the grid's columns.
pub type Row = Vec<CellValue>;

/// Rectangular, row-major copy of a worksheet.
///
/// The first row names the columns and is also kept as the first data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularGrid {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl TabularGrid {
    /// Builds a grid from raw rows, padding short rows with empty cells so
    /// every row has as many cells as the widest one.
    pub fn from_rows(mut rows: Vec<Row>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }

        let headers = match rows.first() {
            Some(first) => first.iter().map(CellValue::to_text).collect(),
            None => Vec::new(),
        };

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Row collection reachable through the column at `index`, or `None` when
    /// the grid is narrower than that.
    pub fn column_rows(&self, index: usize) -> Option<&[Row]> {
        (index < self.column_count()).then_some(self.rows.as_slice())
    }
}
