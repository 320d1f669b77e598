//! Subaward detection within a single budget worksheet.
//!
//! A budget announces the amount column once with a cell reading exactly
//! `Total` (any case). Every later row holding a cell that contains
//! `Subaward:` (any case) declares one subaward, named either inline after the
//! marker in column B or in column C, with its amount in the `Total` column.

use tracing::{debug, instrument};

use crate::error::{Result, ReviewError};
use crate::model::{Amount, NAME_MISSING, Row, Subaward};
use crate::progress::ProgressObserver;

/// Cell text that marks the amount column.
pub const TOTAL_MARKER: &str = "Total";
/// Cell text that marks a subaward row.
pub const SUBAWARD_MARKER: &str = "Subaward:";

/// Column holding `Subaward: <name>` when the name is given inline.
const INLINE_NAME_COLUMN: usize = 1;
/// Column holding the name when it is given separately.
const NAME_COLUMN: usize = 2;
/// Amount used when the total cell of a subaward row is blank.
const BLANK_AMOUNT: &str = "0.00";

/// Scans `rows` top to bottom and returns the subawards they declare, in row
/// order. Duplicate names are kept; merging happens during aggregation.
///
/// A missing row collection yields no subawards. A subaward row seen before
/// the `Total` marker, or an amount that is not a decimal number, fails the
/// whole file.
#[instrument(level = "debug", skip_all, fields(file = source_label))]
pub fn extract(
    rows: Option<&[Row]>,
    source_label: &str,
    observer: &mut dyn ProgressObserver,
) -> Result<Vec<Subaward>> {
    let Some(rows) = rows else {
        return Ok(Vec::new());
    };

    let mut subawards = Vec::new();
    let mut total_column: Option<usize> = None;

    for (row_index, row) in rows.iter().enumerate() {
        let row_number = row_index + 1;

        for (column, cell) in row.iter().enumerate() {
            let Some(text) = cell.as_text() else {
                continue;
            };

            if total_column.is_none() && is_total_marker(text) {
                debug!(row = row_number, column, "found total column");
                total_column = Some(column);
            } else if contains_subaward_marker(text) {
                let subaward = Subaward::new(
                    resolve_name(row),
                    resolve_amount(row, row_number, total_column, source_label)?,
                    source_label,
                );
                observer.subaward_found(&subaward);
                subawards.push(subaward);
                break;
            }
        }
    }

    Ok(subawards)
}

fn is_total_marker(text: &str) -> bool {
    text.to_lowercase() == TOTAL_MARKER.to_lowercase()
}

fn contains_subaward_marker(text: &str) -> bool {
    text.to_lowercase().contains(&SUBAWARD_MARKER.to_lowercase())
}

/// Column C wins when it has any content; otherwise the inline name in
/// column B is used with the marker stripped.
fn resolve_name(row: &Row) -> String {
    let name = match row.get(NAME_COLUMN) {
        Some(cell) if !cell.is_empty() => cell.to_text().trim().to_string(),
        _ => row
            .get(INLINE_NAME_COLUMN)
            .map(|cell| cell.to_text().replace(SUBAWARD_MARKER, "").trim().to_string())
            .unwrap_or_default(),
    };

    if name.is_empty() {
        NAME_MISSING.to_string()
    } else {
        name
    }
}

fn resolve_amount(
    row: &Row,
    row_number: usize,
    total_column: Option<usize>,
    file: &str,
) -> Result<Amount> {
    let column = total_column.ok_or_else(|| ReviewError::MissingTotalColumn {
        file: file.to_string(),
        row: row_number,
    })?;

    let text = match row.get(column) {
        Some(cell) if !cell.is_empty() => cell.to_text(),
        _ => BLANK_AMOUNT.to_string(),
    };

    text.parse().map_err(|_| ReviewError::InvalidAmount {
        file: file.to_string(),
        row: row_number,
        value: text,
    })
}
