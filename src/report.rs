//! Rendering of the aggregated subaward totals.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Amount, Subaward, total_amount};

/// Warning printed under the totals when any subaward lacked a name.
pub const NAMES_MISSING_WARNING: &str = "At least one provided file did not have a valid Subaward name.\n\
Please check the file(s) and ensure that the name is provided.";

/// Width the `name:` column is padded to in the text report.
const NAME_COLUMN_WIDTH: usize = 14;

/// Output formats supported by the report writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Machine-readable form of the report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub files: usize,
    pub subawards: &'a [Subaward],
    pub grand_total: Amount,
    pub names_missing: usize,
}

impl<'a> JsonReport<'a> {
    pub fn new(files: usize, subawards: &'a [Subaward]) -> Result<Self> {
        Ok(Self {
            files,
            subawards,
            grand_total: total_amount(subawards)?,
            names_missing: subawards
                .iter()
                .filter(|subaward| subaward.is_name_missing())
                .count(),
        })
    }
}

/// Writes the report for `subawards` read from `file_count` budgets.
pub fn write_report<W: Write>(
    out: &mut W,
    format: ReportFormat,
    file_count: usize,
    subawards: &[Subaward],
) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(out, subawards),
        ReportFormat::Json => write_json(out, &JsonReport::new(file_count, subawards)?),
    }
}

/// Writes the totals table followed by the missing-name warning when needed.
pub fn write_text<W: Write>(out: &mut W, subawards: &[Subaward]) -> Result<()> {
    writeln!(out, "\nTotals:")?;
    for subaward in subawards {
        writeln!(out, "{}", report_line(subaward))?;
    }

    if subawards.iter().any(Subaward::is_name_missing) {
        writeln!(out, "\n{NAMES_MISSING_WARNING}")?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, report: &JsonReport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Formats one totals line, e.g. `Indiana:      \t$1,500.00`. Entries without
/// a name also show the file they came from.
pub fn report_line(subaward: &Subaward) -> String {
    let label = format!("{}:", subaward.name);
    let mut line = format!(
        "{label:<width$}\t{}",
        subaward.amount.to_currency(),
        width = NAME_COLUMN_WIDTH
    );
    if subaward.is_name_missing() {
        line.push_str(&format!("\t({})", subaward.file_name));
    }
    line
}
