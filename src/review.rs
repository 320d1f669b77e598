use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::aggregate::{aggregate, list_workbooks};
use crate::error::{Result, ReviewError};
use crate::io::ExcelGridSource;
use crate::model::Subaward;
use crate::progress::{ConsoleProgress, NoProgress, ProgressObserver, TracingProgress};
use crate::report::{ReportFormat, write_report};

/// Settings for one review run, gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// Folder holding the budgets; prompted for when absent.
    pub folder: Option<PathBuf>,
    pub format: ReportFormat,
    /// Print the per-file listing while budgets are read.
    pub show_progress: bool,
    /// Wait for the operator before exiting.
    pub pause: bool,
}

impl ReviewOptions {
    /// Only the text report waits for the operator; JSON output is meant for
    /// pipes.
    pub fn should_pause(&self) -> bool {
        self.pause && self.format == ReportFormat::Text
    }
}

/// Validates the folder path entered by the operator. Only the line
/// terminator is stripped; other surrounding spaces belong to the path.
pub fn resolve_folder(input: &str) -> Result<PathBuf> {
    let line = input.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Err(ReviewError::MissingFolderPath);
    }

    let folder = PathBuf::from(line);
    if !folder.is_dir() {
        return Err(ReviewError::FolderNotFound(folder));
    }
    Ok(folder)
}

/// Reviews every budget in `folder` and writes the report to `out`.
#[instrument(level = "info", skip_all, fields(folder = %folder.display()))]
pub fn review_folder<W: Write>(
    folder: &Path,
    options: &ReviewOptions,
    out: &mut W,
) -> Result<Vec<Subaward>> {
    let budgets = list_workbooks(folder)?;
    let text = options.format == ReportFormat::Text;

    if text {
        writeln!(out, "\nReading {} spreadsheets...", budgets.len())?;
    }

    let subawards = if text && options.show_progress {
        let mut console = ConsoleProgress::new(&mut *out);
        aggregate(&budgets, &ExcelGridSource, &mut console)?
    } else {
        let mut observer: Box<dyn ProgressObserver> = if options.show_progress {
            Box::new(TracingProgress)
        } else {
            Box::new(NoProgress)
        };
        aggregate(&budgets, &ExcelGridSource, observer.as_mut())?
    };

    write_report(out, options.format, budgets.len(), &subawards)?;
    Ok(subawards)
}
