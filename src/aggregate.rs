use std::collections::HashMap;
use std::fs;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::error::{Result, ReviewError};
use crate::extract;
use crate::io::{GridSource, excel_read};
use crate::model::{Subaward, TabularGrid};
use crate::progress::ProgressObserver;

/// Extension of the budget workbooks picked up from a folder.
pub const WORKBOOK_EXTENSION: &str = "xlsx";
/// Grid column whose row collection is scanned for subawards.
const SCAN_COLUMN: usize = 1;
/// File name prefix of the owner files Excel keeps next to open workbooks.
const LOCK_FILE_PREFIX: &str = "~$";

/// Running totals per subaward, in first-seen order.
///
/// Named subawards merge by exact name. Subawards carrying the "Name Missing"
/// sentinel are never merged, so each one stays visible with its file.
#[derive(Debug, Default, Clone)]
pub struct SubawardLedger {
    entries: Vec<Subaward>,
    by_name: HashMap<String, usize>,
}

impl SubawardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subaward, folding its amount into an existing entry of the
    /// same name when there is one. Fails when the merged total overflows.
    pub fn record(&mut self, subaward: Subaward) -> Result<()> {
        if subaward.is_name_missing() {
            self.entries.push(subaward);
            return Ok(());
        }

        match self.by_name.get(&subaward.name) {
            Some(&index) => {
                let entry = &mut self.entries[index];
                entry.amount = entry
                    .amount
                    .checked_add(subaward.amount)
                    .ok_or_else(|| ReviewError::AmountOverflow(subaward.name))?;
            }
            None => {
                self.by_name.insert(subaward.name.clone(), self.entries.len());
                self.entries.push(subaward);
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[Subaward] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Subaward> {
        self.entries
    }
}

/// Reads every budget in `paths`, in order, and merges their subawards.
///
/// The first failing file aborts the run.
#[instrument(level = "info", skip_all, fields(files = paths.len()))]
pub fn aggregate<P: AsRef<Path>>(
    paths: &[P],
    source: &dyn GridSource,
    observer: &mut dyn ProgressObserver,
) -> Result<Vec<Subaward>> {
    observer.run_started(paths.len());

    let mut ledger = SubawardLedger::new();
    for path in paths {
        let path = path.as_ref();
        let file_name = display_label(path);
        observer.file_started(&file_name);

        let grid = source.load_grid(path)?;
        let subawards = subawards_from_grid(grid.as_ref(), &file_name, observer)?;
        observer.file_finished(&file_name, subawards.len());

        for subaward in subawards {
            ledger.record(subaward)?;
        }
    }

    info!(subawards = ledger.len(), "aggregated budgets");
    Ok(ledger.into_entries())
}

/// Extracts the subawards of one grid, scanning the rows reachable through
/// its second column. No grid, or a grid without a second column, yields none.
pub fn subawards_from_grid(
    grid: Option<&TabularGrid>,
    file_name: &str,
    observer: &mut dyn ProgressObserver,
) -> Result<Vec<Subaward>> {
    let rows = grid.and_then(|grid| grid.column_rows(SCAN_COLUMN));
    extract::extract(rows, file_name, observer)
}

/// Loads the workbook in `stream` and extracts its subawards.
pub fn subawards_from_workbook<R: Read + Seek>(
    stream: Option<&mut R>,
    file_name: &str,
    observer: &mut dyn ProgressObserver,
) -> Result<Vec<Subaward>> {
    let grid = excel_read::load(stream)?;
    subawards_from_grid(grid.as_ref(), file_name, observer)
}

/// Lists the `.xlsx` budgets directly inside `folder`, sorted by path.
#[instrument(level = "debug", skip_all, fields(folder = %folder.display()))]
pub fn list_workbooks(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ReviewError::FolderNotFound(folder.to_path_buf()));
    }

    let mut workbooks = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() || !has_workbook_extension(&path) {
            continue;
        }
        if display_label(&path).starts_with(LOCK_FILE_PREFIX) {
            debug!(path = %path.display(), "skipping Excel lock file");
            continue;
        }
        workbooks.push(path);
    }

    workbooks.sort();
    Ok(workbooks)
}

/// Name shown for a budget: the final component of its path.
pub fn display_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn has_workbook_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
}
