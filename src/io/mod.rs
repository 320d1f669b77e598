//! Adapters between budget workbooks on disk and the in-memory [`TabularGrid`].

pub mod excel_read;

use std::path::Path;

use crate::error::Result;
use crate::model::TabularGrid;

pub use excel_read::ExcelGridSource;

/// Produces the grid for one budget file.
///
/// `Ok(None)` means there was nothing to load; the file then contributes no
/// subawards.
pub trait GridSource {
    fn load_grid(&self, path: &Path) -> Result<Option<TabularGrid>>;
}
