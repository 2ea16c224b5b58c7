//! Command implementations

mod import;
mod inspect;

use std::path::Path;

pub use import::cmd_import;
pub use inspect::cmd_inspect;

/// Spreadsheet exports are recognized by extension; everything else is
/// treated as delimited text
pub(crate) fn is_spreadsheet_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| {
        ext.eq_ignore_ascii_case("xlsx")
            || ext.eq_ignore_ascii_case("xls")
            || ext.eq_ignore_ascii_case("ods")
    })
}
