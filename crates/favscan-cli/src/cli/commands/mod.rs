//! CLI command handlers. Each command is in its own file.

mod list;
mod scan;

pub use list::run_list;
pub use scan::run_scan_file;
