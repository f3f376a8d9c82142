//! JSON output formatting

use std::io;

use crate::compare::DiffResult;

/// Render a diff result as pretty-printed JSON.
pub fn format_json(result: &DiffResult) -> io::Result<String> {
    serde_json::to_string_pretty(result).map_err(io::Error::other)
}

/// Print a diff result as pretty-printed JSON to stdout.
pub fn print_json(result: &DiffResult) -> io::Result<()> {
    println!("{}", format_json(result)?);
    Ok(())
}
