//! Diff report formatting and display
//!
//! This module provides renderers for a `DiffResult`:
//! - Console output with colors
//! - JSON output (the wire shape of the result)
//! - Markdown output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Shared helpers (value rendering, change symbols)
//! - `console` - Colored console report
//! - `markdown` - Markdown report
//! - `json` - JSON output

mod config;
mod console;
mod json;
mod markdown;
mod utils;

// Re-export public types and functions
pub use config::OutputConfig;
pub use console::ReportFormatter;
pub use json::{format_json, print_json};
pub use markdown::{MarkdownFormatter, print_markdown};
pub use utils::{compact_value, describe_change};
