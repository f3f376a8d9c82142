//! Markdown output formatting
//!
//! This module provides `MarkdownFormatter` which renders a diff report as
//! markdown, suitable for change tickets, pull requests, or LLM context.

use crate::compare::DiffResult;
use crate::object_diff::ObjectDiff;
use crate::text_diff::TextDiff;

use super::config::OutputConfig;
use super::utils::{change_symbol, describe_change, plural};

/// Markdown output formatter.
pub struct MarkdownFormatter {
    config: OutputConfig,
}

impl MarkdownFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the report as a markdown document.
    pub fn format(&self, result: &DiffResult) -> String {
        let mut output = String::from("# Snapshot differences\n\n");

        if result.is_empty() {
            output.push_str("No differences found between the snapshots.\n");
            return output;
        }

        output.push_str(&format!(
            "{} with object differences, {} with line differences.\n",
            plural(result.object_diffs.len(), "file"),
            plural(result.file_diffs.len(), "file")
        ));

        if !result.object_diffs.is_empty() {
            output.push_str("\n## Object differences\n");
            for (path, diff) in &result.object_diffs {
                output.push_str(&format!("\n### `{}`\n\n", path));
                self.push_object_diff(&mut output, diff);
            }
        }

        if !result.file_diffs.is_empty() {
            output.push_str("\n## File differences\n");
            for (path, diff) in &result.file_diffs {
                output.push_str(&format!("\n### `{}`\n\n", path));
                match diff {
                    TextDiff::Changed(lines) => {
                        output.push_str("```diff\n");
                        for line in lines {
                            output.push_str(&line.to_string());
                            output.push('\n');
                        }
                        output.push_str("```\n");
                    }
                    TextDiff::Unchanged(lines) => {
                        output.push_str(&format!("_Unchanged ({})._\n", plural(lines.len(), "line")));
                    }
                }
            }
        }

        for (dir, names) in result.exclusive_entries() {
            output.push_str(&format!("\n## Only in `{}`\n\n", dir));
            for name in names {
                output.push_str(&format!("- `{}`\n", name));
            }
        }

        output
    }

    fn push_object_diff(&self, output: &mut String, diff: &ObjectDiff) {
        let width = self.config.max_value_width;
        match diff {
            ObjectDiff::Fields(fields) => {
                for (key, change) in fields {
                    output.push_str(&format!(
                        "- `{}` **{}** {}: `{}`\n",
                        change_symbol(change),
                        change.status(),
                        key,
                        describe_change(change, width)
                    ));
                }
            }
            ObjectDiff::Elements(elements) => {
                for change in elements {
                    output.push_str(&format!(
                        "- `{}` **{}**: `{}`\n",
                        change_symbol(change),
                        change.status(),
                        describe_change(change, width)
                    ));
                }
            }
            ObjectDiff::Value(change) => {
                output.push_str(&format!(
                    "- `{}` **{}**: `{}`\n",
                    change_symbol(change),
                    change.status(),
                    describe_change(change, width)
                ));
            }
        }
    }
}

/// Print a diff report as markdown to stdout.
pub fn print_markdown(formatter: &MarkdownFormatter, result: &DiffResult) -> std::io::Result<()> {
    print!("{}", formatter.format(result));
    Ok(())
}
