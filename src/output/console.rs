//! Console report formatter
//!
//! Renders a `DiffResult` as a colored, human-readable report. The same
//! rendering code writes to a color terminal or to a plain string.

use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::compare::DiffResult;
use crate::object_diff::{Change, ObjectDiff};
use crate::text_diff::{ChangedLine, TextDiff};

use super::config::OutputConfig;
use super::utils::{change_symbol, describe_change, plural};

/// Formatter for console output.
pub struct ReportFormatter {
    config: OutputConfig,
}

impl ReportFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the report without colors.
    pub fn format(&self, result: &DiffResult) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing into memory can't fail
        let _ = self.render(&mut out, result);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    pub fn print(&self, result: &DiffResult) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.render(&mut stdout, result)
    }

    /// Render the report to any color-capable writer.
    pub fn render<W: WriteColor>(&self, out: &mut W, result: &DiffResult) -> io::Result<()> {
        if result.is_empty() {
            writeln!(out, "No differences found between the snapshots.")?;
            return Ok(());
        }

        if !result.object_diffs.is_empty() {
            write_header(out, "Object differences")?;
            for (path, diff) in &result.object_diffs {
                write_path(out, path)?;
                self.write_object_diff(out, diff)?;
            }
            writeln!(out)?;
        }

        if !result.file_diffs.is_empty() {
            write_header(out, "File differences")?;
            for (path, diff) in &result.file_diffs {
                write_path(out, path)?;
                write_text_diff(out, diff)?;
            }
            writeln!(out)?;
        }

        for (dir, names) in result.exclusive_entries() {
            write_header(out, &format!("Only in {}", dir))?;
            for name in names {
                writeln!(out, "  {}", name)?;
            }
            writeln!(out)?;
        }

        writeln!(
            out,
            "{} with object differences, {} with line differences",
            plural(result.object_diffs.len(), "file"),
            plural(result.file_diffs.len(), "file")
        )?;
        Ok(())
    }

    fn write_object_diff<W: WriteColor>(&self, out: &mut W, diff: &ObjectDiff) -> io::Result<()> {
        match diff {
            ObjectDiff::Fields(fields) => {
                for (key, change) in fields {
                    self.write_change(out, Some(key), change)?;
                }
            }
            ObjectDiff::Elements(elements) => {
                for change in elements {
                    self.write_change(out, None, change)?;
                }
            }
            ObjectDiff::Value(change) => self.write_change(out, None, change)?,
        }
        Ok(())
    }

    fn write_change<W: WriteColor>(
        &self,
        out: &mut W,
        key: Option<&str>,
        change: &Change,
    ) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        match change {
            Change::Added { .. } => spec.set_fg(Some(Color::Green)),
            Change::Removed { .. } => spec.set_fg(Some(Color::Red)),
            Change::Modified { .. } => spec.set_fg(Some(Color::Yellow)),
            Change::Unchanged { .. } => spec.set_dimmed(true),
        };

        write!(out, "    ")?;
        out.set_color(&spec)?;
        write!(out, "{}", change_symbol(change))?;
        if let Some(key) = key {
            write!(out, " {}:", key)?;
        }
        write!(
            out,
            " {}",
            describe_change(change, self.config.max_value_width)
        )?;
        out.reset()?;
        writeln!(out)
    }
}

fn write_header<W: WriteColor>(out: &mut W, title: &str) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    out.set_color(&bold)?;
    writeln!(out, "{}", title)?;
    out.reset()
}

fn write_path<W: WriteColor>(out: &mut W, path: &str) -> io::Result<()> {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Cyan)).set_bold(true);
    write!(out, "  ")?;
    out.set_color(&spec)?;
    write!(out, "{}", path)?;
    out.reset()?;
    writeln!(out)
}

fn write_text_diff<W: WriteColor>(out: &mut W, diff: &TextDiff) -> io::Result<()> {
    match diff {
        TextDiff::Changed(lines) => {
            for line in lines {
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(match line {
                    ChangedLine::Removed(_) => Color::Red,
                    ChangedLine::Added(_) => Color::Green,
                }));
                write!(out, "    ")?;
                out.set_color(&spec)?;
                write!(out, "{}", line)?;
                out.reset()?;
                writeln!(out)?;
            }
        }
        TextDiff::Unchanged(lines) => {
            let mut dim = ColorSpec::new();
            dim.set_dimmed(true);
            out.set_color(&dim)?;
            writeln!(out, "    (unchanged, {})", plural(lines.len(), "line"))?;
            out.reset()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::Path;

    fn sample_result() -> DiffResult {
        let mut result = DiffResult::default();
        let mut fields = BTreeMap::new();
        fields.insert(
            "y".to_string(),
            Change::Modified {
                value_1: json!(2),
                value_2: json!(3),
            },
        );
        fields.insert("z".to_string(), Change::Added { value: json!(4) });
        result
            .object_diffs
            .insert("a.json".to_string(), ObjectDiff::Fields(fields));
        result.file_diffs.insert(
            "notes.cfg".to_string(),
            TextDiff::Changed(vec![
                ChangedLine::Removed("b".to_string()),
                ChangedLine::Added("c".to_string()),
            ]),
        );
        result.record_exclusive(Path::new("snap_a"), "only_in_a");
        result
    }

    fn formatter() -> ReportFormatter {
        ReportFormatter::new(OutputConfig {
            use_color: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_format_full_report() {
        let output = formatter().format(&sample_result());
        let expected = "\
Object differences
  a.json
    ~ y: 2 -> 3
    + z: 4

File differences
  notes.cfg
    - b
    + c

Only in snap_a
  only_in_a

1 file with object differences, 1 file with line differences
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_format_empty_report() {
        let output = formatter().format(&DiffResult::default());
        assert_eq!(output, "No differences found between the snapshots.\n");
    }

    #[test]
    fn test_format_unchanged_file_and_array_diff() {
        let mut result = DiffResult::default();
        result.file_diffs.insert(
            "same.output".to_string(),
            TextDiff::Unchanged(vec!["a".to_string(), "b".to_string()]),
        );
        result.object_diffs.insert(
            "list.json".to_string(),
            ObjectDiff::Elements(vec![
                Change::Unchanged { value: json!(1) },
                Change::Removed {
                    value: json!({"k": "v"}),
                },
            ]),
        );

        let output = formatter().format(&result);
        assert!(output.contains("    (unchanged, 2 lines)\n"), "{}", output);
        assert!(output.contains("    = 1\n"), "{}", output);
        assert!(output.contains("    - {\"k\":\"v\"}\n"), "{}", output);
    }
}
