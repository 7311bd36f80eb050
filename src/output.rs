//! CLI output formatting for every command.
//!
//! Paths are shown relative to the root the command ran on, with forward
//! slashes, so the output reads the same on every platform.
//!
//! # Output Format
//!
//! ## Convert
//!
//! ```text
//! Documents
//! 001 guides/setup.docx → guides/setup.html (12 paragraphs, 3 headings)
//! 002 broken.docx
//!     Failed: cannot read document: not a ZIP archive: invalid Zip archive
//!
//! Converted 1 of 2 documents
//! ```
//!
//! ## Index
//!
//! ```text
//! Indexes
//! guides/index.html (1 entry)
//! index.html (2 entries)
//! ```
//!
//! ## Headings
//!
//! ```text
//! [001] h1 Intro
//! [004] h2 Background
//!
//! 2 headings
//! ```
//!
//! ## Indents
//!
//! ```text
//! [002] Body text
//!     left: 40.00pt
//!     first-line: 0.00pt
//!     right: 0.00pt
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::convert::ConvertOutcome;
use crate::index::IndexPage;
use crate::report::{HeadingLine, IndentLine};
use crate::types::IndentAttr;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `path` relative to `root` with `/` separators; unchanged if outside root.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

// ============================================================================
// Convert
// ============================================================================

pub fn format_convert_output(outcomes: &[ConvertOutcome], root: &Path) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    let mut converted = 0;

    for (i, outcome) in outcomes.iter().enumerate() {
        let source = display_path(&outcome.document.source, root);
        match &outcome.result {
            Ok(stats) => {
                converted += 1;
                lines.push(format!(
                    "{} {} → {} ({}, {})",
                    format_index(i + 1),
                    source,
                    display_path(&outcome.document.output, root),
                    plural(stats.paragraphs, "paragraph", "paragraphs"),
                    plural(stats.headings, "heading", "headings"),
                ));
            }
            Err(e) => {
                lines.push(format!("{} {}", format_index(i + 1), source));
                lines.push(format!("    Failed: {e}"));
            }
        }
    }

    if outcomes.is_empty() {
        lines.push("    (no documents found)".to_string());
    }
    lines.push(String::new());
    lines.push(format!(
        "Converted {} of {}",
        converted,
        plural(outcomes.len(), "document", "documents")
    ));
    lines
}

pub fn print_convert_output(outcomes: &[ConvertOutcome], root: &Path) {
    for line in format_convert_output(outcomes, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Index
// ============================================================================

pub fn format_index_output(pages: &[IndexPage], root: &Path) -> Vec<String> {
    let mut lines = vec!["Indexes".to_string()];
    for page in pages {
        lines.push(format!(
            "{} ({})",
            display_path(&page.path, root),
            plural(page.entries, "entry", "entries"),
        ));
    }
    lines
}

pub fn print_index_output(pages: &[IndexPage], root: &Path) {
    for line in format_index_output(pages, root) {
        println!("{}", line);
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

pub fn format_heading_report(report: &[HeadingLine]) -> Vec<String> {
    if report.is_empty() {
        return vec!["No headings found".to_string()];
    }
    let mut lines: Vec<String> = report
        .iter()
        .map(|h| format!("[{}] h{} {}", format_index(h.index), h.level, h.text))
        .collect();
    lines.push(String::new());
    lines.push(plural(report.len(), "heading", "headings"));
    lines
}

pub fn print_heading_report(report: &[HeadingLine]) {
    for line in format_heading_report(report) {
        println!("{}", line);
    }
}

pub fn format_indent_report(report: &[IndentLine]) -> Vec<String> {
    let mut lines = Vec::new();
    for line in report {
        lines.push(format!("[{}] {}", format_index(line.index), line.text));
        for (attr, value) in IndentAttr::ALL
            .iter()
            .zip([line.left, line.first_line, line.right])
        {
            lines.push(format!("    {}: {:.2}pt", attr.label(), value));
        }
    }
    lines
}

pub fn print_indent_report(report: &[IndentLine]) {
    for line in format_indent_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertError, ConvertStats};
    use crate::scan::SourceDocument;
    use std::path::PathBuf;

    fn outcome(rel: &str, result: Result<ConvertStats, ConvertError>) -> ConvertOutcome {
        let source = PathBuf::from("/site").join(rel);
        ConvertOutcome {
            document: SourceDocument {
                output: source.with_extension("html"),
                source,
            },
            result,
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn display_path_relative_to_root() {
        let root = Path::new("/site");
        assert_eq!(display_path(Path::new("/site/a/b.html"), root), "a/b.html");
        assert_eq!(display_path(Path::new("/other/x"), root), "/other/x");
    }

    #[test]
    fn convert_success_and_failure() {
        let outcomes = vec![
            outcome(
                "guides/setup.docx",
                Ok(ConvertStats {
                    paragraphs: 12,
                    headings: 1,
                }),
            ),
            outcome(
                "broken.docx",
                Err(ConvertError::Io(std::io::Error::other("denied"))),
            ),
        ];
        let lines = format_convert_output(&outcomes, Path::new("/site"));
        assert_eq!(
            lines,
            [
                "Documents",
                "001 guides/setup.docx → guides/setup.html (12 paragraphs, 1 heading)",
                "002 broken.docx",
                "    Failed: IO error: denied",
                "",
                "Converted 1 of 2 documents",
            ]
        );
    }

    #[test]
    fn convert_nothing_found() {
        let lines = format_convert_output(&[], Path::new("/site"));
        assert_eq!(lines[1], "    (no documents found)");
        assert_eq!(lines.last().unwrap(), "Converted 0 of 0 documents");
    }

    #[test]
    fn index_pages_listed() {
        let pages = vec![
            IndexPage {
                path: PathBuf::from("/site/guides/index.html"),
                entries: 1,
            },
            IndexPage {
                path: PathBuf::from("/site/index.html"),
                entries: 2,
            },
        ];
        let lines = format_index_output(&pages, Path::new("/site"));
        assert_eq!(
            lines,
            [
                "Indexes",
                "guides/index.html (1 entry)",
                "index.html (2 entries)"
            ]
        );
    }

    #[test]
    fn heading_report_with_total() {
        let report = vec![
            HeadingLine {
                index: 1,
                level: 1,
                text: "Intro".to_string(),
            },
            HeadingLine {
                index: 4,
                level: 2,
                text: "Background".to_string(),
            },
        ];
        assert_eq!(
            format_heading_report(&report),
            ["[001] h1 Intro", "[004] h2 Background", "", "2 headings"]
        );
    }

    #[test]
    fn heading_report_empty() {
        assert_eq!(format_heading_report(&[]), ["No headings found"]);
    }

    #[test]
    fn indent_report_two_decimals() {
        let report = vec![IndentLine {
            index: 2,
            text: "Body text".to_string(),
            left: 40.0,
            first_line: 0.0,
            right: 4.5,
        }];
        assert_eq!(
            format_indent_report(&report),
            [
                "[002] Body text",
                "    left: 40.00pt",
                "    first-line: 0.00pt",
                "    right: 4.50pt",
            ]
        );
    }
}
