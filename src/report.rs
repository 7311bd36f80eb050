//! Per-paragraph diagnostics for a single document.
//!
//! These answer "why did this paragraph render the way it did" without
//! reading the XML: which paragraphs resolved to a heading, and what
//! indentation each one ends up with after style inheritance.

use crate::heading::resolve_heading_level;
use crate::indent::effective_indent_points;
use crate::types::{Document, IndentAttr};

const HEADING_TEXT_CHARS: usize = 50;
const INDENT_TEXT_CHARS: usize = 40;

/// A paragraph that resolved to a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingLine {
    /// 1-based paragraph position in the body.
    pub index: usize,
    pub level: u8,
    pub text: String,
}

/// Effective indentation of one paragraph, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct IndentLine {
    pub index: usize,
    pub text: String,
    pub left: f64,
    pub first_line: f64,
    pub right: f64,
}

pub fn heading_report(document: &Document) -> Vec<HeadingLine> {
    document
        .paragraphs
        .iter()
        .enumerate()
        .filter_map(|(i, paragraph)| {
            resolve_heading_level(paragraph, &document.styles).map(|level| HeadingLine {
                index: i + 1,
                level,
                text: paragraph.text.trim().chars().take(HEADING_TEXT_CHARS).collect(),
            })
        })
        .collect()
}

pub fn indent_report(document: &Document) -> Vec<IndentLine> {
    document
        .paragraphs
        .iter()
        .enumerate()
        .map(|(i, paragraph)| {
            let points = |attr| effective_indent_points(paragraph, &document.styles, attr);
            IndentLine {
                index: i + 1,
                text: truncate_chars(&paragraph.text, INDENT_TEXT_CHARS),
                left: points(IndentAttr::Left),
                first_line: points(IndentAttr::FirstLine),
                right: points(IndentAttr::Right),
            }
        })
        .collect()
}

/// Truncate to `max` characters, appending `...` if anything was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
