//! Heading level inference.
//!
//! A paragraph is a heading when it, or any style in its inheritance chain,
//! carries an outline level. The chain walk matters: a style derived from
//! `Heading 1` that only changes the font has no `w:outlineLvl` of its own
//! but is still a level-1 heading.

use crate::inherit::resolve_inherited;
use crate::types::{MAX_HEADING_OUTLINE_LEVEL, Paragraph, StyleSheet};

/// Resolve the 1-based heading level of a paragraph.
///
/// Returns `None` for blank paragraphs (empty after trimming) and for body
/// text. The level is not clamped: outline level 8 yields 9.
///
/// The nearest outline level wins even when it is the body text marker, so
/// a style deriving from `Heading 1` with outline level 9 is body text.
pub fn resolve_heading_level(paragraph: &Paragraph, styles: &StyleSheet) -> Option<u8> {
    if paragraph.text.trim().is_empty() {
        return None;
    }
    resolve_inherited(paragraph, styles, |format| format.outline_level)
        .filter(|&level| level <= MAX_HEADING_OUTLINE_LEVEL)
        .map(|level| level + 1)
}
