//! Attribute resolution through the style inheritance chain.
//!
//! Outline level and the three indent kinds all resolve the same way: the
//! paragraph's own direct formatting wins, then its style, then each base
//! style in turn. [`resolve_inherited`] implements that walk once; callers
//! only supply the extraction function.

use crate::types::{Paragraph, ParagraphFormat, Style, StyleSheet};

/// Iterator over a style and its successive base styles.
///
/// Yields at most `styles.len()` items, so a malformed document with a
/// `basedOn` cycle still terminates.
pub struct StyleChain<'a> {
    styles: &'a StyleSheet,
    next: Option<&'a Style>,
    remaining: usize,
}

impl<'a> StyleChain<'a> {
    pub fn new(styles: &'a StyleSheet, start: Option<&'a Style>) -> Self {
        Self {
            styles,
            next: start,
            remaining: styles.len(),
        }
    }

    /// The chain for a paragraph, starting at its effective style.
    pub fn for_paragraph(styles: &'a StyleSheet, paragraph: &Paragraph) -> Self {
        Self::new(styles, styles.paragraph_style(paragraph.style_id.as_deref()))
    }
}

impl<'a> Iterator for StyleChain<'a> {
    type Item = &'a Style;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            if let Some(style) = self.next.take() {
                log::warn!("style chain truncated at '{}': basedOn cycle", style.id);
            }
            return None;
        }
        let current = self.next.take()?;
        self.remaining -= 1;
        self.next = current
            .based_on
            .as_deref()
            .and_then(|parent| self.styles.get(parent));
        Some(current)
    }
}

/// Resolve an attribute from the paragraph itself, then up its style chain.
///
/// Returns the first value `extract` finds, or `None` when no level sets it.
pub fn resolve_inherited<T, F>(
    paragraph: &Paragraph,
    styles: &StyleSheet,
    extract: F,
) -> Option<T>
where
    F: Fn(&ParagraphFormat) -> Option<T>,
{
    extract(&paragraph.format).or_else(|| {
        StyleChain::for_paragraph(styles, paragraph).find_map(|style| extract(&style.format))
    })
}
