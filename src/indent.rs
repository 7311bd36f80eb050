//! Effective indentation of a paragraph.

use crate::inherit::resolve_inherited;
use crate::types::{IndentAttr, Paragraph, StyleSheet};

/// Resolve `attr` for a paragraph in points.
///
/// Direct formatting wins, then the style chain; unset everywhere is `0.0`.
/// Negative stored values (hanging first-line indents, negative left
/// indents) are reported as `0.0`, so the result is never negative.
pub fn effective_indent_points(
    paragraph: &Paragraph,
    styles: &StyleSheet,
    attr: IndentAttr,
) -> f64 {
    resolve_inherited(paragraph, styles, |format| format.indent(attr))
        .map(|length| length.points())
        .filter(|points| points.is_finite())
        .map_or(0.0, |points| points.max(0.0))
}

/// Deepest blockquote nesting emitted for any indent.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Blockquote nesting depth for a left indent: `floor(points / unit)`,
/// capped at [`MAX_NESTING_DEPTH`].
pub fn nesting_depth(left_points: f64, unit_points: f64) -> usize {
    if !(unit_points > 0.0 && left_points > 0.0) {
        return 0;
    }
    let depth = (left_points / unit_points).floor();
    if depth >= MAX_NESTING_DEPTH as f64 {
        MAX_NESTING_DEPTH
    } else {
        depth as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Length, ParagraphFormat, Style};

    fn left(points: f64) -> ParagraphFormat {
        ParagraphFormat {
            left_indent: Some(Length::from_points(points)),
            ..Default::default()
        }
    }

    fn styles() -> StyleSheet {
        let mut styles = StyleSheet::new();
        styles.insert(Style::new("Normal"));
        styles.insert(Style::new("Quote").based_on("Normal").with_format(left(36.0)));
        styles.insert(Style::new("QuoteBold").based_on("Quote"));
        styles
    }

    #[test]
    fn direct_left_indent() {
        let p = Paragraph::new("x").with_format(left(45.0));
        assert_eq!(effective_indent_points(&p, &styles(), IndentAttr::Left), 45.0);
    }

    #[test]
    fn inherited_left_indent() {
        let p = Paragraph::new("x").with_style("QuoteBold");
        assert_eq!(effective_indent_points(&p, &styles(), IndentAttr::Left), 36.0);
    }

    #[test]
    fn unset_indent_defaults_to_zero() {
        let p = Paragraph::new("x").with_style("Quote");
        for attr in [IndentAttr::FirstLine, IndentAttr::Right] {
            assert_eq!(effective_indent_points(&p, &styles(), attr), 0.0);
        }
        let bare = Paragraph::new("x");
        let empty = StyleSheet::new();
        assert_eq!(effective_indent_points(&bare, &empty, IndentAttr::Left), 0.0);
    }

    #[test]
    fn hanging_indent_reports_zero() {
        let p = Paragraph::new("x").with_format(ParagraphFormat {
            first_line_indent: Some(Length::from_twips(-360.0)),
            ..Default::default()
        });
        let styles = styles();
        assert_eq!(effective_indent_points(&p, &styles, IndentAttr::FirstLine), 0.0);
    }

    #[test]
    fn attributes_resolve_independently() {
        let p = Paragraph::new("x")
            .with_style("Quote")
            .with_format(ParagraphFormat {
                right_indent: Some(Length::from_twips(240.0)),
                ..Default::default()
            });
        let styles = styles();
        assert_eq!(effective_indent_points(&p, &styles, IndentAttr::Left), 36.0);
        assert_eq!(effective_indent_points(&p, &styles, IndentAttr::Right), 12.0);
    }

    #[test]
    fn nesting_follows_floor_division() {
        assert_eq!(nesting_depth(45.0, 20.0), 2);
        assert_eq!(nesting_depth(19.0, 20.0), 0);
        assert_eq!(nesting_depth(20.0, 20.0), 1);
        assert_eq!(nesting_depth(0.0, 20.0), 0);
    }

    #[test]
    fn nesting_is_capped() {
        assert_eq!(nesting_depth(1e300, 20.0), MAX_NESTING_DEPTH);
        assert_eq!(nesting_depth(1584.0, 1e-300), MAX_NESTING_DEPTH);
        assert_eq!(nesting_depth(f64::INFINITY, 20.0), MAX_NESTING_DEPTH);
        assert_eq!(nesting_depth(f64::NAN, 20.0), 0);
        assert_eq!(nesting_depth(1280.0, 20.0), 64);
    }
}
