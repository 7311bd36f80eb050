//! The document model shared by the reader, the resolvers and the renderer.
//!
//! This is deliberately a small subset of WordprocessingML: body paragraphs
//! with their text, a style reference, and the handful of paragraph
//! properties the heading and indent resolvers look at.

use std::collections::HashMap;

/// Twentieths of a point, the unit WordprocessingML stores lengths in.
pub const TWIPS_PER_POINT: f64 = 20.0;

/// Deepest outline level that denotes a heading (`<h9>` before clamping).
pub const MAX_HEADING_OUTLINE_LEVEL: u8 = 8;

/// Outline level Word writes for paragraphs explicitly marked as body text.
pub const BODY_TEXT_OUTLINE_LEVEL: u8 = 9;

/// A length in typographic points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Length(f64);

impl Length {
    pub fn from_points(points: f64) -> Self {
        Self(points)
    }

    pub fn from_twips(twips: f64) -> Self {
        Self(twips / TWIPS_PER_POINT)
    }

    pub fn points(self) -> f64 {
        self.0
    }
}

/// Which indentation value to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentAttr {
    Left,
    FirstLine,
    Right,
}

impl IndentAttr {
    pub const ALL: [IndentAttr; 3] = [IndentAttr::Left, IndentAttr::FirstLine, IndentAttr::Right];

    pub fn label(self) -> &'static str {
        match self {
            IndentAttr::Left => "left",
            IndentAttr::FirstLine => "first-line",
            IndentAttr::Right => "right",
        }
    }
}

/// Paragraph properties that can be set directly on a paragraph or on a style.
///
/// Every field is optional: `None` means "not set here, look further up the
/// style chain".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphFormat {
    /// Raw outline level, 0-based (`0` is a top-level heading).
    /// [`BODY_TEXT_OUTLINE_LEVEL`] marks explicit body text, which stops the
    /// style chain walk without making the paragraph a heading.
    pub outline_level: Option<u8>,
    pub left_indent: Option<Length>,
    /// Negative for hanging indents.
    pub first_line_indent: Option<Length>,
    pub right_indent: Option<Length>,
}

impl ParagraphFormat {
    pub fn indent(&self, attr: IndentAttr) -> Option<Length> {
        match attr {
            IndentAttr::Left => self.left_indent,
            IndentAttr::FirstLine => self.first_line_indent,
            IndentAttr::Right => self.right_indent,
        }
    }
}

/// A body paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// The `w:pStyle` reference, if the paragraph names one.
    pub style_id: Option<String>,
    pub format: ParagraphFormat,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn with_format(mut self, format: ParagraphFormat) -> Self {
        self.format = format;
        self
    }
}

/// A paragraph style definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub id: String,
    /// Display name (`heading 1`, `Normal`, ...). Falls back to the id.
    pub name: String,
    /// The `w:basedOn` parent, if any.
    pub based_on: Option<String>,
    pub format: ParagraphFormat,
}

impl Style {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Self::default()
        }
    }

    pub fn based_on(mut self, parent: impl Into<String>) -> Self {
        self.based_on = Some(parent.into());
        self
    }

    pub fn with_format(mut self, format: ParagraphFormat) -> Self {
        self.format = format;
        self
    }
}

/// The paragraph styles of one document.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, Style>,
    default_style: Option<String>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, style: Style) {
        self.styles.insert(style.id.clone(), style);
    }

    pub fn set_default(&mut self, style_id: impl Into<String>) {
        self.default_style = Some(style_id.into());
    }

    pub fn get(&self, style_id: &str) -> Option<&Style> {
        self.styles.get(style_id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The style a paragraph effectively uses.
    ///
    /// A missing reference, or one naming an unknown style, falls back to the
    /// document's default paragraph style.
    pub fn paragraph_style(&self, style_id: Option<&str>) -> Option<&Style> {
        style_id
            .and_then(|id| self.get(id))
            .or_else(|| self.default_style.as_deref().and_then(|id| self.get(id)))
    }
}

/// A parsed document: body paragraphs in order plus their style sheet.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    pub styles: StyleSheet,
}
