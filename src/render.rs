//! HTML rendering of a parsed document.
//!
//! Each paragraph becomes exactly one [`Block`]:
//!
//! | Paragraph | Block | HTML |
//! |-----------|-------|------|
//! | empty text | `LineBreak` | `<br><br>` |
//! | resolves to a heading level | `Heading` | `<h1>`..`<h6>` |
//! | left indent ≥ one indent unit | `Quote` | nested `<blockquote>`s |
//! | anything else | `Paragraph` | `<p>` |
//!
//! Only a zero-length paragraph is a line break. A whitespace-only paragraph
//! is not a heading (the resolver trims) and falls through to the indent
//! rule like any other body text.
//!
//! The page around the blocks is static: a sidebar whose table of contents
//! is filled in client-side by `static/toc.js` from the rendered headings,
//! and the stylesheet in `static/document.css`. Nothing in the page depends
//! on the clock, so re-rendering an unchanged document is byte-identical.

use crate::config::{HeadingOverflow, PageConfig, RenderConfig, SiteConfig};
use crate::heading::resolve_heading_level;
use crate::indent::{effective_indent_points, nesting_depth};
use crate::types::{Document, IndentAttr, Paragraph, StyleSheet};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const DOCUMENT_CSS: &str = include_str!("../static/document.css");
const TOC_JS: &str = include_str!("../static/toc.js");

/// Deepest heading element HTML defines.
pub const MAX_HTML_HEADING: u8 = 6;

/// How one paragraph is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Block<'a> {
    LineBreak,
    /// `level` is the resolved level, before the overflow policy applies.
    Heading { level: u8, text: &'a str },
    Quote { depth: usize, text: &'a str },
    Paragraph { text: &'a str },
}

/// Decide how a paragraph renders.
pub fn classify<'a>(
    paragraph: &'a Paragraph,
    styles: &StyleSheet,
    config: &RenderConfig,
) -> Block<'a> {
    let text = paragraph.text.as_str();
    if text.is_empty() {
        return Block::LineBreak;
    }
    if let Some(level) = resolve_heading_level(paragraph, styles) {
        return Block::Heading { level, text };
    }
    let left = effective_indent_points(paragraph, styles, IndentAttr::Left);
    match nesting_depth(left, config.indent_unit) {
        0 => Block::Paragraph { text },
        depth => Block::Quote { depth, text },
    }
}

/// The heading element level actually emitted for a resolved level.
pub fn heading_tag_level(level: u8, overflow: HeadingOverflow) -> u8 {
    match overflow {
        HeadingOverflow::Clamp => level.min(MAX_HTML_HEADING),
        HeadingOverflow::Passthrough => level,
    }
}

/// Render all paragraphs of a document, one block per line.
pub fn render_body(document: &Document, config: &RenderConfig) -> Markup {
    html! {
        @for paragraph in &document.paragraphs {
            (render_block(classify(paragraph, &document.styles, config), config))
            "\n"
        }
    }
}

pub fn render_block(block: Block<'_>, config: &RenderConfig) -> Markup {
    match block {
        Block::LineBreak => html! { br; br; },
        Block::Heading { level, text } => heading(
            heading_tag_level(level, config.heading_overflow),
            text_markup(text, config.escape_text),
        ),
        Block::Quote { depth, text } => html! {
            (PreEscaped("<blockquote>".repeat(depth)))
            (text_markup(text, config.escape_text))
            (PreEscaped("</blockquote>".repeat(depth)))
        },
        Block::Paragraph { text } => html! {
            p { (text_markup(text, config.escape_text)) }
        },
    }
}

fn text_markup(text: &str, escape: bool) -> Markup {
    if escape {
        html! { (text) }
    } else {
        PreEscaped(text.to_string())
    }
}

fn heading(level: u8, body: Markup) -> Markup {
    match level {
        1 => html! { h1 { (body) } },
        2 => html! { h2 { (body) } },
        3 => html! { h3 { (body) } },
        4 => html! { h4 { (body) } },
        5 => html! { h5 { (body) } },
        6 => html! { h6 { (body) } },
        n => html! {
            (PreEscaped(format!("<h{n}>")))
            (body)
            (PreEscaped(format!("</h{n}>")))
        },
    }
}

/// Render a full document page titled `title`.
pub fn render_document(document: &Document, title: &str, config: &SiteConfig) -> Markup {
    base_document(title, &config.page, render_body(document, &config.render))
}

fn base_document(title: &str, page: &PageConfig, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(page.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(DOCUMENT_CSS)) }
            }
            body {
                div.container {
                    aside.sidebar {
                        h2.sidebar-title { (page.toc_title) }
                        ul id="toc" {}
                    }
                    main.content {
                        "\n"
                        (body)
                    }
                }
                div.back-to-top id="backToTop" { "↑" }
                footer {
                    p { (page.footer_text) }
                }
                script { (PreEscaped(TOC_JS)) }
            }
        }
    }
}
