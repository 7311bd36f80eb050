//! Reading `.docx` packages.
//!
//! A `.docx` file is a ZIP archive of WordprocessingML parts. Only two parts
//! matter here:
//!
//! - `word/document.xml`: the body paragraphs (required)
//! - `word/styles.xml`: paragraph style definitions (optional)
//!
//! Only the properties the resolvers need are extracted: paragraph text, the
//! `w:pStyle` reference, `w:outlineLvl` and `w:ind`. Malformed or
//! out-of-range indents are dropped as if absent, and outline levels past 8
//! read as body text; neither fails the read.

use crate::types::{
    BODY_TEXT_OUTLINE_LEVEL, Document, Length, Paragraph, ParagraphFormat, Style, StyleSheet,
};
use roxmltree::Node;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Largest indent magnitude Word accepts (22 inches).
const MAX_INDENT_TWIPS: f64 = 31680.0;

/// Paragraph-level elements whose runs belong to the paragraph text.
const RUN_CONTAINERS: &[&str] = &[
    "hyperlink",
    "smartTag",
    "ins",
    "sdt",
    "sdtContent",
    "fldSimple",
    "customXml",
];

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("missing package part: {0}")]
    MissingPart(&'static str),
    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: &'static str,
        source: roxmltree::Error,
    },
    #[error("{0} has no w:body element")]
    NoBody(&'static str),
    #[error("{0} is neither UTF-8 nor UTF-16 text")]
    Encoding(&'static str),
}

/// Open and parse a `.docx` file.
pub fn read_document(path: &Path) -> Result<Document, DocxError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let document_xml =
        read_part(&mut archive, DOCUMENT_PART)?.ok_or(DocxError::MissingPart(DOCUMENT_PART))?;

    let styles = match read_part(&mut archive, STYLES_PART)? {
        Some(xml) => parse_styles_xml(&xml).unwrap_or_else(|e| {
            log::warn!("{}: ignoring styles: {e}", path.display());
            StyleSheet::new()
        }),
        None => {
            log::debug!("{}: no {STYLES_PART}", path.display());
            StyleSheet::new()
        }
    };

    let paragraphs = parse_document_xml(&document_xml)?;
    log::debug!(
        "{}: {} paragraphs, {} paragraph styles",
        path.display(),
        paragraphs.len(),
        styles.len()
    );

    Ok(Document { paragraphs, styles })
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    name: &'static str,
) -> Result<Option<String>, DocxError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    decode_part(&bytes).map(Some).ok_or(DocxError::Encoding(name))
}

/// Decode an XML part: UTF-8 (with or without BOM) or BOM-marked UTF-16.
fn decode_part(bytes: &[u8]) -> Option<String> {
    let utf16 = |bytes: &[u8], from: fn([u8; 2]) -> u16| {
        let units = bytes.chunks_exact(2).map(|pair| from([pair[0], pair[1]]));
        char::decode_utf16(units).collect::<Result<String, _>>().ok()
    };
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        [0xFF, 0xFE, rest @ ..] if rest.len() % 2 == 0 => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] if rest.len() % 2 == 0 => utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

/// Parse the body paragraphs of a `word/document.xml` part.
///
/// Only direct children of `w:body` are read; paragraphs nested in tables
/// are skipped.
pub fn parse_document_xml(xml: &str) -> Result<Vec<Paragraph>, DocxError> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| DocxError::Xml {
        part: DOCUMENT_PART,
        source,
    })?;
    let body = wml(doc.root_element(), "body").ok_or(DocxError::NoBody(DOCUMENT_PART))?;

    Ok(body
        .children()
        .filter(|n| is_wml(*n, "p"))
        .map(parse_paragraph)
        .collect())
}

fn parse_paragraph(p: Node) -> Paragraph {
    let ppr = wml(p, "pPr");
    Paragraph {
        text: paragraph_text(p),
        style_id: ppr.and_then(|ppr| wml_val(ppr, "pStyle")).map(str::to_string),
        format: ppr.map(parse_format).unwrap_or_default(),
    }
}

/// Concatenated run text of a paragraph.
///
/// Runs are collected from the paragraph and from inline containers such as
/// hyperlinks and content controls. Drawings, text boxes and
/// `mc:AlternateContent` are not entered: their text is not part of the
/// paragraph, and alternate content repeats it once per alternative.
fn paragraph_text(p: Node) -> String {
    let mut text = String::new();
    collect_runs(p, &mut text);
    text
}

fn collect_runs(parent: Node, text: &mut String) {
    for node in parent.children() {
        if is_wml(node, "r") {
            push_run_text(node, text);
        } else if RUN_CONTAINERS.iter().any(|name| is_wml(node, name)) {
            collect_runs(node, text);
        }
    }
}

fn push_run_text(run: Node, text: &mut String) {
    for node in run.children().filter(|n| n.tag_name().namespace() == Some(WML_NS)) {
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
}

/// Parse a `word/styles.xml` part into a style sheet of paragraph styles.
pub fn parse_styles_xml(xml: &str) -> Result<StyleSheet, DocxError> {
    let doc = roxmltree::Document::parse(xml).map_err(|source| DocxError::Xml {
        part: STYLES_PART,
        source,
    })?;

    let mut sheet = StyleSheet::new();
    for node in doc.root_element().children() {
        if !is_wml(node, "style") || node.attribute((WML_NS, "type")) != Some("paragraph") {
            continue;
        }
        let Some(id) = node.attribute((WML_NS, "styleId")) else {
            log::debug!("skipping paragraph style without styleId");
            continue;
        };

        if node
            .attribute((WML_NS, "default"))
            .is_some_and(|v| v == "1" || v == "true")
        {
            sheet.set_default(id);
        }

        sheet.insert(Style {
            id: id.to_string(),
            name: wml_val(node, "name").unwrap_or(id).to_string(),
            based_on: wml_val(node, "basedOn").map(str::to_string),
            format: wml(node, "pPr").map(parse_format).unwrap_or_default(),
        });
    }
    Ok(sheet)
}

/// Extract outline level and indentation from a `w:pPr` element.
fn parse_format(ppr: Node) -> ParagraphFormat {
    // levels past 8 are invalid; Word treats them as body text
    let outline_level = wml_val(ppr, "outlineLvl")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(|level| level.min(u32::from(BODY_TEXT_OUTLINE_LEVEL)) as u8);

    let ind = wml(ppr, "ind");

    // `w:hanging` takes precedence over `w:firstLine` when both are present
    let first_line_indent = ind_length(ind, &["hanging"])
        .map(|hanging| Length::from_points(-hanging.points()))
        .or_else(|| ind_length(ind, &["firstLine"]));

    ParagraphFormat {
        outline_level,
        left_indent: ind_length(ind, &["left", "start"]),
        first_line_indent,
        right_indent: ind_length(ind, &["right", "end"]),
    }
}

/// The first `w:ind` attribute present among `names`, read as twips.
fn ind_length(ind: Option<Node>, names: &[&str]) -> Option<Length> {
    let ind = ind?;
    names
        .iter()
        .find_map(|name| ind.attribute((WML_NS, *name)))
        .and_then(parse_twips)
}

fn parse_twips(value: &str) -> Option<Length> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.abs() <= MAX_INDENT_TWIPS)
        .map(Length::from_twips)
}

fn is_wml(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WML_NS)
}

fn wml<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_wml(*n, name))
}

fn wml_val<'a, 'input>(node: Node<'a, 'input>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}
