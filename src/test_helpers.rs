//! Shared test utilities: `.docx` fixtures built on the fly.
//!
//! Tests pass only the interesting XML (body paragraphs, style definitions)
//! and the helpers supply the namespace boilerplate and the ZIP container.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let path = tmp.path().join("guide.docx");
//! write_docx(
//!     &path,
//!     r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>"#,
//!     Some(heading_styles()),
//! );
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A complete `word/document.xml` around the given body content.
pub fn document_xml(body_inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WML_NS}"><w:body>{body_inner}</w:body></w:document>"#
    )
}

/// A complete `word/styles.xml` around the given style definitions.
pub fn styles_xml(styles_inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WML_NS}">{styles_inner}</w:styles>"#
    )
}

/// `Normal` (default) plus `Heading1`/`Heading2` based on it.
pub fn heading_styles() -> &'static str {
    r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
       <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/>
         <w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="0"/></w:pPr></w:style>
       <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/>
         <w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="1"/></w:pPr></w:style>"#
}

/// Write a minimal `.docx` package to `path`.
///
/// `styles_inner` of `None` leaves out `word/styles.xml` entirely.
pub fn write_docx(path: &Path, body_inner: &str, styles_inner: Option<&str>) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(body_inner).as_bytes()).unwrap();

    if let Some(styles) = styles_inner {
        zip.start_file("word/styles.xml", options).unwrap();
        zip.write_all(styles_xml(styles).as_bytes()).unwrap();
    }

    zip.finish().unwrap();
}
