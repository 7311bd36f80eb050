//! Document conversion: source `.docx` → sibling `.html` page.
//!
//! Documents are independent of each other, so conversion runs on the rayon
//! pool. Outcomes come back in scan order regardless of which worker
//! finished first, and a document that fails to open is reported without
//! affecting the rest.

use crate::config::SiteConfig;
use crate::docx::{self, DocxError};
use crate::render::render_document;
use crate::scan::SourceDocument;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read document: {0}")]
    Docx(#[from] DocxError),
}

/// What happened to one source document.
#[derive(Debug)]
pub struct ConvertOutcome {
    pub document: SourceDocument,
    pub result: Result<ConvertStats, ConvertError>,
}

/// Block counts of a converted page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub paragraphs: usize,
    pub headings: usize,
}

/// Convert every document, returning one outcome per input in input order.
pub fn convert_all(documents: &[SourceDocument], config: &SiteConfig) -> Vec<ConvertOutcome> {
    documents
        .par_iter()
        .map(|document| ConvertOutcome {
            document: document.clone(),
            result: convert_document(document, config),
        })
        .collect()
}

/// Convert one document.
///
/// The document is parsed before the output is touched: when the source
/// cannot be read, a previously generated page stays in place.
pub fn convert_document(
    document: &SourceDocument,
    config: &SiteConfig,
) -> Result<ConvertStats, ConvertError> {
    let parsed = docx::read_document(&document.source)?;
    let page = render_document(&parsed, &document.title(), config);
    write_output(&document.output, &page.into_string())?;

    let headings = parsed
        .paragraphs
        .iter()
        .filter(|p| crate::heading::resolve_heading_level(p, &parsed.styles).is_some())
        .count();
    Ok(ConvertStats {
        paragraphs: parsed.paragraphs.len(),
        headings,
    })
}

/// Replace a generated file: any existing file is removed first.
pub fn write_output(path: &Path, contents: &str) -> std::io::Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::output_path;
    use crate::test_helpers::{heading_styles, write_docx};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn source(path: PathBuf) -> SourceDocument {
        SourceDocument {
            output: output_path(&path),
            source: path,
        }
    }

    #[test]
    fn converts_heading_and_body() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("intro.docx");
        write_docx(
            &path,
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Intro</w:t></w:r></w:p>
               <w:p><w:r><w:t>Body text</w:t></w:r></w:p>"#,
            Some(heading_styles()),
        );

        let doc = source(path);
        let stats = convert_document(&doc, &SiteConfig::default()).unwrap();
        assert_eq!(
            stats,
            ConvertStats {
                paragraphs: 2,
                headings: 1
            }
        );

        let html = fs::read_to_string(tmp.path().join("intro.html")).unwrap();
        assert!(html.contains("<title>intro</title>"));
        assert!(html.contains("<h1>Intro</h1>\n<p>Body text</p>"));
    }

    #[test]
    fn existing_output_is_replaced() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.docx");
        write_docx(&path, "<w:p><w:r><w:t>fresh</w:t></w:r></w:p>", None);
        fs::write(tmp.path().join("doc.html"), "stale").unwrap();

        convert_document(&source(path), &SiteConfig::default()).unwrap();
        let html = fs::read_to_string(tmp.path().join("doc.html")).unwrap();
        assert!(html.contains("<p>fresh</p>"));
        assert!(!html.contains("stale"));
    }

    #[test]
    fn unreadable_document_keeps_previous_output() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.docx");
        fs::write(&path, "not a zip").unwrap();
        fs::write(tmp.path().join("broken.html"), "previous").unwrap();

        let result = convert_document(&source(path), &SiteConfig::default());
        assert!(matches!(result, Err(ConvertError::Docx(_))));
        let html = fs::read_to_string(tmp.path().join("broken.html")).unwrap();
        assert_eq!(html, "previous");
    }

    #[test]
    fn failures_do_not_stop_other_documents() {
        let tmp = TempDir::new().unwrap();
        let good = tmp.path().join("a-good.docx");
        let bad = tmp.path().join("b-bad.docx");
        write_docx(&good, "<w:p><w:r><w:t>ok</w:t></w:r></w:p>", None);
        fs::write(&bad, "garbage").unwrap();

        let documents = vec![source(good), source(bad)];
        let outcomes = convert_all(&documents, &SiteConfig::default());

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].document, documents[0]);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(tmp.path().join("a-good.html").exists());
        assert!(!tmp.path().join("b-bad.html").exists());
    }

    #[test]
    fn out_of_range_values_convert_as_body_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("odd.docx");
        write_docx(
            &path,
            r#"<w:p><w:pPr><w:outlineLvl w:val="9"/></w:pPr><w:r><w:t>Body</w:t></w:r></w:p>
               <w:p><w:pPr><w:ind w:left="1e300"/></w:pPr><w:r><w:t>Wide</w:t></w:r></w:p>"#,
            Some(heading_styles()),
        );

        let stats = convert_document(&source(path), &SiteConfig::default()).unwrap();
        assert_eq!(stats.headings, 0);
        let html = fs::read_to_string(tmp.path().join("odd.html")).unwrap();
        assert!(html.contains("<p>Body</p>\n<p>Wide</p>"));
    }

    #[test]
    fn write_output_creates_new_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("new.html");
        write_output(&path, "x").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "x");
    }
}
