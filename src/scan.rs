//! Source document discovery.
//!
//! Walks the root directory recursively and picks up every file whose
//! extension matches the configured one (case-insensitively). Word's lock
//! files (`~$report.docx`, created while a document is open) share the
//! extension but are not documents, so they are skipped by prefix.
//!
//! Each source maps to an HTML file with the same stem in the same directory:
//!
//! ```text
//! notes/
//! ├── 2024/
//! │   ├── plan.docx      → plan.html
//! │   └── ~$plan.docx    (lock file, skipped)
//! └── Summary.DOCX       → Summary.html
//! ```

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// A discovered source document and where its page goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl SourceDocument {
    /// Page title: the source file name without its extension.
    pub fn title(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Find all source documents under `root`, sorted by path.
///
/// Unreadable subdirectories are logged and skipped; only a failure to read
/// the root itself is an error.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<Vec<SourceDocument>, ScanError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && is_source_document(entry.path(), config) {
            documents.push(SourceDocument {
                source: entry.path().to_path_buf(),
                output: output_path(entry.path()),
            });
        }
    }

    documents.sort_by(|a, b| a.source.cmp(&b.source));
    Ok(documents)
}

/// Whether a file name is a source document and not an editor lock file.
pub fn is_source_document(path: &Path, config: &ScanConfig) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return false;
    };
    if !config.lock_prefix.is_empty() && name.starts_with(&config.lock_prefix) {
        return false;
    }
    let wanted = config.extension.trim_start_matches('.');
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
}

/// The HTML page path for a source document: same directory, same stem.
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension("html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn rel_sources(root: &Path, docs: &[SourceDocument]) -> Vec<String> {
        docs.iter()
            .map(|d| {
                d.source
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn finds_documents_recursively() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a.docx");
        touch(tmp.path(), "sub/b.docx");
        touch(tmp.path(), "sub/deeper/c.docx");
        touch(tmp.path(), "sub/notes.txt");

        let docs = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(
            rel_sources(tmp.path(), &docs),
            ["a.docx", "sub/b.docx", "sub/deeper/c.docx"]
        );
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Upper.DOCX");
        touch(tmp.path(), "mixed.DocX");

        let docs = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn lock_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "report.docx");
        touch(tmp.path(), "~$report.docx");

        let docs = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(rel_sources(tmp.path(), &docs), ["report.docx"]);
    }

    #[test]
    fn output_sits_next_to_source() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "sub/Plan.DOCX");

        let docs = scan(tmp.path(), &ScanConfig::default()).unwrap();
        assert_eq!(docs[0].output, tmp.path().join("sub/Plan.html"));
        assert_eq!(docs[0].title(), "Plan");
    }

    #[test]
    fn custom_extension() {
        let config = ScanConfig {
            extension: ".docm".to_string(),
            ..ScanConfig::default()
        };
        assert!(is_source_document(Path::new("macro.docm"), &config));
        assert!(!is_source_document(Path::new("plain.docx"), &config));
    }

    #[test]
    fn title_keeps_inner_dots() {
        let doc = SourceDocument {
            source: PathBuf::from("v1.2 notes.docx"),
            output: output_path(Path::new("v1.2 notes.docx")),
        };
        assert_eq!(doc.title(), "v1.2 notes");
        assert_eq!(doc.output, PathBuf::from("v1.2 notes.html"));
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"), &ScanConfig::default());
        assert!(matches!(result, Err(ScanError::Walk { .. })));
    }
}
