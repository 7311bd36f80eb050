//! Per-directory navigation pages.
//!
//! Every directory under the root gets an `index.html` listing its rendered
//! pages and the subdirectories that have an index of their own:
//!
//! ```text
//! root/
//! ├── index.html          → links guides/index.html, readme.html
//! ├── readme.html
//! ├── guides/
//! │   ├── index.html      → links setup.html
//! │   └── setup.html
//! └── empty/              (no pages below it: no index, not linked)
//! ```
//!
//! Directories are processed deepest-first, so by the time a directory's
//! page is written, each child that qualifies already has its `index.html`
//! on disk and can be linked. A directory with nothing to list is skipped,
//! except the root, which always gets a page.

use crate::config::IndexConfig;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const INDEX_FILE: &str = "index.html";

const INDEX_CSS: &str = include_str!("../static/index.css");

/// Characters escaped in an href path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

impl EntryKind {
    fn as_str(self) -> &'static str {
        match self {
            EntryKind::Dir => "dir",
            EntryKind::File => "file",
        }
    }
}

/// One link on an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Link label: directory name, or file stem.
    pub name: String,
    /// Link target relative to the directory.
    pub href: String,
    pub kind: EntryKind,
}

/// An index page that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    pub path: PathBuf,
    pub entries: usize,
}

/// Write index pages for `root` and every qualifying directory below it.
///
/// Returns the written pages, deepest directories first.
pub fn build_indexes(root: &Path, config: &IndexConfig) -> Result<Vec<IndexPage>, IndexError> {
    let mut written = Vec::new();

    for dir in directories_deepest_first(root)? {
        let is_root = dir == root;
        let entries = collect_entries(&dir)?;
        if entries.is_empty() && !is_root {
            log::debug!("{}: nothing to index", dir.display());
            continue;
        }

        let title = if is_root {
            config.root_title.clone()
        } else {
            dir.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        };
        let page = render_index(&title, &entries, config);
        let path = dir.join(INDEX_FILE);
        crate::convert::write_output(&path, &page.into_string())?;
        written.push(IndexPage {
            path,
            entries: entries.len(),
        });
    }

    Ok(written)
}

/// All directories under `root` (inclusive), deepest first.
///
/// Ties are ordered by path so runs are reproducible.
fn directories_deepest_first(root: &Path) -> Result<Vec<PathBuf>, IndexError> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(IndexError::Walk {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                log::warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_dir() {
            dirs.push((entry.depth(), entry.into_path()));
        }
    }
    dirs.sort_by(|(depth_a, a), (depth_b, b)| depth_b.cmp(depth_a).then_with(|| a.cmp(b)));
    Ok(dirs.into_iter().map(|(_, path)| path).collect())
}

/// The links for one directory: indexed subdirectories, then pages.
///
/// Each group is sorted case-insensitively by its label.
pub fn collect_entries(dir: &Path) -> Result<Vec<IndexEntry>, IndexError> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };

        // symlinked directories are not walked, so they never get an index
        if file_type.is_dir() {
            if path.join(INDEX_FILE).is_file() {
                subdirs.push(IndexEntry {
                    href: format!("{}/{INDEX_FILE}", encode_segment(&name)),
                    name,
                    kind: EntryKind::Dir,
                });
            }
        } else if is_page(&path, &name, file_type) {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| name.clone());
            files.push(IndexEntry {
                name: stem,
                href: encode_segment(&name),
                kind: EntryKind::File,
            });
        }
    }

    let by_label = |a: &IndexEntry, b: &IndexEntry| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    };
    subdirs.sort_by(by_label);
    files.sort_by(by_label);

    subdirs.extend(files);
    Ok(subdirs)
}

fn is_page(path: &Path, name: &str, file_type: fs::FileType) -> bool {
    let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
    name != INDEX_FILE && is_file && path.extension().is_some_and(|ext| ext == "html")
}

fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

/// Render the index page for one directory.
pub fn render_index(title: &str, entries: &[IndexEntry], config: &IndexConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) (config.title_suffix) }
                style { (PreEscaped(INDEX_CSS)) }
            }
            body {
                div.header {
                    h1.title { (title) }
                    p.count { (config.count_text(entries.len())) }
                }
                ul.link-list {
                    @for entry in entries {
                        li.link-item data-type=(entry.kind.as_str()) {
                            a href=(entry.href) { (entry.name) }
                        }
                    }
                }
            }
        }
    }
}
