//! # docx-site
//!
//! Turns a directory tree of Word documents into a browsable static site.
//! Every `.docx` becomes an HTML page next to it, and every directory gets an
//! `index.html` linking its pages and indexed subdirectories.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      root/        →  [SourceDocument]   (find .docx, skip lock files)
//! 2. Convert   .docx        →  .html              (parallel, one page per document)
//! 3. Index     directories  →  index.html         (sequential, deepest first)
//! ```
//!
//! Conversion never looks at other documents and indexing only looks at the
//! HTML on disk, so each stage can be run on its own from the CLI.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Recursive discovery of source documents and their output paths |
//! | [`docx`] | Reads the ZIP package and the document and style XML parts |
//! | [`types`] | Document model: paragraphs, paragraph properties, style sheet |
//! | [`inherit`] | Style chain walking and the direct-then-ancestors resolver |
//! | [`heading`] | Heading level from outline level annotations |
//! | [`indent`] | Effective indentation and blockquote nesting depth |
//! | [`render`] | Maud rendering of blocks and the document page |
//! | [`convert`] | Per-document conversion on the rayon pool |
//! | [`index`] | Per-directory index pages |
//! | [`report`] | Heading and indentation diagnostics for one document |
//! | [`config`] | `docx-site.toml` loading, merging over defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Style Inheritance Is Resolved, Not Flattened
//!
//! A paragraph's heading level or indentation can come from its direct
//! formatting, its style, or any style that style is based on. The reader
//! keeps the style sheet as written and [`inherit::resolve_inherited`] walks
//! the chain on demand, nearest definition first. Chains are bounded by the
//! number of styles, so a cyclic `basedOn` in a damaged document terminates.
//!
//! ## Output Is a Pure Function of the Input
//!
//! Pages contain no timestamps or build identifiers, and index entries are
//! sorted. Running twice over an unchanged tree rewrites byte-identical
//! files, which keeps the generated site diff-friendly under version control.

pub mod config;
pub mod convert;
pub mod docx;
pub mod heading;
pub mod indent;
pub mod index;
pub mod inherit;
pub mod output;
pub mod render;
pub mod report;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
