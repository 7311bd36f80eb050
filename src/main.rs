use clap::{Parser, Subcommand};
use docx_site::{config, convert, docx, index, output, report, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docx-site")]
#[command(about = "Convert a tree of Word documents into a static HTML site")]
#[command(long_about = "\
Convert a tree of Word documents into a static HTML site

Every .docx under the root becomes an .html page next to it. Headings come
from outline levels (directly or through the style chain), and left-indented
paragraphs become nested blockquotes. Each directory then gets an index.html
linking its pages and indexed subdirectories.

  docs/
  ├── docx-site.toml     # Optional config (see gen-config)
  ├── index.html         # generated
  ├── readme.docx
  ├── readme.html        # generated
  └── guides/
      ├── index.html     # generated
      ├── setup.docx
      ├── setup.html     # generated
      └── ~$setup.docx   # Word lock file, ignored

Run with no command to build the whole site in the current directory.")]
#[command(version)]
struct Cli {
    /// Root directory to convert and index
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Convert all documents, then build the index pages (default)
    Build,
    /// Convert all documents to HTML
    Convert,
    /// Build the per-directory index pages from existing HTML
    Index,
    /// List the paragraphs of one document that render as headings
    Headings {
        /// Document to inspect
        file: PathBuf,
    },
    /// Show the effective indentation of every paragraph in one document
    Indents {
        /// Document to inspect
        file: PathBuf,
    },
    /// Print a stock docx-site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.root)?;
            init_thread_pool(&site_config.processing);

            println!("==> Stage 1: Converting documents in {}", cli.root.display());
            run_convert(&cli.root, &site_config)?;

            println!("==> Stage 2: Building indexes");
            run_index(&cli.root, &site_config)?;

            println!("==> Build complete: {}", cli.root.display());
        }
        Command::Convert => {
            let site_config = config::load_config(&cli.root)?;
            init_thread_pool(&site_config.processing);
            run_convert(&cli.root, &site_config)?;
        }
        Command::Index => {
            let site_config = config::load_config(&cli.root)?;
            run_index(&cli.root, &site_config)?;
        }
        Command::Headings { file } => {
            if let Some(document) = open_for_report(&file) {
                output::print_heading_report(&report::heading_report(&document));
            }
        }
        Command::Indents { file } => {
            if let Some(document) = open_for_report(&file) {
                output::print_indent_report(&report::indent_report(&document));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_convert(root: &Path, site_config: &config::SiteConfig) -> Result<(), scan::ScanError> {
    let documents = scan::scan(root, &site_config.scan)?;
    let outcomes = convert::convert_all(&documents, site_config);
    output::print_convert_output(&outcomes, root);
    Ok(())
}

fn run_index(root: &Path, site_config: &config::SiteConfig) -> Result<(), index::IndexError> {
    let pages = index::build_indexes(root, &site_config.index)?;
    output::print_index_output(&pages, root);
    Ok(())
}

/// Open a document for a diagnostic command; failure is printed, not fatal.
fn open_for_report(file: &Path) -> Option<docx_site::types::Document> {
    match docx::read_document(file) {
        Ok(document) => Some(document),
        Err(e) => {
            println!("Cannot open {}: {}", file.display(), e);
            None
        }
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
