//! Form Layout CLI
//!
//! Reconstructs the layout of scanned forms from OCR output.
//!
//! # Usage
//!
//! ## Single page
//! ```bash
//! form-layout analyze --tsv page.tsv --image page.png --overlay page_fields.png
//! form-layout analyze --records page.json --width 1275 --height 1650 --output json
//! ```
//!
//! ## Document
//! ```bash
//! form-layout document --pages manifest.json --threads 4
//! ```

mod cli;
mod config;

use clap::{Parser, Subcommand};
use config::{
    AnalyzeConfig, DocumentConfig, OcrSource, OutputFormat, PageDimensions, load_layout_config,
};
use form_layout::core::ParallelPolicy;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "form-layout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detect text lines and blank input fields on scanned forms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single page
    Analyze {
        /// Tesseract TSV output of the page
        #[arg(long, conflicts_with_all = ["records", "columns"], required_unless_present_any = ["records", "columns"])]
        tsv: Option<PathBuf>,

        /// JSON array of OCR records
        #[arg(long, conflicts_with = "columns")]
        records: Option<PathBuf>,

        /// JSON object of parallel OCR columns
        #[arg(long)]
        columns: Option<PathBuf>,

        /// Page image; its dimensions are used and it is the overlay background
        #[arg(long, conflicts_with_all = ["width", "height"], required_unless_present_all = ["width", "height"])]
        image: Option<PathBuf>,

        /// Page width in pixels
        #[arg(long, requires = "height")]
        width: Option<u32>,

        /// Page height in pixels
        #[arg(long, requires = "width")]
        height: Option<u32>,

        /// Percentage of the page width ignored on each side
        #[arg(long = "margin-percent", env = "FORM_LAYOUT_MARGIN_PERCENT")]
        margin_percent: Option<f64>,

        /// JSON layout configuration file
        #[arg(long, env = "FORM_LAYOUT_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "pretty", env = "FORM_LAYOUT_OUTPUT")]
        output: OutputFormat,

        /// Write an overlay of margins, lines and fields to this image file
        #[arg(long, requires = "image")]
        overlay: Option<PathBuf>,
    },
    /// Analyze every page listed in a manifest
    Document {
        /// JSON manifest listing the pages
        #[arg(long)]
        pages: PathBuf,

        /// JSON layout configuration file
        #[arg(long, env = "FORM_LAYOUT_CONFIG")]
        config: Option<PathBuf>,

        /// Number of worker threads (defaults to number of CPUs)
        #[arg(long, env = "FORM_LAYOUT_THREADS")]
        threads: Option<usize>,

        /// Documents with at most this many pages are processed sequentially
        #[arg(long = "page-threshold", env = "FORM_LAYOUT_PAGE_THRESHOLD")]
        page_threshold: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "json", env = "FORM_LAYOUT_OUTPUT")]
        output: OutputFormat,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    form_layout::utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            tsv,
            records,
            columns,
            image,
            width,
            height,
            margin_percent,
            config,
            output,
            overlay,
        } => {
            let source = match (tsv, records, columns) {
                (Some(path), _, _) => OcrSource::Tsv(path),
                (None, Some(path), _) => OcrSource::Records(path),
                (None, None, Some(path)) => OcrSource::Columns(path),
                (None, None, None) => {
                    eprintln!("Error: one of --tsv, --records or --columns must be provided");
                    std::process::exit(1);
                }
            };

            let config = AnalyzeConfig {
                source,
                dimensions: PageDimensions::from_args(image, width, height)?,
                layout: load_layout_config(config.as_deref(), margin_percent)?,
                output,
                overlay,
            };

            info!("Analyzing page: {}", config.source.path().display());
            cli::analyze(config)?;
        }
        Commands::Document {
            pages,
            config,
            threads,
            page_threshold,
            output,
        } => {
            let mut policy = ParallelPolicy::new().with_max_threads(threads);
            if let Some(threshold) = page_threshold {
                policy = policy.with_page_threshold(threshold);
            }

            let config = DocumentConfig {
                manifest: pages,
                layout: load_layout_config(config.as_deref(), None)?,
                policy,
                output,
            };

            info!("Analyzing document: {}", config.manifest.display());
            cli::document(config)?;
        }
    }

    Ok(())
}
