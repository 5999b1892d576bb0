//! Command implementations for the form layout CLI.

use crate::config::{AnalyzeConfig, DocumentConfig, OutputFormat, load_manifest};
use form_layout::analysis::{DocumentAnalyzer, DocumentResult, FormAnalyzerBuilder, PageResult};
use form_layout::core::{FormError, FormResult};
use std::path::Path;
use std::time::Instant;
use tracing::info;

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Analyze a single page.
pub fn analyze(config: AnalyzeConfig) -> CliResult {
    let start = Instant::now();

    info!("Reading OCR output from {}...", config.source.path().display());
    let records = config.source.read()?;
    let (width, height) = config.dimensions.resolve()?;
    info!(
        "Loaded {} records for a {}x{} page in {:.2}ms",
        records.len(),
        width,
        height,
        start.elapsed().as_secs_f64() * 1000.0
    );

    let analyzer = FormAnalyzerBuilder::new().config(config.layout).build()?;
    let analysis_start = Instant::now();
    let result = analyzer.analyze(&records, width, height)?;
    info!(
        "Analysis completed in {:.2}ms",
        analysis_start.elapsed().as_secs_f64() * 1000.0
    );

    if let Some(overlay) = &config.overlay {
        let image_path = config.dimensions.image_path().ok_or_else(|| FormError::InvalidInput {
            message: "--overlay requires --image".to_string(),
        })?;
        save_overlay(image_path, &result, overlay)?;
        info!("Overlay written to {}", overlay.display());
    }

    output_page(&result, config.output)
}

/// Analyze every page listed in a manifest.
pub fn document(config: DocumentConfig) -> CliResult {
    let start = Instant::now();

    if config.policy.install_global_thread_pool()? {
        info!("Configured rayon pool with {:?} threads", config.policy.max_threads);
    }

    info!("Loading manifest {}...", config.manifest.display());
    let pages = load_manifest(&config.manifest)?;
    info!(
        "Loaded {} pages in {:.2}ms",
        pages.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let analyzer = FormAnalyzerBuilder::new().config(config.layout).build()?;
    let document = DocumentAnalyzer::new(analyzer)
        .with_policy(config.policy)
        .analyze(&pages)?;

    output_document(&document, config.output)
}

#[cfg(feature = "visualization")]
fn save_overlay(image_path: &Path, result: &PageResult, output: &Path) -> FormResult<()> {
    use form_layout::utils::{OverlayStyle, render_overlay};

    let page = image::open(image_path)?.to_rgb8();
    render_overlay(&page, result, &OverlayStyle::default()).save(output)?;
    Ok(())
}

#[cfg(not(feature = "visualization"))]
fn save_overlay(_image_path: &Path, _result: &PageResult, _output: &Path) -> FormResult<()> {
    Err(FormError::Processing {
        kind: form_layout::core::ProcessingStage::Rendering,
        context: "overlay output".to_string(),
        source: "built without the 'visualization' feature".into(),
    })
}

/// Output a page result in the specified format
fn output_page(result: &PageResult, format: OutputFormat) -> CliResult {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(result)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => print!("{}", result),
    }
    Ok(())
}

/// Output a document result in the specified format
fn output_document(document: &DocumentResult, format: OutputFormat) -> CliResult {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(document)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(document)?),
        OutputFormat::Text => {
            println!("Total pages: {}", document.meta.pages);
            for (index, page) in document.pages.iter().enumerate() {
                println!("\n========== Page {} ==========", index + 1);
                print!("{}", page);
            }
        }
    }
    Ok(())
}
