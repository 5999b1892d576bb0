//! Configuration types for the form layout CLI.

use clap::ValueEnum;
use form_layout::analysis::PageInput;
use form_layout::core::{FormError, FormResult, LayoutConfig, ParallelPolicy};
use form_layout::domain::{
    ColumnsJsonAdapter, OcrOutputAdapter, RawOcrRecord, RecordsJsonAdapter, TesseractTsvAdapter,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
    /// Human-readable summary
    Text,
}

/// Where the OCR output of a page is read from.
#[derive(Debug, Clone)]
pub enum OcrSource {
    Tsv(PathBuf),
    Records(PathBuf),
    Columns(PathBuf),
}

impl OcrSource {
    pub fn path(&self) -> &Path {
        match self {
            OcrSource::Tsv(path) | OcrSource::Records(path) | OcrSource::Columns(path) => path,
        }
    }

    /// Reads the records with the adapter matching the source kind.
    pub fn read(&self) -> FormResult<Vec<RawOcrRecord>> {
        let adapter: Box<dyn OcrOutputAdapter> = match self {
            OcrSource::Tsv(_) => Box::new(TesseractTsvAdapter::new()),
            OcrSource::Records(_) => Box::new(RecordsJsonAdapter),
            OcrSource::Columns(_) => Box::new(ColumnsJsonAdapter),
        };
        adapter.parse_file(self.path())
    }
}

/// Page dimensions: measured from the page image or given explicitly.
#[derive(Debug, Clone)]
pub enum PageDimensions {
    Image(PathBuf),
    Explicit { width: u32, height: u32 },
}

impl PageDimensions {
    pub fn from_args(
        image: Option<PathBuf>,
        width: Option<u32>,
        height: Option<u32>,
    ) -> FormResult<Self> {
        match (image, width, height) {
            (Some(image), _, _) => Ok(PageDimensions::Image(image)),
            (None, Some(width), Some(height)) => Ok(PageDimensions::Explicit { width, height }),
            _ => Err(FormError::InvalidInput {
                message: "either an image or both width and height are required".to_string(),
            }),
        }
    }

    /// Resolves to `(width, height)`, reading only the image header.
    pub fn resolve(&self) -> FormResult<(u32, u32)> {
        match self {
            PageDimensions::Image(path) => Ok(image::image_dimensions(path)?),
            PageDimensions::Explicit { width, height } => Ok((*width, *height)),
        }
    }

    pub fn image_path(&self) -> Option<&Path> {
        match self {
            PageDimensions::Image(path) => Some(path),
            PageDimensions::Explicit { .. } => None,
        }
    }
}

/// Configuration for the `analyze` command.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub source: OcrSource,
    pub dimensions: PageDimensions,
    pub layout: LayoutConfig,
    pub output: OutputFormat,
    pub overlay: Option<PathBuf>,
}

/// Configuration for the `document` command.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub manifest: PathBuf,
    pub layout: LayoutConfig,
    pub policy: ParallelPolicy,
    pub output: OutputFormat,
}

/// Loads the layout configuration file if given, then applies flag overrides.
pub fn load_layout_config(
    path: Option<&Path>,
    margin_percent: Option<f64>,
) -> FormResult<LayoutConfig> {
    let config = match path {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };
    Ok(match margin_percent {
        Some(margin_percent) => config.with_margin_percent(margin_percent),
        None => config,
    })
}

/// One entry of a document manifest.
///
/// Relative paths are resolved against the manifest's directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSource {
    #[serde(default)]
    pub tsv: Option<PathBuf>,
    #[serde(default)]
    pub records: Option<PathBuf>,
    #[serde(default)]
    pub columns: Option<PathBuf>,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl PageSource {
    fn source(&self, base: &Path) -> FormResult<OcrSource> {
        let mut sources = [
            self.tsv.as_ref().map(|p| OcrSource::Tsv(base.join(p))),
            self.records.as_ref().map(|p| OcrSource::Records(base.join(p))),
            self.columns.as_ref().map(|p| OcrSource::Columns(base.join(p))),
        ]
        .into_iter()
        .flatten();

        match (sources.next(), sources.next()) {
            (Some(source), None) => Ok(source),
            _ => Err(FormError::InvalidInput {
                message: "each page needs exactly one of 'tsv', 'records' or 'columns'"
                    .to_string(),
            }),
        }
    }

    /// Reads the page's OCR output and dimensions.
    pub fn load(&self, base: &Path) -> FormResult<PageInput> {
        let source = self.source(base)?;
        let dimensions = PageDimensions::from_args(
            self.image.as_ref().map(|p| base.join(p)),
            self.width,
            self.height,
        )?;
        let (width, height) = dimensions.resolve()?;
        Ok(PageInput::new(source.read()?, width, height))
    }
}

/// Reads a manifest file and every page it lists.
pub fn load_manifest(path: &Path) -> FormResult<Vec<PageInput>> {
    let contents = std::fs::read_to_string(path)?;
    let entries: Vec<PageSource> = serde_json::from_str(&contents)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry.load(base).map_err(|err| FormError::page_error(index, err)))
        .collect()
}
