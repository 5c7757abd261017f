//! # pdfoutline
//!
//! Title and heading outline extraction for PDF documents.
//!
//! The outline is inferred from typography alone: each page's body text
//! size and font are profiled, and lines that stand out from them (larger,
//! bold, numbered, colon-terminated) and are followed by body text become
//! headings. Heading levels come from the distinct heading sizes in the
//! document, largest first.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline_file("document.pdf")?;
//!     println!("{}", render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! The heading engine works on any [`PageLayout`] source; PDF parsing is
//! only one way of producing them:
//!
//! ```
//! use pdfoutline::{infer_outline, PageLayout};
//!
//! let outline = infer_outline(&[PageLayout::new(1)]);
//! assert_eq!(outline.title, "Untitled Document");
//! ```

pub mod batch;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use model::{
    BoundingBox, DocumentOutline, FontSize, HeadingLevel, Line, OutlineEntry, PageLayout, TextRun,
};
pub use outline::{infer_outline, OutlineAnalysis, OutlineEngine};
pub use parser::{ErrorMode, ExtractOptions, PageSelection};
pub use render::JsonFormat;

use std::path::Path;

use parser::{LayoutExtractor, LopdfBackend};

/// Extract page layouts from a PDF file.
pub fn extract_layouts_file<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Vec<PageLayout>> {
    let backend = LopdfBackend::load_file(path)?;
    LayoutExtractor::new(&backend, options.clone()).extract()
}

/// Extract page layouts from PDF bytes.
pub fn extract_layouts_bytes(data: &[u8], options: &ExtractOptions) -> Result<Vec<PageLayout>> {
    let backend = LopdfBackend::load_bytes(data)?;
    LayoutExtractor::new(&backend, options.clone()).extract()
}

/// Extract the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// let outline = pdfoutline::extract_outline_file("document.pdf").unwrap();
/// for entry in &outline.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    Outliner::new().extract_file(path)
}

/// Extract the outline of a PDF file with custom options.
pub fn extract_outline_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<DocumentOutline> {
    Outliner::with_options(options).extract_file(path)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    Outliner::new().extract_bytes(data)
}

/// Extract the outline of a PDF held in memory with custom options.
pub fn extract_outline_bytes_with_options(
    data: &[u8],
    options: ExtractOptions,
) -> Result<DocumentOutline> {
    Outliner::with_options(options).extract_bytes(data)
}

/// Builder for extracting and serialising outlines.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{Outliner, PageSelection};
///
/// let outliner = Outliner::new()
///     .lenient()
///     .compact()
///     .with_pages(PageSelection::parse("1-5")?);
/// let outline = outliner.extract_file("document.pdf")?;
/// println!("{}", outliner.to_json(&outline)?);
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug)]
pub struct Outliner {
    options: ExtractOptions,
    format: JsonFormat,
    engine: OutlineEngine,
}

impl Outliner {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create a builder from existing extract options.
    pub fn with_options(options: ExtractOptions) -> Self {
        let engine = OutlineEngine::new().with_parallel(options.parallel);
        Self {
            options,
            format: JsonFormat::default(),
            engine,
        }
    }

    /// Enable lenient extraction mode.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self.engine = self.engine.with_parallel(false);
        self
    }

    /// Set page selection.
    ///
    /// Only the selected pages reach the heading engine, so the title is
    /// taken from the first selected page rather than page 1.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set the JSON output format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Emit compact JSON.
    pub fn compact(self) -> Self {
        self.with_format(JsonFormat::Compact)
    }

    /// Use a custom heading engine.
    pub fn with_engine(mut self, engine: OutlineEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Extraction options in effect.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// JSON format in effect.
    pub fn format(&self) -> JsonFormat {
        self.format
    }

    /// The heading engine.
    pub fn engine(&self) -> &OutlineEngine {
        &self.engine
    }

    /// Extract the outline of a PDF file.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<DocumentOutline> {
        let pages = extract_layouts_file(path, &self.options)?;
        Ok(self.engine.infer(&pages))
    }

    /// Extract the outline of a PDF held in memory.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<DocumentOutline> {
        let pages = extract_layouts_bytes(data, &self.options)?;
        Ok(self.engine.infer(&pages))
    }

    /// Run the engine on a PDF file and keep the per-page findings.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineAnalysis> {
        let pages = extract_layouts_file(path, &self.options)?;
        Ok(self.engine.analyze(&pages))
    }

    /// Serialise an outline in the configured format.
    pub fn to_json(&self, outline: &DocumentOutline) -> Result<String> {
        render::to_json(outline, self.format)
    }
}

impl Default for Outliner {
    fn default() -> Self {
        Self::new()
    }
}
