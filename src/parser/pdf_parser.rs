//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

use super::backend::{decode_content, FontMap, LopdfBackend, PdfBackend};
use super::content::extract_spans;
use super::layout::LayoutAnalyzer;
use super::options::{ErrorMode, ParseOptions};
use crate::detect::detect_format_from_path;
use crate::error::Result;
use crate::model::{Document, Page};

/// Everything needed to build one page, gathered from the backend up front
/// so the per-page work does not touch the PDF document.
struct PageInput {
    number: u32,
    width: f32,
    height: f32,
    raw: Result<(FontMap, Vec<u8>)>,
}

/// PDF document parser.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
    source: Option<String>,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self {
            backend,
            options,
            source: Some(path.display().to_string()),
        })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        crate::detect::detect_format_from_bytes(data)?;
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self {
            backend,
            options,
            source: None,
        })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Name reported by the parsed document.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Parse the selected pages into a span tree.
    pub fn parse(&self) -> Result<Document> {
        let page_ids = self.backend.pages();
        let total_pages = page_ids.len() as u32;
        self.options.pages.validate(total_pages)?;

        let inputs: Vec<PageInput> = page_ids
            .iter()
            .filter(|(number, _)| self.options.pages.includes(**number))
            .map(|(&number, &id)| {
                let (width, height) = self.backend.page_size(id);
                let raw = self
                    .backend
                    .page_fonts(id)
                    .and_then(|fonts| Ok((fonts, self.backend.page_content(id)?)));
                PageInput {
                    number,
                    width,
                    height,
                    raw,
                }
            })
            .collect();

        let analyzer = LayoutAnalyzer::new(self.options.block_gap_factor);
        let mode = self.options.error_mode;

        let pages: Vec<Page> = if self.options.parallel {
            inputs
                .into_par_iter()
                .map(|input| build_page(input, analyzer, mode))
                .collect::<Result<Vec<_>>>()?
        } else {
            inputs
                .into_iter()
                .map(|input| build_page(input, analyzer, mode))
                .collect::<Result<Vec<_>>>()?
        };

        let mut document = Document {
            source: self.source.clone(),
            pages,
        };
        document.sanitize();

        log::debug!(
            "{}: parsed {} of {} page(s), {} span(s)",
            document.name(),
            document.page_count(),
            total_pages,
            document.span_count()
        );
        Ok(document)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

/// Decode one page and lay out its spans.
fn build_page(input: PageInput, analyzer: LayoutAnalyzer, mode: ErrorMode) -> Result<Page> {
    let mut page = Page::new(input.number, input.width, input.height);

    let spans = input.raw.and_then(|(fonts, content)| {
        let ops = decode_content(&content)?;
        Ok(extract_spans(&ops, &fonts))
    });

    match spans {
        Ok(spans) => page.blocks = analyzer.blocks(spans),
        Err(e) if mode == ErrorMode::Lenient => {
            log::warn!("Failed to extract text from page {}: {}", input.number, e);
        }
        Err(e) => return Err(e),
    }

    Ok(page)
}
