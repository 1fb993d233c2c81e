//! # sizetag
//!
//! Infer the logical structure of a PDF from font-size statistics.
//!
//! The most used font size is taken as body text. Every larger size
//! becomes a heading (`h1`, `h2`, …) and every smaller size becomes
//! sub-paragraph text (`s1`, `s2`, …). Runs of equal-size text are then
//! merged into tagged elements such as `<h1>Title</h1>` or `<p>Body</p>`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sizetag::extract_headers_paragraphs;
//!
//! fn main() -> sizetag::Result<()> {
//!     // Headings and paragraphs only
//!     let elements = extract_headers_paragraphs("document.pdf", true)?;
//!     for element in &elements {
//!         println!("{}", element);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **PDF and span dumps**: reads PDFs through lopdf, or JSON dumps of a
//!   page/block/line/span tree (PyMuPDF's `get_text("dict")` shape)
//! - **Deterministic ranking**: exact size equality, stable tie-breaks
//! - **Multiple output formats**: tagged markup, plain text, Markdown, JSON
//! - **Parallel processing**: uses Rayon to extract pages

pub mod classify;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use classify::{
    classify, BlockMerger, Classification, ClassifyOptions, FrequencyTable, Granularity,
    HeadingOrder, SizeTagMap, StyleKey,
};
pub use detect::{detect_input_from_bytes, detect_input_from_path, InputFormat, PdfFormat};
pub use error::{Error, Result};
pub use model::{Block, Document, ElementKind, FontSize, Line, Page, Span, Tag, TaggedElement};
pub use parser::{ErrorMode, PageSelection, ParseOptions, PdfParser};
pub use render::{JsonFormat, LineJoin, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Load a PDF or JSON span dump into a document.
///
/// # Example
///
/// ```no_run
/// use sizetag::load_file;
///
/// let doc = load_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_file_with_options(path, ParseOptions::default())
}

/// Load a PDF or JSON span dump with custom options.
///
/// # Example
///
/// ```no_run
/// use sizetag::{load_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().sequential();
/// let doc = load_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn load_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    match detect_input_from_path(path)? {
        InputFormat::Pdf(_) => PdfParser::open_with_options(path, options)?.parse(),
        InputFormat::SpanDump => parser::parse_json_file(path, &options),
    }
}

/// Load a document from bytes.
pub fn load_bytes(data: &[u8]) -> Result<Document> {
    load_bytes_with_options(data, ParseOptions::default())
}

/// Load a document from bytes with custom options.
pub fn load_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    match detect_input_from_bytes(data)? {
        InputFormat::Pdf(_) => PdfParser::from_bytes_with_options(data, options)?.parse(),
        InputFormat::SpanDump => {
            let json = std::str::from_utf8(data).map_err(|_| Error::UnknownFormat)?;
            parser::parse_json_str(json, &options)
        }
    }
}

/// Load a document from a reader.
///
/// # Example
///
/// ```no_run
/// use sizetag::load_reader;
/// use std::fs::File;
///
/// let file = File::open("spans.json").unwrap();
/// let doc = load_reader(file).unwrap();
/// ```
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    load_reader_with_options(reader, ParseOptions::default())
}

/// Load a document from a reader with custom options.
pub fn load_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    load_bytes_with_options(&data, options)
}

/// Load a document without blocking the async runtime's worker threads
/// on file I/O.
#[cfg(feature = "async")]
pub async fn load_file_async<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    let mut doc = load_bytes_with_options(&data, options)?;
    if doc.source.is_none() {
        doc.source = Some(path.display().to_string());
    }
    Ok(doc)
}

/// Load and classify a file.
pub fn classify_file<P: AsRef<Path>>(path: P, options: &ClassifyOptions) -> Result<Classification> {
    let doc = load_file(path)?;
    classify(&doc, options)
}

/// Tagged headings and paragraphs of a file.
///
/// With `remove_sub_tags` set, sub-paragraph elements (`s1`, `s2`, …) are
/// dropped and only headings and paragraphs remain.
///
/// # Example
///
/// ```no_run
/// use sizetag::extract_headers_paragraphs;
///
/// let elements = extract_headers_paragraphs("document.pdf", false).unwrap();
/// println!("{} elements", elements.len());
/// ```
pub fn extract_headers_paragraphs<P: AsRef<Path>>(
    path: P,
    remove_sub_tags: bool,
) -> Result<Vec<TaggedElement>> {
    let doc = load_file(path)?;
    classify::extract_headers_paragraphs(&doc, remove_sub_tags)
}

/// Plain text of a file's headings and paragraphs.
///
/// # Example
///
/// ```no_run
/// use sizetag::extract_text;
///
/// let text = extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let elements = extract_headers_paragraphs(path, true)?;
    render::to_text(&elements, &RenderOptions::default())
}

/// Convert a file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let elements = extract_headers_paragraphs(path, false)?;
    Ok(render::to_markdown(&elements, &RenderOptions::default()))
}

/// Convert a file's classification to JSON.
///
/// # Example
///
/// ```no_run
/// use sizetag::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let classification = classify_file(path, &ClassifyOptions::default())?;
    render::to_json(&classification, format)
}

/// Builder chaining loading, classification and rendering.
///
/// # Example
///
/// ```no_run
/// use sizetag::Sizetag;
///
/// let markdown = Sizetag::new()
///     .lenient()
///     .headings_and_paragraphs_only()
///     .classify("document.pdf")?
///     .to_markdown();
/// # Ok::<(), sizetag::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sizetag {
    parse_options: ParseOptions,
    classify_options: ClassifyOptions,
    render_options: RenderOptions,
}

impl Sizetag {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages);
        self
    }

    /// Count styles by size, flags, font and color.
    pub fn granular(mut self) -> Self {
        self.classify_options = self.classify_options.granular();
        self
    }

    /// Number headings from the largest size down.
    pub fn largest_first(mut self) -> Self {
        self.classify_options = self
            .classify_options
            .with_heading_order(HeadingOrder::FromLargest);
        self
    }

    /// Drop sub-paragraph elements.
    pub fn headings_and_paragraphs_only(mut self) -> Self {
        self.classify_options = self.classify_options.headings_and_paragraphs_only();
        self
    }

    /// Set the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Load and classify a file.
    pub fn classify<P: AsRef<Path>>(self, path: P) -> Result<SizetagResult> {
        let doc = load_file_with_options(path, self.parse_options.clone())?;
        self.classify_document(&doc)
    }

    /// Load and classify bytes.
    pub fn classify_bytes(self, data: &[u8]) -> Result<SizetagResult> {
        let doc = load_bytes_with_options(data, self.parse_options.clone())?;
        self.classify_document(&doc)
    }

    /// Classify an already loaded document.
    pub fn classify_document(self, doc: &Document) -> Result<SizetagResult> {
        Ok(SizetagResult {
            classification: classify(doc, &self.classify_options)?,
            render_options: self.render_options,
        })
    }
}

/// Result of a [`Sizetag`] run.
#[derive(Debug, Clone)]
pub struct SizetagResult {
    /// The classification
    pub classification: Classification,
    render_options: RenderOptions,
}

impl SizetagResult {
    /// Filtered elements in document order.
    pub fn elements(&self) -> &[TaggedElement] {
        &self.classification.elements
    }

    /// One markup string per element.
    pub fn to_tagged(&self) -> Vec<String> {
        render::to_tagged(self.elements())
    }

    /// All elements joined into one markup string.
    pub fn to_tagged_string(&self) -> String {
        render::to_tagged_string(self.elements(), self.render_options.line_join)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(self.elements(), &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(self.elements(), &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.classification, self.render_options.json_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &[u8] = br#"{"source": "dump.json", "pages": [{"blocks": [
        {"type": 0, "lines": [{"spans": [{"text": "Heading", "size": 20}]}]},
        {"type": 0, "lines": [
            {"spans": [{"text": "Body one", "size": 11}]},
            {"spans": [{"text": "Body two", "size": 11}]}
        ]},
        {"type": 0, "lines": [{"spans": [{"text": "small print", "size": 7}]}]}
    ]}]}"#;

    #[test]
    fn test_sizetag_builder() {
        let builder = Sizetag::new()
            .lenient()
            .sequential()
            .granular()
            .largest_first()
            .headings_and_paragraphs_only();

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert!(!builder.parse_options.parallel);
        assert_eq!(builder.classify_options.granularity, Granularity::Fine);
        assert_eq!(builder.classify_options.heading_order, HeadingOrder::FromLargest);
        assert!(builder.classify_options.headings_and_paragraphs_only);
    }

    #[test]
    fn test_load_bytes_span_dump() {
        let doc = load_bytes(DUMP).unwrap();
        assert_eq!(doc.name(), "dump.json");
        assert_eq!(doc.span_count(), 4);
    }

    #[test]
    fn test_load_bytes_rejects_unknown() {
        assert!(matches!(load_bytes(b"plain text"), Err(Error::UnknownFormat)));
        assert!(matches!(load_bytes(&[]), Err(Error::UnknownFormat)));
        assert!(load_bytes(b"%PDF").is_err());
    }

    #[test]
    fn test_builder_outputs() {
        let result = Sizetag::new().classify_bytes(DUMP).unwrap();
        assert_eq!(
            result.to_tagged(),
            vec![
                "<h1>Heading</h1>",
                "<p>Body one\nBody two</p>",
                "<s1>small print</s1>"
            ]
        );
        assert_eq!(
            result.to_tagged_string(),
            "<h1>Heading</h1><p>Body oneBody two</p><s1>small print</s1>"
        );
        assert_eq!(
            result.to_text().unwrap(),
            "Heading. Body oneBody two. small print. "
        );
        assert_eq!(
            result.to_markdown(),
            "# Heading\n\nBody oneBody two\n\n*small print*"
        );
        assert!(result.to_json().unwrap().contains("\"document\": \"dump.json\""));
    }

    #[test]
    fn test_builder_drops_sub_paragraphs() {
        let result = Sizetag::new()
            .headings_and_paragraphs_only()
            .classify_bytes(DUMP)
            .unwrap();
        assert_eq!(result.elements().len(), 2);
    }

    #[test]
    fn test_load_reader() {
        let doc = load_reader(std::io::Cursor::new(DUMP)).unwrap();
        assert_eq!(doc.page_count(), 1);
    }
}
