//! Document-level types.

use super::{Block, Page, Span};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identifier used in messages when a document has no source.
const UNNAMED_DOCUMENT: &str = "<memory>";

/// A paginated document as a tree of pages, blocks, lines and spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Where the document came from (file path or caller-chosen name)
    #[serde(default)]
    pub source: Option<String>,

    /// Pages in the document
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document source name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Identifier used in error messages and logs.
    pub fn name(&self) -> &str {
        self.source.as_deref().unwrap_or(UNNAMED_DOCUMENT)
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over every text block in document order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.text_blocks())
    }

    /// Iterate over every span of every text block in document order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.text_blocks().flat_map(|b| b.spans())
    }

    /// Total number of spans in text blocks.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(Page::span_count).sum()
    }

    /// Load a document from a JSON span dump.
    ///
    /// Accepts either `{"source": …, "pages": [...]}` or a bare array of
    /// pages. Fields the model does not know about are ignored, so the
    /// output of PyMuPDF's `page.get_text("dict")` loads unchanged.
    pub fn from_json(json: &str) -> Result<Self> {
        let json = json.trim_start_matches('\u{feff}').trim_start();
        let mut doc = if json.starts_with('[') {
            Document {
                source: None,
                pages: serde_json::from_str(json)?,
            }
        } else {
            serde_json::from_str::<Document>(json)?
        };
        doc.number_pages();
        doc.sanitize();
        Ok(doc)
    }

    /// Serialize the document tree to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Drop spans whose size cannot take part in statistics.
    ///
    /// Returns the number of spans removed.
    pub fn sanitize(&mut self) -> usize {
        let mut dropped = 0;
        for page in &mut self.pages {
            for block in &mut page.blocks {
                for line in &mut block.lines {
                    let before = line.spans.len();
                    line.spans.retain(Span::is_valid);
                    dropped += before - line.spans.len();
                }
            }
        }

        if dropped > 0 {
            log::warn!(
                "{}: dropped {} span(s) with invalid font size",
                self.name(),
                dropped
            );
        }
        dropped
    }

    /// Assign 1-based numbers to pages that came without one.
    fn number_pages(&mut self) {
        for (index, page) in self.pages.iter_mut().enumerate() {
            if page.number == 0 {
                page.number = index as u32 + 1;
            }
        }
    }
}
