//! Font-size based structure classification.
//!
//! Classification runs in three passes over a [`Document`]:
//!
//! 1. [`collect_styles`] counts how often every style is used.
//! 2. [`SizeTagMap::from_frequencies`] picks the most used size as the
//!    paragraph baseline and ranks every other size as a heading (above)
//!    or a sub-paragraph (below).
//! 3. [`BlockMerger`] walks the spans again and merges runs of equal size
//!    into [`TaggedElement`]s.
//!
//! Each document gets its own independent run; nothing is shared.

mod merger;
mod stats;
mod tags;

pub use merger::{filter_elements, merge_document, BlockMerger};
pub use stats::{
    collect_styles, FrequencyTable, Granularity, StyleAttributes, StyleCollector, StyleCount,
    StyleKey,
};
pub use tags::{HeadingOrder, SizeTag, SizeTagMap};

use crate::error::Result;
use crate::model::{Document, TaggedElement};
use serde::Serialize;

/// Options for a classification run.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// How styles are grouped when counting
    pub granularity: Granularity,

    /// How heading ranks are numbered
    pub heading_order: HeadingOrder,

    /// Drop sub-paragraph elements from the output
    pub headings_and_paragraphs_only: bool,
}

impl ClassifyOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grouping granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Count styles by size, flags, font and color.
    pub fn granular(mut self) -> Self {
        self.granularity = Granularity::Fine;
        self
    }

    /// Set the heading numbering.
    pub fn with_heading_order(mut self, order: HeadingOrder) -> Self {
        self.heading_order = order;
        self
    }

    /// Keep only headings and paragraphs.
    pub fn headings_and_paragraphs_only(mut self) -> Self {
        self.headings_and_paragraphs_only = true;
        self
    }
}

/// Everything a classification run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    /// Document identifier
    pub document: String,

    /// Style frequencies
    pub frequencies: FrequencyTable,

    /// Size to tag assignment
    #[serde(serialize_with = "serialize_tags")]
    pub tags: SizeTagMap,

    /// Filtered elements in document order
    pub elements: Vec<TaggedElement>,
}

fn serialize_tags<S: serde::Serializer>(
    tags: &SizeTagMap,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    tags.entries().serialize(serializer)
}

impl Classification {
    /// Number of heading elements.
    pub fn heading_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_heading()).count()
    }

    /// Number of paragraph elements.
    pub fn paragraph_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_paragraph()).count()
    }

    /// Number of sub-paragraph elements.
    pub fn sub_paragraph_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_sub_paragraph()).count()
    }
}

/// Run all three passes over a document.
pub fn classify(doc: &Document, options: &ClassifyOptions) -> Result<Classification> {
    let frequencies = collect_styles(doc, options.granularity)?;
    let tags = SizeTagMap::from_frequencies(&frequencies, options.heading_order)?;
    let raw = merge_document(doc, &tags)?;
    let elements = filter_elements(raw, options.headings_and_paragraphs_only);

    log::debug!("{}: {} element(s) after filtering", doc.name(), elements.len());

    Ok(Classification {
        document: doc.name().to_string(),
        frequencies,
        tags,
        elements,
    })
}

/// Classify a document and return its filtered tagged elements.
///
/// With `remove_sub_tags` set, only headings and paragraphs are kept.
pub fn extract_headers_paragraphs(
    doc: &Document,
    remove_sub_tags: bool,
) -> Result<Vec<TaggedElement>> {
    let mut options = ClassifyOptions::default();
    options.headings_and_paragraphs_only = remove_sub_tags;
    Ok(classify(doc, &options)?.elements)
}
