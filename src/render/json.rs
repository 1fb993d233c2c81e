//! JSON rendering for classification results.

use serde::Serialize;

use crate::classify::{Classification, SizeTag, StyleCount};
use crate::error::{Error, Result};
use crate::model::TaggedElement;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct Summary {
    headings: usize,
    paragraphs: usize,
    sub_paragraphs: usize,
}

#[derive(Serialize)]
struct ClassificationView<'a> {
    document: &'a str,
    paragraph_size: f32,
    summary: Summary,
    tags: Vec<SizeTag>,
    styles: &'a [StyleCount],
    elements: &'a [TaggedElement],
}

impl<'a> From<&'a Classification> for ClassificationView<'a> {
    fn from(c: &'a Classification) -> Self {
        Self {
            document: &c.document,
            paragraph_size: c.tags.paragraph_size().value(),
            summary: Summary {
                headings: c.heading_count(),
                paragraphs: c.paragraph_count(),
                sub_paragraphs: c.sub_paragraph_count(),
            },
            tags: c.tags.entries(),
            styles: c.frequencies.counts(),
            elements: &c.elements,
        }
    }
}

/// Convert a classification to JSON.
pub fn to_json(classification: &Classification, format: JsonFormat) -> Result<String> {
    let view = ClassificationView::from(classification);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&view),
        JsonFormat::Compact => serde_json::to_string(&view),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
