//! Font usage statistics: how often each style occurs in a document.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::{Document, FontSize, Span};

/// How finely spans are told apart when counting styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Granularity {
    /// Group by font size only
    #[default]
    Coarse,
    /// Group by size, flags, font and color
    Fine,
}

/// Grouping key for frequency counting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum StyleKey {
    /// Size-only key
    Size(FontSize),
    /// Full style key
    Style {
        /// Font size
        size: FontSize,
        /// Style flags (0 if absent)
        flags: u32,
        /// Font identifier
        font: String,
        /// Fill color (0 if absent)
        color: u32,
    },
}

impl StyleKey {
    /// Derive the key for a span.
    pub fn from_span(span: &Span, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Coarse => StyleKey::Size(span.font_size()),
            Granularity::Fine => StyleKey::Style {
                size: span.font_size(),
                flags: span.flags.unwrap_or(0),
                font: span.font.clone(),
                color: span.color.unwrap_or(0),
            },
        }
    }

    /// The size component of the key.
    pub fn size(&self) -> FontSize {
        match self {
            StyleKey::Size(size) | StyleKey::Style { size, .. } => *size,
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKey::Size(size) => write!(f, "{}", size),
            StyleKey::Style {
                size,
                flags,
                font,
                color,
            } => write!(f, "{}_{}_{}_{}", size, flags, font, color),
        }
    }
}

/// Representative style attributes of a key (taken from its first span).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleAttributes {
    /// Font size in points
    pub size: f32,
    /// Font identifier
    pub font: String,
    /// Style flags
    pub flags: Option<u32>,
    /// Fill color
    pub color: Option<u32>,
}

impl From<&Span> for StyleAttributes {
    fn from(span: &Span) -> Self {
        Self {
            size: span.size,
            font: span.font.clone(),
            flags: span.flags,
            color: span.color,
        }
    }
}

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleCount {
    /// Grouping key
    pub key: StyleKey,
    /// Number of spans with this key
    pub count: usize,
    /// Representative attributes
    pub style: StyleAttributes,
}

/// Style frequencies of one document, most used first.
///
/// Rows are ordered by count descending, then size descending, then the
/// order in which styles were first seen.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyTable {
    document: String,
    granularity_fine: bool,
    counts: Vec<StyleCount>,
}

impl FrequencyTable {
    /// Document the table was built from.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Rows sorted most used first.
    pub fn counts(&self) -> &[StyleCount] {
        &self.counts
    }

    /// The most used style.
    pub fn most_common(&self) -> Option<&StyleCount> {
        self.counts.first()
    }

    /// Look up the count of a key.
    pub fn count_of(&self, key: &StyleKey) -> Option<usize> {
        self.counts.iter().find(|c| &c.key == key).map(|c| c.count)
    }

    /// Look up the attributes of a key.
    pub fn style_of(&self, key: &StyleKey) -> Option<&StyleAttributes> {
        self.counts.iter().find(|c| &c.key == key).map(|c| &c.style)
    }

    /// Distinct sizes across all keys, largest first.
    pub fn distinct_sizes(&self) -> Vec<FontSize> {
        let mut sizes: Vec<FontSize> = self.counts.iter().map(|c| c.key.size()).collect();
        sizes.sort_by(|a, b| b.cmp(a));
        sizes.dedup();
        sizes
    }

    /// Number of distinct styles.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no styles.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of spans counted.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Whether the keys carry the full style.
    pub fn is_fine(&self) -> bool {
        self.granularity_fine
    }
}

/// Incremental style counter.
#[derive(Debug, Clone)]
pub struct StyleCollector {
    granularity: Granularity,
    styles: IndexMap<StyleKey, (usize, StyleAttributes)>,
}

impl StyleCollector {
    /// Create a collector.
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            styles: IndexMap::new(),
        }
    }

    /// Count one span. Whitespace-only spans count too.
    pub fn add_span(&mut self, span: &Span) {
        let key = StyleKey::from_span(span, self.granularity);
        self.styles
            .entry(key)
            .or_insert_with(|| (0, StyleAttributes::from(span)))
            .0 += 1;
    }

    /// Count every span of every text block of a document.
    pub fn add_document(&mut self, doc: &Document) {
        for span in doc.spans() {
            self.add_span(span);
        }
    }

    /// Sort the counts and build the table.
    ///
    /// Fails with [`Error::NoStylesFound`] if nothing was counted.
    pub fn finish(self, document: &str) -> Result<FrequencyTable> {
        if self.styles.is_empty() {
            return Err(Error::NoStylesFound {
                document: document.to_string(),
            });
        }

        let mut counts: Vec<StyleCount> = self
            .styles
            .into_iter()
            .map(|(key, (count, style))| StyleCount { key, count, style })
            .collect();
        // Stable sort keeps first-encounter order as the last tie-break
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.key.size().cmp(&a.key.size()))
        });

        log::debug!(
            "{}: {} distinct style(s) over {} span(s)",
            document,
            counts.len(),
            counts.iter().map(|c| c.count).sum::<usize>()
        );

        Ok(FrequencyTable {
            document: document.to_string(),
            granularity_fine: self.granularity == Granularity::Fine,
            counts,
        })
    }
}

/// Count style usage across a document.
pub fn collect_styles(doc: &Document, granularity: Granularity) -> Result<FrequencyTable> {
    let mut collector = StyleCollector::new(granularity);
    collector.add_document(doc);
    collector.finish(doc.name())
}
