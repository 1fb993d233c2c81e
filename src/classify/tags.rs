//! Size to tag assignment.

use serde::Serialize;
use std::collections::BTreeMap;

use super::stats::FrequencyTable;
use crate::error::{Error, Result};
use crate::model::{FontSize, Tag};

/// How heading ranks are numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingOrder {
    /// The size just above the paragraph size is `h1`, the next one up `h2`
    #[default]
    FromBaseline,
    /// The largest size is `h1`, counting down towards the paragraph size
    FromLargest,
}

/// One row of a [`SizeTagMap`], for display and serialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeTag {
    /// Font size in points
    pub size: f32,
    /// Assigned tag
    pub tag: Tag,
}

/// Mapping from every font size in a document to its structural tag.
///
/// Exactly one size maps to [`Tag::Paragraph`]. Sub-paragraph ranks start
/// at 1 right below the paragraph size and grow with distance from it.
#[derive(Debug, Clone)]
pub struct SizeTagMap {
    paragraph_size: FontSize,
    tags: BTreeMap<FontSize, Tag>,
}

impl SizeTagMap {
    /// Assign tags from a frequency table.
    ///
    /// The paragraph size is the size of the most used style.
    pub fn from_frequencies(table: &FrequencyTable, order: HeadingOrder) -> Result<Self> {
        let top = table.most_common().ok_or_else(|| Error::NoStylesFound {
            document: table.document().to_string(),
        })?;
        let paragraph_size = top.key.size();
        let sizes = table.distinct_sizes();

        let mut above: Vec<FontSize> = sizes
            .iter()
            .copied()
            .filter(|s| *s > paragraph_size)
            .collect();
        // `sizes` is largest first; walk headings outward from the baseline
        if order == HeadingOrder::FromBaseline {
            above.reverse();
        }
        let below = sizes.iter().copied().filter(|s| *s < paragraph_size);

        let mut tags = BTreeMap::new();
        tags.insert(paragraph_size, Tag::Paragraph);
        for (rank, size) in above.into_iter().enumerate() {
            tags.insert(size, Tag::Heading(rank as u32 + 1));
        }
        for (rank, size) in below.enumerate() {
            tags.insert(size, Tag::Sub(rank as u32 + 1));
        }

        log::debug!(
            "{}: paragraph size {}, {} size(s) tagged",
            table.document(),
            paragraph_size,
            tags.len()
        );

        Ok(Self {
            paragraph_size,
            tags,
        })
    }

    /// The paragraph (body text) size.
    pub fn paragraph_size(&self) -> FontSize {
        self.paragraph_size
    }

    /// Tag for a size, if the size was seen.
    pub fn get(&self, size: FontSize) -> Option<Tag> {
        self.tags.get(&size).copied()
    }

    /// Tag for a size, failing with [`Error::TagLookupMiss`] if it is unknown.
    pub fn lookup(&self, size: FontSize, document: &str) -> Result<Tag> {
        self.get(size).ok_or_else(|| Error::TagLookupMiss {
            document: document.to_string(),
            size: size.value(),
        })
    }

    /// Rows ordered largest size first.
    pub fn entries(&self) -> Vec<SizeTag> {
        self.tags
            .iter()
            .rev()
            .map(|(size, tag)| SizeTag {
                size: size.value(),
                tag: *tag,
            })
            .collect()
    }

    /// Number of heading levels.
    pub fn heading_count(&self) -> usize {
        self.tags
            .values()
            .filter(|t| matches!(t, Tag::Heading(_)))
            .count()
    }

    /// Number of sub-paragraph levels.
    pub fn sub_count(&self) -> usize {
        self.tags
            .values()
            .filter(|t| matches!(t, Tag::Sub(_)))
            .count()
    }

    /// Number of sizes in the map.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the map is empty (never true for a built map).
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
