//! Page-level types: pages, parser blocks and lines.

use super::Span;
use serde::{Deserialize, Serialize};

/// A single page in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed, 0 if unknown)
    #[serde(default)]
    pub number: u32,

    /// Page width in points (1 point = 1/72 inch)
    #[serde(default)]
    pub width: f32,

    /// Page height in points
    #[serde(default)]
    pub height: f32,

    /// Blocks on the page, in reading order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterate over the text blocks only.
    pub fn text_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_text())
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of spans in the text blocks of this page.
    pub fn span_count(&self) -> usize {
        self.text_blocks().map(Block::span_count).sum()
    }
}

/// Kind of a parser block.
///
/// Serialized as the integer discriminator PyMuPDF uses (`0` = text,
/// `1` = image). Any other discriminator is kept as [`BlockKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum BlockKind {
    /// Block carrying text lines
    #[default]
    Text,
    /// Image block; contributes nothing to classification
    Image,
    /// Any other block type (vector drawings and the like); skipped
    Other(u8),
}

impl From<u8> for BlockKind {
    fn from(value: u8) -> Self {
        match value {
            0 => BlockKind::Text,
            1 => BlockKind::Image,
            other => BlockKind::Other(other),
        }
    }
}

impl From<BlockKind> for u8 {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Text => 0,
            BlockKind::Image => 1,
            BlockKind::Other(value) => value,
        }
    }
}

/// A parser-level block: a group of lines that may hold several sizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    /// Block kind
    #[serde(rename = "type", default)]
    pub kind: BlockKind,

    /// Lines of the block (empty for image blocks)
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a text block from lines.
    pub fn text(lines: Vec<Line>) -> Self {
        Self {
            kind: BlockKind::Text,
            lines,
        }
    }

    /// Create an image block.
    pub fn image() -> Self {
        Self {
            kind: BlockKind::Image,
            lines: Vec::new(),
        }
    }

    /// Check if this block carries text.
    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        self.kind == BlockKind::Image
    }

    /// Iterate over every span of the block in line order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Number of spans in the block.
    pub fn span_count(&self) -> usize {
        self.lines.iter().map(|l| l.spans.len()).sum()
    }
}

/// A line of spans sharing a baseline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    /// Spans in content order
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Concatenated text of the line.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}
