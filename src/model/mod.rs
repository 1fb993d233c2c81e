//! Document model types.
//!
//! The input side is a fixed-shape tree of pages, blocks, lines and styled
//! spans, the same shape PDF text extractors hand out. The output side is
//! the sequence of tagged elements produced by the classifier.

mod document;
mod element;
mod page;
mod span;

pub use document::Document;
pub use element::{ElementKind, Tag, TaggedElement};
pub use page::{Block, BlockKind, Line, Page};
pub use span::{flags, flags_from_font_name, FontSize, Span};
