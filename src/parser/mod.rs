//! Document loading: PDF parsing and JSON span dumps.

mod backend;
mod content;
mod json;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{
    decode_content, decode_text, decode_text_simple, ContentOp, FontInfo, FontMap, LopdfBackend,
    PageId, PdfBackend, PdfValue,
};
pub use content::{extract_spans, ContentInterpreter, PositionedSpan};
pub use json::{parse_json_file, parse_json_str};
pub use layout::{LayoutAnalyzer, TextLine};
pub use options::{ErrorMode, PageSelection, ParseOptions, DEFAULT_BLOCK_GAP_FACTOR};
pub use pdf_parser::PdfParser;
