//! Loading of JSON span dumps.

use std::path::Path;

use super::options::ParseOptions;
use crate::error::Result;
use crate::model::Document;

/// Load a span dump from a string, keeping only the selected pages.
pub fn parse_json_str(json: &str, options: &ParseOptions) -> Result<Document> {
    let mut doc = Document::from_json(json)?;
    options.pages.validate(doc.page_count())?;
    doc.pages.retain(|p| options.pages.includes(p.number));
    Ok(doc)
}

/// Load a span dump from a file. The file path becomes the document source
/// unless the dump names one itself.
pub fn parse_json_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Document> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let mut doc = parse_json_str(&json, options)?;
    if doc.source.is_none() {
        doc.source = Some(path.display().to_string());
    }
    Ok(doc)
}
