//! Plain text rendering.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::{to_tagged_string, RenderOptions};
use crate::error::{Error, Result};
use crate::model::TaggedElement;

/// Strips markup from joined tagged text.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    options: RenderOptions,
    closing_tag: Regex,
    opening_tag: Regex,
}

impl TextRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Result<Self> {
        Ok(Self {
            options,
            closing_tag: compile(r"</[a-z]([0-9]+)?>")?,
            opening_tag: compile(r"<[a-z]([0-9]+)?>")?,
        })
    }

    /// Render elements as one plain text string.
    pub fn render(&self, elements: &[TaggedElement]) -> String {
        let joined = to_tagged_string(elements, self.options.line_join);
        self.strip(&joined)
    }

    /// Turn closing tags into sentence breaks and drop opening tags.
    pub fn strip(&self, markup: &str) -> String {
        let text = self.closing_tag.replace_all(markup, ". ");
        let text = self.opening_tag.replace_all(&text, "");

        let text: String = if self.options.fold_diacritics {
            text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
        } else {
            text.into_owned()
        };

        if self.options.ascii_only {
            text.chars().filter(char::is_ascii).collect()
        } else {
            text
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Render(format!("invalid pattern {}: {}", pattern, e)))
}

/// Convert tagged elements to plain text.
pub fn to_text(elements: &[TaggedElement], options: &RenderOptions) -> Result<String> {
    Ok(TextRenderer::new(options.clone())?.render(elements))
}
