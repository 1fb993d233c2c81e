//! Markdown rendering for tagged elements.

use crate::model::{ElementKind, TaggedElement};

use super::RenderOptions;

/// Convert tagged elements to Markdown.
pub fn to_markdown(elements: &[TaggedElement], options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(elements)
}

/// Markdown renderer.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render elements, one Markdown block per element.
    pub fn render(&self, elements: &[TaggedElement]) -> String {
        let blocks: Vec<String> = elements
            .iter()
            .filter_map(|e| self.render_element(e))
            .collect();
        blocks.join("\n\n")
    }

    /// Render a single element. Placeholders and blank elements render as nothing.
    pub fn render_element(&self, element: &TaggedElement) -> Option<String> {
        let text = self.options.line_join.apply(&element.text);
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        match element.kind {
            ElementKind::Heading(level) => {
                let level = level.clamp(1, u32::from(self.options.max_heading_level));
                Some(format!("{} {}", "#".repeat(level as usize), text))
            }
            ElementKind::Paragraph => Some(text.to_string()),
            ElementKind::SubParagraph(_) => Some(format!("*{}*", text)),
            ElementKind::Unclosed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;
    use crate::render::LineJoin;

    #[test]
    fn test_to_markdown() {
        let elements = vec![
            TaggedElement::tagged(Tag::Heading(1), "Title"),
            TaggedElement::tagged(Tag::Paragraph, "Body "),
            TaggedElement::tagged(Tag::Sub(1), "footnote"),
            TaggedElement::placeholder("\n\n"),
        ];

        let md = to_markdown(&elements, &RenderOptions::default());
        assert_eq!(md, "# Title\n\nBody\n\n*footnote*");
    }

    #[test]
    fn test_heading_level_capped() {
        let elements = vec![TaggedElement::tagged(Tag::Heading(9), "Deep")];

        let md = to_markdown(&elements, &RenderOptions::default());
        assert_eq!(md, "###### Deep");

        let md = to_markdown(&elements, &RenderOptions::new().with_max_heading(2));
        assert_eq!(md, "## Deep");
    }

    #[test]
    fn test_line_join_space() {
        let elements = vec![TaggedElement::tagged(Tag::Paragraph, "one\ntwo")];
        let options = RenderOptions::new().with_line_join(LineJoin::Space);
        assert_eq!(to_markdown(&elements, &options), "one two");
    }
}
