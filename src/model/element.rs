//! Structural tags and the tagged elements produced by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A structural tag assigned to a font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tag {
    /// Body text (`p`)
    Paragraph,
    /// Heading above the paragraph size (`h1`, `h2`, …)
    Heading(u32),
    /// Text below the paragraph size (`s1`, `s2`, …)
    Sub(u32),
}

impl Tag {
    /// Tag name without delimiters (e.g., "h2").
    pub fn name(&self) -> String {
        match self {
            Tag::Paragraph => "p".to_string(),
            Tag::Heading(level) => format!("h{}", level),
            Tag::Sub(level) => format!("s{}", level),
        }
    }

    /// Opening tag (e.g., "<h2>").
    pub fn open(&self) -> String {
        format!("<{}>", self.name())
    }

    /// Closing tag (e.g., "</h2>").
    pub fn close(&self) -> String {
        format!("</{}>", self.name())
    }

    /// Rank distance from the paragraph size (0 for paragraphs).
    pub fn level(&self) -> u32 {
        match self {
            Tag::Paragraph => 0,
            Tag::Heading(level) | Tag::Sub(level) => *level,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('<').trim_end_matches('>');
        if s == "p" {
            return Ok(Tag::Paragraph);
        }

        let level = |digits: &str| {
            digits
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("invalid tag: {}", s))
        };

        if let Some(digits) = s.strip_prefix('h') {
            level(digits).map(Tag::Heading)
        } else if let Some(digits) = s.strip_prefix('s') {
            level(digits).map(Tag::Sub)
        } else {
            Err(format!("invalid tag: {}", s))
        }
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.name()
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// What a merged element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum ElementKind {
    /// Heading at the given rank
    Heading(u32),
    /// Body paragraph
    Paragraph,
    /// Sub-paragraph text at the given rank
    SubParagraph(u32),
    /// Placeholder holding only line markers; never tagged
    Unclosed,
}

impl ElementKind {
    /// The tag for this kind, if it is tagged at all.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            ElementKind::Heading(level) => Some(Tag::Heading(*level)),
            ElementKind::Paragraph => Some(Tag::Paragraph),
            ElementKind::SubParagraph(level) => Some(Tag::Sub(*level)),
            ElementKind::Unclosed => None,
        }
    }
}

impl From<Tag> for ElementKind {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Paragraph => ElementKind::Paragraph,
            Tag::Heading(level) => ElementKind::Heading(level),
            Tag::Sub(level) => ElementKind::SubParagraph(level),
        }
    }
}

/// A finalized logical block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedElement {
    /// Element kind
    #[serde(flatten)]
    pub kind: ElementKind,

    /// Text between the tags; may contain `\n` line markers
    pub text: String,
}

impl TaggedElement {
    /// Create a tagged element.
    pub fn tagged(tag: Tag, text: impl Into<String>) -> Self {
        Self {
            kind: tag.into(),
            text: text.into(),
        }
    }

    /// Create an unclosed placeholder.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Unclosed,
            text: text.into(),
        }
    }

    /// The element's tag, if any.
    pub fn tag(&self) -> Option<Tag> {
        self.kind.tag()
    }

    /// Render as markup: `<h1>Title</h1>`, or the raw text for placeholders.
    pub fn markup(&self) -> String {
        match self.tag() {
            Some(tag) => format!("{}{}{}", tag.open(), self.text, tag.close()),
            None => self.text.clone(),
        }
    }

    /// Whether the rendered markup would be empty.
    pub fn is_empty(&self) -> bool {
        self.kind == ElementKind::Unclosed && self.text.is_empty()
    }

    /// Whether this element carries a tag.
    pub fn is_tagged(&self) -> bool {
        self.kind != ElementKind::Unclosed
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ElementKind::Heading(_))
    }

    /// Check if this is a body paragraph.
    pub fn is_paragraph(&self) -> bool {
        self.kind == ElementKind::Paragraph
    }

    /// Check if this is sub-paragraph text.
    pub fn is_sub_paragraph(&self) -> bool {
        matches!(self.kind, ElementKind::SubParagraph(_))
    }
}

impl fmt::Display for TaggedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(Tag::Paragraph.open(), "<p>");
        assert_eq!(Tag::Heading(2).close(), "</h2>");
        assert_eq!(Tag::Sub(1).to_string(), "s1");
        assert_eq!(Tag::Sub(3).level(), 3);
    }

    #[test]
    fn test_tag_parse() {
        assert_eq!("p".parse::<Tag>(), Ok(Tag::Paragraph));
        assert_eq!("<h3>".parse::<Tag>(), Ok(Tag::Heading(3)));
        assert_eq!("s12".parse::<Tag>(), Ok(Tag::Sub(12)));
        assert!("h0".parse::<Tag>().is_err());
        assert!("x1".parse::<Tag>().is_err());
        assert!("".parse::<Tag>().is_err());
    }

    #[test]
    fn test_element_markup() {
        let h = TaggedElement::tagged(Tag::Heading(1), "Title");
        assert_eq!(h.markup(), "<h1>Title</h1>");
        assert!(h.is_heading());

        let placeholder = TaggedElement::placeholder("\n\n");
        assert_eq!(placeholder.markup(), "\n\n");
        assert!(!placeholder.is_tagged());
        assert!(!placeholder.is_empty());
        assert!(TaggedElement::placeholder("").is_empty());
    }

    #[test]
    fn test_element_json() {
        let element = TaggedElement::tagged(Tag::Sub(2), "note");
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(value["kind"], "sub_paragraph");
        assert_eq!(value["level"], 2);
        assert_eq!(value["text"], "note");

        let paragraph = TaggedElement::tagged(Tag::Paragraph, "body");
        let value = serde_json::to_value(&paragraph).unwrap();
        assert_eq!(value["kind"], "paragraph");
        assert!(value.get("level").is_none());
    }
}
