//! Tagged markup rendering: `<h1>Title</h1><p>Body</p>`.

use super::LineJoin;
use crate::model::TaggedElement;

/// Render every element as markup, one string per element.
pub fn to_tagged(elements: &[TaggedElement]) -> Vec<String> {
    elements.iter().map(TaggedElement::markup).collect()
}

/// Join all elements into one markup string.
///
/// Line markers are joined per `join`, each element is trimmed, and the
/// results are concatenated without separators.
pub fn to_tagged_string(elements: &[TaggedElement], join: LineJoin) -> String {
    elements
        .iter()
        .map(|e| join.apply(&e.markup()).trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;

    fn elements() -> Vec<TaggedElement> {
        vec![
            TaggedElement::tagged(Tag::Heading(1), "Title"),
            TaggedElement::tagged(Tag::Paragraph, "first\nsecond"),
        ]
    }

    #[test]
    fn test_to_tagged() {
        assert_eq!(
            to_tagged(&elements()),
            vec!["<h1>Title</h1>", "<p>first\nsecond</p>"]
        );
    }

    #[test]
    fn test_to_tagged_string() {
        assert_eq!(
            to_tagged_string(&elements(), LineJoin::Remove),
            "<h1>Title</h1><p>firstsecond</p>"
        );
        assert_eq!(
            to_tagged_string(&elements(), LineJoin::Space),
            "<h1>Title</h1><p>first second</p>"
        );
        assert_eq!(to_tagged_string(&[], LineJoin::Remove), "");
    }
}
