//! Streaming merge of same-size spans into tagged elements.

use super::tags::SizeTagMap;
use crate::error::Result;
use crate::model::{Block, Document, FontSize, Span, Tag, TaggedElement};

/// Line marker appended after every line of a text block.
const LINE_MARKER: char = '\n';

/// Text collected for the element currently being built.
#[derive(Debug, Clone, PartialEq)]
enum Accumulator {
    /// Nothing but line markers so far (possibly none)
    Markers(usize),
    /// An opened element
    Open { tag: Tag, body: String },
}

impl Default for Accumulator {
    fn default() -> Self {
        Accumulator::Markers(0)
    }
}

impl Accumulator {
    fn open(tag: Tag, text: &str) -> Self {
        Accumulator::Open {
            tag,
            body: text.to_string(),
        }
    }

    /// Close into an element: markers stay an unclosed placeholder, an open
    /// element loses its trailing whitespace and gets its closing tag.
    fn into_element(self) -> TaggedElement {
        match self {
            Accumulator::Markers(n) => {
                TaggedElement::placeholder(LINE_MARKER.to_string().repeat(n))
            }
            Accumulator::Open { tag, body } => TaggedElement::tagged(tag, body.trim_end()),
        }
    }
}

/// Walks spans in document order and merges runs of equal size.
///
/// State invariants:
/// - `current` starts empty for every text block.
/// - `previous` is the size of the last non-blank span. It is carried across
///   block and page boundaries and only replaced by a later non-blank span.
///   `None` means no non-blank span has been seen yet.
#[derive(Debug)]
pub struct BlockMerger<'a> {
    tags: &'a SizeTagMap,
    document: String,
    previous: Option<FontSize>,
    current: Accumulator,
    elements: Vec<TaggedElement>,
}

impl<'a> BlockMerger<'a> {
    /// Create a merger reading tags from `tags`.
    pub fn new(tags: &'a SizeTagMap, document: impl Into<String>) -> Self {
        Self {
            tags,
            document: document.into(),
            previous: None,
            current: Accumulator::default(),
            elements: Vec::new(),
        }
    }

    /// Forget all state and collected elements.
    pub fn reset(&mut self) {
        self.previous = None;
        self.current = Accumulator::default();
        self.elements.clear();
    }

    /// Feed one span. Blank spans only matter through [`end_line`](Self::end_line).
    pub fn push_span(&mut self, span: &Span) -> Result<()> {
        if span.is_blank() {
            return Ok(());
        }

        let size = span.font_size();
        let tag = self.tags.lookup(size, &self.document)?;

        match self.previous {
            Some(previous) if previous == size => {
                if let Accumulator::Open { body, .. } = &mut self.current {
                    body.push_str(&span.text);
                } else {
                    self.current = Accumulator::open(tag, &span.text);
                }
            }
            Some(_) => {
                let opened = Accumulator::open(tag, &span.text);
                let finished = std::mem::replace(&mut self.current, opened);
                self.elements.push(finished.into_element());
            }
            None => self.current = Accumulator::open(tag, &span.text),
        }

        self.previous = Some(size);
        Ok(())
    }

    /// Mark the end of a line.
    pub fn end_line(&mut self) {
        match &mut self.current {
            Accumulator::Markers(n) => *n += 1,
            Accumulator::Open { body, .. } => body.push(LINE_MARKER),
        }
    }

    /// Mark the end of a text block and emit what it collected.
    pub fn end_block(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.elements.push(finished.into_element());
    }

    /// Merge one parser block. Non-text blocks are skipped.
    pub fn merge_block(&mut self, block: &Block) -> Result<()> {
        if !block.is_text() {
            return Ok(());
        }

        self.current = Accumulator::default();
        for line in &block.lines {
            for span in &line.spans {
                self.push_span(span)?;
            }
            self.end_line();
        }
        self.end_block();
        Ok(())
    }

    /// Merge every block of a document in order.
    pub fn merge_document(&mut self, doc: &Document) -> Result<()> {
        for page in &doc.pages {
            for block in &page.blocks {
                self.merge_block(block)?;
            }
        }
        Ok(())
    }

    /// Elements emitted so far.
    pub fn elements(&self) -> &[TaggedElement] {
        &self.elements
    }

    /// Finish the pass and hand out the raw element sequence.
    ///
    /// A block still open (when driven span by span) is emitted first.
    pub fn finish(mut self) -> Vec<TaggedElement> {
        if self.current != Accumulator::default() {
            self.end_block();
        }
        self.elements
    }
}

/// Drop placeholders and, optionally, sub-paragraph elements.
pub fn filter_elements(elements: Vec<TaggedElement>, drop_sub: bool) -> Vec<TaggedElement> {
    elements
        .into_iter()
        .filter(|e| !e.is_empty())
        .filter(TaggedElement::is_tagged)
        .filter(|e| !(drop_sub && e.is_sub_paragraph()))
        .collect()
}

/// Merge a whole document into raw (unfiltered) elements.
pub fn merge_document(doc: &Document, tags: &SizeTagMap) -> Result<Vec<TaggedElement>> {
    let mut merger = BlockMerger::new(tags, doc.name());
    merger.merge_document(doc)?;
    Ok(merger.finish())
}
