//! Integration tests for the classification pipeline.

use sizetag::classify::{collect_styles, extract_headers_paragraphs, merge_document, Granularity};
use sizetag::model::{Block, Document, FontSize, Line, Page, Span, Tag, TaggedElement};
use sizetag::{classify, ClassifyOptions, Error, HeadingOrder, SizeTagMap};

fn span(text: &str, size: f32) -> Span {
    Span::new(text, size, "Helvetica")
}

fn document(source: &str, blocks: Vec<Vec<Vec<Span>>>) -> Document {
    let mut page = Page::letter(1);
    for lines in blocks {
        page.add_block(Block::text(lines.into_iter().map(Line::new).collect()));
    }
    let mut doc = Document::new().with_source(source);
    doc.add_page(page);
    doc
}

fn markup(elements: &[TaggedElement]) -> Vec<String> {
    elements.iter().map(TaggedElement::markup).collect()
}

#[test]
fn test_size_change_inside_line() {
    let doc = document(
        "a.pdf",
        vec![vec![vec![
            span("intro ", 12.0),
            span("text", 12.0),
            span("Title", 18.0),
            span("body", 12.0),
        ]]],
    );

    let elements = extract_headers_paragraphs(&doc, false).unwrap();
    assert_eq!(
        markup(&elements),
        vec!["<p>intro text</p>", "<h1>Title</h1>", "<p>body</p>"]
    );
}

#[test]
fn test_whitespace_block_filtered() {
    let doc = document(
        "b.pdf",
        vec![
            vec![vec![span("Body", 10.0)]],
            vec![vec![span("  ", 10.0)], vec![span("\n", 10.0)]],
            vec![vec![span("More body", 10.0)]],
        ],
    );

    let tags = SizeTagMap::from_frequencies(
        &collect_styles(&doc, Granularity::Coarse).unwrap(),
        HeadingOrder::default(),
    )
    .unwrap();
    let raw = merge_document(&doc, &tags).unwrap();
    assert_eq!(raw[1], TaggedElement::placeholder("\n\n"));

    let elements = extract_headers_paragraphs(&doc, false).unwrap();
    assert_eq!(markup(&elements), vec!["<p>Body</p>", "<p>More body</p>"]);
}

#[test]
fn test_sub_paragraphs_dropped_on_request() {
    let doc = document(
        "c.pdf",
        vec![
            vec![vec![span("Heading", 16.0)]],
            vec![vec![span("First", 11.0)], vec![span("Second", 11.0)]],
            vec![vec![span("footnote", 8.0)]],
        ],
    );

    let all = extract_headers_paragraphs(&doc, false).unwrap();
    assert!(markup(&all).contains(&"<s1>footnote</s1>".to_string()));

    let kept = extract_headers_paragraphs(&doc, true).unwrap();
    assert_eq!(
        markup(&kept),
        vec!["<h1>Heading</h1>", "<p>First\nSecond</p>"]
    );
}

#[test]
fn test_classification_is_deterministic() {
    let doc = document(
        "d.pdf",
        vec![
            vec![vec![span("A", 14.0)], vec![span("b", 10.0)]],
            vec![vec![span("c", 10.0), span("d", 6.0)]],
            vec![vec![span("E", 20.0)], vec![span("f", 10.0)]],
        ],
    );
    let options = ClassifyOptions::default();

    let first = classify(&doc, &options).unwrap();
    let second = classify(&doc, &options).unwrap();
    assert_eq!(first.elements, second.elements);
    assert_eq!(first.tags.entries(), second.tags.entries());
}

#[test]
fn test_single_line_document() {
    let doc = document("e.pdf", vec![vec![vec![span("Only line ", 9.0)]]]);

    let elements = extract_headers_paragraphs(&doc, false).unwrap();
    assert_eq!(elements, vec![TaggedElement::tagged(Tag::Paragraph, "Only line")]);
}

#[test]
fn test_single_size_has_no_headings() {
    let doc = document(
        "f.pdf",
        vec![
            vec![vec![span("one", 11.0)]],
            vec![vec![span("two", 11.0)]],
        ],
    );

    let result = classify(&doc, &ClassifyOptions::default()).unwrap();
    assert_eq!(result.tags.len(), 1);
    assert_eq!(result.heading_count(), 0);
    assert_eq!(result.paragraph_count(), 2);
}

#[test]
fn test_heading_orders() {
    let doc = document(
        "g.pdf",
        vec![
            vec![vec![span("Big", 24.0)]],
            vec![vec![span("Mid", 16.0)]],
            vec![
                vec![span("p1", 10.0)],
                vec![span("p2", 10.0)],
                vec![span("p3", 10.0)],
            ],
        ],
    );

    let baseline = classify(&doc, &ClassifyOptions::default()).unwrap();
    assert_eq!(baseline.elements[0].tag(), Some(Tag::Heading(2)));
    assert_eq!(baseline.elements[1].tag(), Some(Tag::Heading(1)));

    let largest = classify(
        &doc,
        &ClassifyOptions::new().with_heading_order(HeadingOrder::FromLargest),
    )
    .unwrap();
    assert_eq!(largest.elements[0].tag(), Some(Tag::Heading(1)));
    assert_eq!(largest.elements[1].tag(), Some(Tag::Heading(2)));
}

#[test]
fn test_tie_prefers_larger_size() {
    let doc = document(
        "h.pdf",
        vec![
            vec![vec![span("small", 9.0)], vec![span("small", 9.0)]],
            vec![vec![span("large", 12.0)], vec![span("large", 12.0)]],
        ],
    );

    let result = classify(&doc, &ClassifyOptions::default()).unwrap();
    assert_eq!(result.tags.paragraph_size().value(), 12.0);
    assert_eq!(result.tags.get(FontSize::new(9.0)), Some(Tag::Sub(1)));
}

#[test]
fn test_stale_map_reports_lookup_miss() {
    let known = document("known.pdf", vec![vec![vec![span("x", 12.0)]]]);
    let other = document("other.pdf", vec![vec![vec![span("y", 13.0)]]]);

    let tags = SizeTagMap::from_frequencies(
        &collect_styles(&known, Granularity::Coarse).unwrap(),
        HeadingOrder::default(),
    )
    .unwrap();

    let err = merge_document(&other, &tags).unwrap_err();
    match err {
        Error::TagLookupMiss { document, size } => {
            assert_eq!(document, "other.pdf");
            assert_eq!(size, 13.0);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_empty_document_has_no_styles() {
    let doc = document("empty.pdf", vec![]);
    let err = classify(&doc, &ClassifyOptions::default()).unwrap_err();
    assert!(matches!(err, Error::NoStylesFound { ref document } if document == "empty.pdf"));
}

#[test]
fn test_granular_counts_split_fonts() {
    let doc = document(
        "i.pdf",
        vec![vec![
            vec![Span::new("a", 10.0, "Times")],
            vec![Span::new("b", 10.0, "Times")],
            vec![Span::new("c", 10.0, "Arial")],
        ]],
    );

    let coarse = classify(&doc, &ClassifyOptions::default()).unwrap();
    assert_eq!(coarse.frequencies.len(), 1);

    let fine = classify(&doc, &ClassifyOptions::new().granular()).unwrap();
    assert_eq!(fine.frequencies.len(), 2);
    assert_eq!(fine.frequencies.counts()[0].count, 2);
    assert_eq!(fine.tags.paragraph_size().value(), 10.0);
}

#[test]
fn test_span_dump_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(
        &path,
        r#"[{"blocks": [
            {"type": 0, "lines": [{"spans": [{"text": "Report", "size": 18, "font": "Helvetica-Bold"}]}]},
            {"type": 1},
            {"type": 0, "lines": [
                {"spans": [{"text": "Findings", "size": 11}]},
                {"spans": [{"text": "follow.", "size": 11}]}
            ]}
        ]}]"#,
    )
    .unwrap();

    let elements = sizetag::extract_headers_paragraphs(&path, true).unwrap();
    assert_eq!(
        markup(&elements),
        vec!["<h1>Report</h1>", "<p>Findings\nfollow.</p>"]
    );

    let text = sizetag::extract_text(&path).unwrap();
    assert_eq!(text, "Report. Findingsfollow.. ");
}
