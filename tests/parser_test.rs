//! Integration tests for PDF loading, built on PDFs generated with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, Stream};

use sizetag::{
    load_bytes, load_bytes_with_options, load_file, ClassifyOptions, Error, PageSelection,
    ParseOptions, PdfParser, Sizetag,
};

/// One text run: font size, x, y, text.
type Run = (i64, i64, i64, &'static str);

fn page_content(runs: &[Run]) -> Vec<u8> {
    let mut operations = Vec::new();
    for &(size, x, y, text) in runs {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
        operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }.encode().unwrap()
}

fn build_pdf(pages: &[Vec<u8>]) -> Vec<u8> {
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for content in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.clone()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn report_pdf() -> Vec<u8> {
    build_pdf(&[
        page_content(&[
            (24, 72, 700, "Title"),
            (12, 72, 650, "Body one"),
            (12, 72, 636, "Body two"),
            (12, 72, 622, "Body three"),
        ]),
        page_content(&[(12, 72, 700, "Second page"), (8, 72, 60, "footer")]),
    ])
}

#[test]
fn test_parse_generated_pdf() {
    let doc = load_bytes(&report_pdf()).unwrap();

    assert_eq!(doc.page_count(), 2);
    let first = doc.get_page(1).unwrap();
    assert_eq!((first.width, first.height), (595.0, 842.0));
    assert_eq!(first.blocks.len(), 2);
    assert_eq!(first.blocks[0].lines[0].text(), "Title");
    assert_eq!(first.blocks[1].lines.len(), 3);

    let span = &first.blocks[0].lines[0].spans[0];
    assert_eq!(span.size, 24.0);
    assert_eq!(span.font, "Helvetica");
}

#[test]
fn test_classify_generated_pdf() {
    let doc = load_bytes(&report_pdf()).unwrap();
    let result = sizetag::classify(&doc, &ClassifyOptions::default()).unwrap();

    assert_eq!(result.tags.paragraph_size().value(), 12.0);
    let markup: Vec<String> = result.elements.iter().map(|e| e.markup()).collect();
    assert_eq!(
        markup,
        vec![
            "<h1>Title</h1>",
            "<p>Body one\nBody two\nBody three</p>",
            "<p>Second page</p>",
            "<s1>footer</s1>",
        ]
    );
}

#[test]
fn test_sequential_matches_parallel() {
    let data = report_pdf();
    let parallel = load_bytes(&data).unwrap();
    let sequential = load_bytes_with_options(&data, ParseOptions::new().sequential()).unwrap();

    assert_eq!(parallel.span_count(), sequential.span_count());
    assert_eq!(parallel.pages[1].blocks.len(), sequential.pages[1].blocks.len());
}

#[test]
fn test_page_selection() {
    let options = ParseOptions::new().with_pages(PageSelection::Pages(vec![2]));
    let doc = load_bytes_with_options(&report_pdf(), options).unwrap();
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.pages[0].number, 2);

    let options = ParseOptions::new().with_pages(PageSelection::Range(3..=4));
    let err = load_bytes_with_options(&report_pdf(), options).unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange(3, 2)));
}

#[test]
fn test_parser_metadata() {
    let parser = PdfParser::from_bytes(&report_pdf()).unwrap();
    assert_eq!(parser.page_count(), 2);
    assert_eq!(parser.version(), "1.5");

    let doc = parser.with_source("memory.pdf").parse().unwrap();
    assert_eq!(doc.name(), "memory.pdf");
}

#[test]
fn test_load_file_uses_path_as_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, report_pdf()).unwrap();

    let doc = load_file(&path).unwrap();
    assert!(doc.name().ends_with("report.pdf"));

    let markdown = Sizetag::new()
        .headings_and_paragraphs_only()
        .classify(&path)
        .unwrap()
        .to_markdown();
    assert!(markdown.starts_with("# Title\n\n"));
    assert!(!markdown.contains("footer"));
}

#[test]
fn test_lenient_mode_tolerates_bad_content() {
    let data = build_pdf(&[
        page_content(&[(12, 72, 700, "Readable")]),
        b"BT /F1 12 Tf (unterminated Tj ET".to_vec(),
    ]);

    let doc = load_bytes_with_options(&data, ParseOptions::new().lenient()).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[0].span_count(), 1);
}

#[test]
fn test_parent_cycle_without_media_box() {
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        page_content(&[(12, 72, 700, "Looped")]),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Parent" => pages_id,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();

    assert!(load_bytes(&data).is_err());

    let doc = load_bytes_with_options(&data, ParseOptions::new().lenient()).unwrap();
    let page = doc.get_page(1).unwrap();
    assert_eq!((page.width, page.height), (612.0, 792.0));
}
