use lopdf::{Dictionary, Document, Object};
use pdf_nup::*;

fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..num_pages)
        .map(|_| {
            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
                ),
            ]);
            Object::Reference(doc.add_object(page))
        })
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn options(pages_per_sheet: usize, mode: &str) -> ImpositionOptions {
    ImpositionOptions::from_request(pages_per_sheet, "A4", mode).unwrap()
}

#[test]
fn test_sequential_statistics() {
    let doc = create_test_pdf(7);
    let stats = calculate_statistics(&doc, &options(4, "sequential")).unwrap();

    assert_eq!(stats.source_pages, 7);
    assert_eq!(stats.output_sheets, 2);
    assert_eq!(stats.sheet_pairs, None);
    assert_eq!(stats.empty_cells, 1);
    assert_eq!((stats.columns, stats.rows), (2, 2));
}

#[test]
fn test_foldable_statistics() {
    let doc = create_test_pdf(8);
    let stats = calculate_statistics(&doc, &options(2, "foldable")).unwrap();

    assert_eq!(stats.source_pages, 8);
    assert_eq!(stats.output_sheets, 4);
    assert_eq!(stats.sheet_pairs, Some(2));
    assert_eq!(stats.empty_cells, 0);
    assert_eq!((stats.columns, stats.rows), (1, 2));
}

#[test]
fn test_foldable_partial_pair() {
    // 5 pages, 4-up: one pair, fronts hold 0,2,4 and backs hold 1,3
    let stats = statistics_for_page_count(5, &options(4, "foldable")).unwrap();

    assert_eq!(stats.output_sheets, 2);
    assert_eq!(stats.sheet_pairs, Some(1));
    assert_eq!(stats.empty_cells, 3);
}

#[test]
fn test_sixteen_up_grid() {
    let stats = statistics_for_page_count(40, &options(16, "sequential")).unwrap();

    assert_eq!(stats.output_sheets, 3);
    assert_eq!(stats.empty_cells, 8);
    assert_eq!((stats.columns, stats.rows), (4, 4));
}

#[test]
fn test_statistics_no_pages() {
    let doc = create_test_pdf(0);

    let result = calculate_statistics(&doc, &ImpositionOptions::default());
    match result {
        Err(ImposeError::NoPages) => {}
        _ => panic!("Expected NoPages error"),
    }
}
