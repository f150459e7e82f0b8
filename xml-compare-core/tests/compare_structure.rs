use std::path::PathBuf;

use xml_compare_core::{
    compare, compare_with_options, parse_file, ComparisonKind, ComparisonOptions,
    ComparisonOutcome,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn reordered_children_are_recoverable_sequence_differences() {
    let control = parse_file(&fixture("fixtures/catalog-control.xml")).expect("control parse");
    let test = parse_file(&fixture("fixtures/catalog-rotated.xml")).expect("test parse");

    let report = compare(&control, &test);
    assert!(report.is_similar());
    assert_eq!(report.differences.len(), 3);
    for difference in &report.differences {
        assert_eq!(difference.kind, ComparisonKind::ChildNodelistSequence);
        assert_eq!(difference.outcome, ComparisonOutcome::Similar);
    }

    // First displaced pair is the first <item>, shifted from slot 0 to 1.
    let first = &report.differences[0];
    assert_eq!(first.control_value.as_deref(), Some("0"));
    assert_eq!(first.test_value.as_deref(), Some("1"));
    assert_eq!(first.control_path.as_deref(), Some("/catalog[1]/item[1]"));
    assert_eq!(first.test_path.as_deref(), Some("/catalog[1]/item[1]"));
}

#[test]
fn inserted_children_shift_neighbors_silently() {
    let control = parse_file(&fixture("fixtures/catalog-control.xml")).expect("control parse");
    let test = parse_file(&fixture("fixtures/catalog-inserted.xml")).expect("test parse");

    let report = compare(&control, &test);
    assert!(!report.is_similar());

    let kinds: Vec<ComparisonKind> = report.differences.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ComparisonKind::ChildNodelistLength,
            ComparisonKind::ChildLookup,
        ]
    );

    let length = &report.differences[0];
    assert_eq!(length.control_value.as_deref(), Some("3"));
    assert_eq!(length.test_value.as_deref(), Some("4"));

    let lookup = &report.differences[1];
    assert_eq!(lookup.control_value, None);
    assert_eq!(lookup.control_path, None);
    assert_eq!(lookup.test_value.as_deref(), Some("note"));
    assert_eq!(lookup.test_path.as_deref(), Some("/catalog[1]/note[1]"));
}

#[test]
fn document_prolog_and_doctype_changes_are_recoverable() {
    let control = parse_file(&fixture("fixtures/doc-control.xml")).expect("control parse");
    let test = parse_file(&fixture("fixtures/doc-test.xml")).expect("test parse");

    let report = compare(&control, &test);
    assert!(report.is_similar());

    let kinds: Vec<ComparisonKind> = report.differences.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ComparisonKind::HasDoctypeDeclaration,
            ComparisonKind::XmlStandalone,
            ComparisonKind::XmlEncoding,
        ]
    );

    let doctype = &report.differences[0];
    assert_eq!(doctype.control_value.as_deref(), Some("true"));
    assert_eq!(doctype.test_value.as_deref(), Some("false"));
    assert_eq!(doctype.control_path.as_deref(), Some("/"));

    let encoding = &report.differences[2];
    assert_eq!(encoding.control_value.as_deref(), Some("UTF-8"));
    assert_eq!(encoding.test_value.as_deref(), Some("ISO-8859-1"));
}

#[test]
fn whitespace_is_significant_unless_ignored() {
    let control = parse_file(&fixture("fixtures/padded-control.xml")).expect("control parse");
    let test = parse_file(&fixture("fixtures/padded-test.xml")).expect("test parse");

    assert!(!compare(&control, &test).is_similar());

    let options = ComparisonOptions {
        ignore_whitespace: true,
        ..ComparisonOptions::default()
    };
    assert!(compare_with_options(&control, &test, &options).is_identical());
}

#[test]
fn text_and_cdata_can_be_interchangeable() {
    let control =
        xml_compare_core::parse(b"<a><![CDATA[payload]]></a>").expect("control parse");
    let test = xml_compare_core::parse(b"<a>payload</a>").expect("test parse");

    let report = compare(&control, &test);
    assert!(!report.is_similar());

    let options = ComparisonOptions {
        ignore_text_cdata: true,
        ..ComparisonOptions::default()
    };
    let relaxed = compare_with_options(&control, &test, &options);
    assert!(relaxed.is_identical());
}
