use std::path::PathBuf;

use xml_compare_core::tree::NodeKind;
use xml_compare_core::{parse, parse_file};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_documents_with_prolog_and_nested_elements() {
    let document = parse_file(&fixture("fixtures/book-control.xml")).expect("parse should succeed");
    assert_eq!(document.kind, NodeKind::Document);
    assert_eq!(document.xml_version.as_deref(), Some("1.0"));
    assert_eq!(document.xml_encoding.as_deref(), Some("UTF-8"));

    let library = document.document_element().expect("document element");
    assert_eq!(library.name, "library");
    assert_eq!(library.namespace_uri.as_deref(), Some("urn:example:library"));

    let books = library.get_children("book");
    assert_eq!(books.len(), 2);
    let title = books[0].get_child("title").expect("title should exist");
    assert_eq!(title.merged_text(), "The Daffodil Mystery");
}

#[test]
fn keeps_whitespace_text_nodes_verbatim() {
    let document = parse(b"<a>  <b/>\n</a>").expect("parse should succeed");
    let a = document.document_element().expect("document element");

    assert_eq!(a.children.len(), 3);
    assert_eq!(a.children[0].kind, NodeKind::Text);
    assert_eq!(a.children[0].value.as_deref(), Some("  "));
    assert_eq!(a.children[1].kind, NodeKind::Element);
    assert_eq!(a.children[2].value.as_deref(), Some("\n"));
}

#[test]
fn resolves_prefixes_against_in_scope_declarations() {
    let document = parse_file(&fixture("fixtures/ns-control.xml")).expect("parse should succeed");
    let inventory = document.document_element().expect("document element");

    assert_eq!(inventory.prefix.as_deref(), Some("inv"));
    assert_eq!(
        inventory.namespace_uri.as_deref(),
        Some("urn:example:inventory")
    );

    let declarations = inventory
        .attributes
        .iter()
        .filter(|attribute| attribute.is_namespace_declaration())
        .count();
    assert_eq!(declarations, 2);

    let schema_location = inventory
        .attributes
        .iter()
        .find(|attribute| attribute.name == "schemaLocation")
        .expect("schemaLocation attribute");
    assert_eq!(
        schema_location.namespace_uri.as_deref(),
        Some("http://www.w3.org/2001/XMLSchema-instance")
    );

    let shelf = inventory.get_child("shelf").expect("shelf should exist");
    assert_eq!(shelf.prefix.as_deref(), Some("inv"));
    assert_eq!(shelf.namespace_uri.as_deref(), Some("urn:example:inventory"));
}

#[test]
fn default_namespace_applies_to_elements_but_not_attributes() {
    let document = parse(br#"<a xmlns="urn:d"><b id="1"/></a>"#).expect("parse should succeed");
    let a = document.document_element().expect("document element");
    assert_eq!(a.namespace_uri.as_deref(), Some("urn:d"));

    let b = &a.children[0];
    assert_eq!(b.namespace_uri.as_deref(), Some("urn:d"));
    assert_eq!(b.attributes[0].namespace_uri, None);
}

#[test]
fn captures_doctype_declarations() {
    let document = parse_file(&fixture("fixtures/doc-control.xml")).expect("parse should succeed");
    assert!(document.xml_standalone);

    let doctype = document.doctype_node().expect("doctype node");
    assert_eq!(doctype.name, "greeting");
    assert_eq!(doctype.public_id, None);
    assert_eq!(doctype.system_id.as_deref(), Some("greeting.dtd"));
}

#[test]
fn captures_comments_and_processing_instructions() {
    let document =
        parse(b"<?xml version=\"1.0\"?><?style css?><!--note--><r><!--inner--></r>")
            .expect("parse should succeed");

    let pi = document
        .children
        .iter()
        .find(|child| child.kind == NodeKind::ProcessingInstruction)
        .expect("processing instruction");
    assert_eq!(pi.name, "style");
    assert_eq!(pi.value.as_deref(), Some("css"));

    let comment = document
        .children
        .iter()
        .find(|child| child.kind == NodeKind::Comment)
        .expect("top-level comment");
    assert_eq!(comment.value.as_deref(), Some("note"));

    let r = document.document_element().expect("document element");
    assert_eq!(r.children[0].kind, NodeKind::Comment);
    assert_eq!(r.children[0].value.as_deref(), Some("inner"));
}

#[test]
fn cdata_sections_stay_distinct_from_text() {
    let document = parse(b"<a><![CDATA[<raw>]]></a>").expect("parse should succeed");
    let a = document.document_element().expect("document element");
    assert_eq!(a.children[0].kind, NodeKind::Cdata);
    assert_eq!(a.children[0].value.as_deref(), Some("<raw>"));
}

#[test]
fn unescapes_entities_in_text_and_attributes() {
    let document = parse(br#"<a note="x &amp; y">1 &lt; 2</a>"#).expect("parse should succeed");
    let a = document.document_element().expect("document element");
    assert_eq!(a.attributes[0].value.as_deref(), Some("x & y"));
    assert_eq!(a.merged_text(), "1 < 2");
}

#[test]
fn rejects_unclosed_and_rootless_documents() {
    assert!(parse_file(&fixture("fixtures/invalid.xml")).is_err());
    assert!(parse(b"<?xml version=\"1.0\"?>").is_err());
    assert!(parse(b"<a/><b/>").is_err());
    assert!(parse(b"<a xmlns:p=\"urn:p\"><q:b/></a>").is_err());
}
