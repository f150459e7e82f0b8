//! Element selectors: the policy deciding which test element a control
//! element may be paired with during child reconciliation.

use std::collections::HashMap;

use crate::tree::{NodeKind, XmlNode};

/// Pure predicate over a control/test element pair. Both nodes are always
/// elements when the reconciler consults it.
pub type ElementSelector = Box<dyn Fn(&XmlNode, &XmlNode) -> bool>;

/// Same local name and namespace URI. The engine default.
pub fn by_name() -> ElementSelector {
    Box::new(names_match)
}

/// [`by_name`] plus equal merged direct text content.
pub fn by_name_and_text() -> ElementSelector {
    Box::new(names_and_text_match)
}

/// [`by_name_and_text`] applied recursively to the element children, which
/// must agree pairwise in document order.
pub fn by_name_and_text_recursive() -> ElementSelector {
    Box::new(names_and_text_match_recursively)
}

/// [`by_name`] plus identical regular attributes (namespace declarations
/// ignored).
pub fn by_name_and_all_attributes() -> ElementSelector {
    Box::new(|control, test| {
        names_match(control, test) && attribute_map(control) == attribute_map(test)
    })
}

/// [`by_name`] plus equal values for the listed attributes; an attribute
/// missing on both sides counts as equal.
pub fn by_name_and_attributes(names: Vec<String>) -> ElementSelector {
    Box::new(move |control, test| {
        names_match(control, test)
            && names
                .iter()
                .all(|name| attribute_value(control, name) == attribute_value(test, name))
    })
}

fn names_match(control: &XmlNode, test: &XmlNode) -> bool {
    control.name == test.name && control.namespace_uri == test.namespace_uri
}

fn names_and_text_match(control: &XmlNode, test: &XmlNode) -> bool {
    names_match(control, test) && control.merged_text() == test.merged_text()
}

fn names_and_text_match_recursively(control: &XmlNode, test: &XmlNode) -> bool {
    if !names_and_text_match(control, test) {
        return false;
    }
    let control_children = element_children(control);
    let test_children = element_children(test);
    control_children.len() == test_children.len()
        && control_children
            .iter()
            .zip(&test_children)
            .all(|(child, candidate)| names_and_text_match_recursively(child, candidate))
}

fn element_children(element: &XmlNode) -> Vec<&XmlNode> {
    element
        .children
        .iter()
        .filter(|child| child.kind == NodeKind::Element)
        .collect()
}

fn attribute_map(element: &XmlNode) -> HashMap<(Option<&str>, &str), Option<&str>> {
    element
        .attributes
        .iter()
        .filter(|attribute| !attribute.is_namespace_declaration())
        .map(|attribute| {
            (
                (attribute.namespace_uri.as_deref(), attribute.name.as_str()),
                attribute.value.as_deref(),
            )
        })
        .collect()
}

fn attribute_value<'a>(element: &'a XmlNode, name: &str) -> Option<&'a str> {
    element
        .attributes
        .iter()
        .find(|attribute| attribute.qualified_name() == name)
        .and_then(|attribute| attribute.value.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::XmlNode;

    #[test]
    fn by_name_requires_name_and_namespace() {
        let selector = by_name();
        assert!(selector(&XmlNode::element("a"), &XmlNode::element("a")));
        assert!(!selector(&XmlNode::element("a"), &XmlNode::element("b")));
        assert!(!selector(
            &XmlNode::element("a").in_namespace(None, "urn:one"),
            &XmlNode::element("a").in_namespace(None, "urn:two"),
        ));
        assert!(selector(
            &XmlNode::element("a").in_namespace(Some("x"), "urn:one"),
            &XmlNode::element("a").in_namespace(Some("y"), "urn:one"),
        ));
    }

    #[test]
    fn by_name_and_text_merges_text_and_cdata() {
        let selector = by_name_and_text();
        let control = XmlNode::element("a")
            .with_child(XmlNode::text("one "))
            .with_child(XmlNode::cdata("two"));
        let merged = XmlNode::element("a").with_child(XmlNode::text("one two"));
        let other = XmlNode::element("a").with_child(XmlNode::text("three"));

        assert!(selector(&control, &merged));
        assert!(!selector(&control, &other));
    }

    #[test]
    fn recursive_selector_descends_into_element_children() {
        let selector = by_name_and_text_recursive();
        let control = XmlNode::element("list")
            .with_child(XmlNode::element("item").with_child(XmlNode::text("1")))
            .with_child(XmlNode::element("item").with_child(XmlNode::text("2")));
        let same = control.clone();
        let different_leaf = XmlNode::element("list")
            .with_child(XmlNode::element("item").with_child(XmlNode::text("1")))
            .with_child(XmlNode::element("item").with_child(XmlNode::text("other")));
        let fewer_children = XmlNode::element("list")
            .with_child(XmlNode::element("item").with_child(XmlNode::text("1")));

        assert!(selector(&control, &same));
        assert!(!selector(&control, &different_leaf));
        assert!(!selector(&control, &fewer_children));
    }

    #[test]
    fn all_attributes_selector_ignores_namespace_declarations() {
        let selector = by_name_and_all_attributes();
        let control = XmlNode::element("a")
            .with_attribute(XmlNode::attribute("id", "1"))
            .with_attribute(XmlNode::attribute("xmlns", "urn:x"));
        let test = XmlNode::element("a").with_attribute(XmlNode::attribute("id", "1"));
        let different = XmlNode::element("a").with_attribute(XmlNode::attribute("id", "2"));

        assert!(selector(&control, &test));
        assert!(!selector(&control, &different));
    }

    #[test]
    fn named_attributes_selector_checks_listed_attributes_only() {
        let selector = by_name_and_attributes(vec!["id".to_string()]);
        let control = XmlNode::element("a")
            .with_attribute(XmlNode::attribute("id", "1"))
            .with_attribute(XmlNode::attribute("class", "x"));
        let same_id = XmlNode::element("a")
            .with_attribute(XmlNode::attribute("id", "1"))
            .with_attribute(XmlNode::attribute("class", "y"));
        let other_id = XmlNode::element("a").with_attribute(XmlNode::attribute("id", "2"));
        let no_id = XmlNode::element("a");

        assert!(selector(&control, &same_id));
        assert!(!selector(&control, &other_id));
        assert!(!selector(&control, &no_id));
        assert!(selector(&no_id, &XmlNode::element("a")));
    }
}
