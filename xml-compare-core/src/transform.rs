//! Tree rewrites applied before comparison.

use crate::tree::{NodeKind, XmlNode};

/// Trim text and CDATA content and drop children that are whitespace-only.
///
/// Attribute values are left alone.
pub fn strip_whitespace(node: &XmlNode) -> XmlNode {
    let mut out = shallow(node);
    if let Some(value) = character_data(node) {
        out.value = Some(value.trim().to_string());
    }
    out.children = node
        .children
        .iter()
        .map(strip_whitespace)
        .filter(|child| !is_blank_character_data(child))
        .collect();
    out
}

/// Collapse every whitespace run in text and CDATA content to a single
/// space and trim the ends.
pub fn normalize_whitespace(node: &XmlNode) -> XmlNode {
    let mut out = shallow(node);
    if let Some(value) = character_data(node) {
        out.value = Some(collapse(value));
    }
    out.children = node.children.iter().map(normalize_whitespace).collect();
    out
}

/// Remove comment nodes from the whole tree.
pub fn strip_comments(node: &XmlNode) -> XmlNode {
    let mut out = shallow(node);
    out.children = node
        .children
        .iter()
        .filter(|child| child.kind != NodeKind::Comment)
        .map(strip_comments)
        .collect();
    out
}

fn shallow(node: &XmlNode) -> XmlNode {
    let mut copy = node.clone();
    copy.children = Vec::new();
    copy
}

fn character_data(node: &XmlNode) -> Option<&str> {
    match node.kind {
        NodeKind::Text | NodeKind::Cdata => node.value.as_deref(),
        _ => None,
    }
}

fn is_blank_character_data(node: &XmlNode) -> bool {
    matches!(node.kind, NodeKind::Text | NodeKind::Cdata)
        && node.value.as_deref().map_or(true, str::is_empty)
}

fn collapse(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
