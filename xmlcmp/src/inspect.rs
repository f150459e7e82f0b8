use xml_compare_core::{NodeKind, XmlNode};

/// Node counts for a parsed tree. Namespace declarations are not counted
/// as attributes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub elements: usize,
    pub attributes: usize,
    pub text: usize,
    pub cdata: usize,
    pub comments: usize,
    pub processing_instructions: usize,
}

/// Count the nodes of a tree by kind.
pub fn tree_stats(node: &XmlNode) -> TreeStats {
    let mut stats = TreeStats::default();
    collect_stats(node, &mut stats);
    stats
}

fn collect_stats(node: &XmlNode, stats: &mut TreeStats) {
    match node.kind {
        NodeKind::Element => stats.elements += 1,
        NodeKind::Text => stats.text += 1,
        NodeKind::Cdata => stats.cdata += 1,
        NodeKind::Comment => stats.comments += 1,
        NodeKind::ProcessingInstruction => stats.processing_instructions += 1,
        _ => {}
    }
    stats.attributes += node
        .attributes
        .iter()
        .filter(|attribute| !attribute.is_namespace_declaration())
        .count();
    for child in &node.children {
        collect_stats(child, stats);
    }
}

/// Render an XML tree with a configurable max depth.
pub fn render_tree(node: &XmlNode, max_depth: usize) -> String {
    let mut out = String::new();
    render_node(node, 0, max_depth, &mut out);
    out
}

fn render_node(node: &XmlNode, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{}\n", describe(node)));

    if depth >= max_depth {
        return;
    }

    for attribute in &node.attributes {
        out.push_str(&format!(
            "{indent}  @{}=\"{}\"\n",
            attribute.qualified_name(),
            attribute.value.as_deref().unwrap_or("")
        ));
    }
    for child in &node.children {
        render_node(child, depth + 1, max_depth, out);
    }
}

fn describe(node: &XmlNode) -> String {
    match node.kind {
        NodeKind::Document => "#document".to_string(),
        NodeKind::Element => match node.namespace_uri.as_deref() {
            Some(uri) => format!("{} ({uri})", node.qualified_name()),
            None => node.qualified_name(),
        },
        NodeKind::Attribute => format!("@{}", node.qualified_name()),
        NodeKind::Text => format!("#text {}", preview(node.value.as_deref().unwrap_or(""))),
        NodeKind::Cdata => format!("#cdata {}", preview(node.value.as_deref().unwrap_or(""))),
        NodeKind::Comment => format!("#comment {}", preview(node.value.as_deref().unwrap_or(""))),
        NodeKind::ProcessingInstruction => format!(
            "?{} {}",
            node.qualified_name(),
            preview(node.value.as_deref().unwrap_or(""))
        ),
        NodeKind::DocumentType => format!("!doctype {}", node.qualified_name()),
    }
}

/// One quoted line of content, whitespace collapsed and long values cut.
fn preview(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut snippet: String = collapsed.chars().take(48).collect();
    if snippet.len() < collapsed.len() {
        snippet.push_str("...");
    }
    format!("\"{snippet}\"")
}
