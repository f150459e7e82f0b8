use std::collections::HashMap;

use crate::tree::{NodeKind, XmlNode};

/// Incrementally tracked XPath of the node a walk is currently visiting.
///
/// The walker owns one tracker per document side. Children of the current
/// level must be recorded with [`set_children`](XpathTracker::set_children)
/// before navigating into them; navigation to anything that was never
/// recorded is a caller bug and panics.
#[derive(Debug)]
pub struct XpathTracker {
    frames: Vec<Frame>,
    uri_to_prefix: HashMap<String, String>,
}

#[derive(Debug, Default)]
struct Frame {
    expression: String,
    children: Vec<String>,
    attributes: Vec<String>,
}

impl XpathTracker {
    /// Tracker positioned at the document root.
    pub fn new() -> Self {
        Self::with_prefix_map(HashMap::new())
    }

    /// Tracker that renders element and attribute names with the prefixes
    /// registered for their namespace URIs. Unmapped URIs fall back to the
    /// prefix the node itself was written with.
    pub fn with_prefix_map(uri_to_prefix: HashMap<String, String>) -> Self {
        Self {
            frames: vec![Frame::default()],
            uri_to_prefix,
        }
    }

    /// Record the (filtered) children of the current level, replacing any
    /// previously recorded set.
    pub fn set_children<'a>(&mut self, children: impl IntoIterator<Item = &'a XmlNode>) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut rendered = Vec::new();
        for child in children {
            let key = self.segment_key(child);
            let position = counts.entry(key.clone()).or_insert(0);
            *position += 1;
            rendered.push(format!("{key}[{position}]"));
        }
        let current = self.current_mut();
        current.children = rendered;
    }

    /// Descend into recorded child `index`.
    pub fn navigate_to_child(&mut self, index: usize) {
        let expression = match self.current().children.get(index) {
            Some(expression) => expression.clone(),
            None => panic!(
                "child {index} was never recorded at {}",
                self.xpath()
            ),
        };
        self.frames.push(Frame {
            expression,
            ..Frame::default()
        });
    }

    /// Record attribute nodes of the current element.
    pub fn add_attributes<'a>(&mut self, attributes: impl IntoIterator<Item = &'a XmlNode>) {
        let mut rendered: Vec<String> = attributes
            .into_iter()
            .map(|attribute| self.attribute_expression(attribute))
            .collect();
        let current = self.current_mut();
        current.attributes.append(&mut rendered);
    }

    /// Descend into a recorded attribute.
    pub fn navigate_to_attribute(&mut self, attribute: &XmlNode) {
        let expression = self.attribute_expression(attribute);
        if !self.current().attributes.contains(&expression) {
            panic!(
                "attribute {expression} was never recorded at {}",
                self.xpath()
            );
        }
        self.frames.push(Frame {
            expression,
            ..Frame::default()
        });
    }

    /// Pop one level (child or attribute).
    pub fn navigate_to_parent(&mut self) {
        if self.frames.len() <= 1 {
            panic!("cannot navigate above the document root");
        }
        self.frames.pop();
    }

    /// Render the tracked path, `/seg[n]/seg[n]` style.
    pub fn xpath(&self) -> String {
        if self.frames.len() == 1 {
            return "/".to_string();
        }
        let mut path = String::new();
        for frame in &self.frames[1..] {
            path.push('/');
            path.push_str(&frame.expression);
        }
        path
    }

    fn current(&self) -> &Frame {
        self.frames.last().expect("tracker always has a root frame")
    }

    fn current_mut(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .expect("tracker always has a root frame")
    }

    fn segment_key(&self, node: &XmlNode) -> String {
        match node.kind {
            NodeKind::Text | NodeKind::Cdata => "text()".to_string(),
            NodeKind::Comment => "comment()".to_string(),
            NodeKind::ProcessingInstruction => "processing-instruction()".to_string(),
            NodeKind::Element => self.render_name(node),
            _ => node.lookup_name(),
        }
    }

    fn attribute_expression(&self, attribute: &XmlNode) -> String {
        format!("@{}", self.render_name(attribute))
    }

    fn render_name(&self, node: &XmlNode) -> String {
        if let Some(uri) = &node.namespace_uri {
            if let Some(prefix) = self.uri_to_prefix.get(uri) {
                return format!("{prefix}:{}", node.name);
            }
        }
        node.qualified_name()
    }
}

impl Default for XpathTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::XpathTracker;
    use crate::tree::XmlNode;

    #[test]
    fn fresh_tracker_is_at_root() {
        assert_eq!(XpathTracker::new().xpath(), "/");
    }

    #[test]
    fn elements_are_indexed_per_name() {
        let children = [
            XmlNode::element("a"),
            XmlNode::element("b"),
            XmlNode::element("a"),
        ];
        let mut tracker = XpathTracker::new();
        tracker.set_children(children.iter());

        tracker.navigate_to_child(2);
        assert_eq!(tracker.xpath(), "/a[2]");

        tracker.navigate_to_parent();
        tracker.navigate_to_child(1);
        assert_eq!(tracker.xpath(), "/b[1]");
    }

    #[test]
    fn text_and_cdata_share_one_counter() {
        let children = [
            XmlNode::text("one"),
            XmlNode::cdata("two"),
            XmlNode::comment("note"),
            XmlNode::text("three"),
        ];
        let mut tracker = XpathTracker::new();
        tracker.set_children(children.iter());

        tracker.navigate_to_child(1);
        assert_eq!(tracker.xpath(), "/text()[2]");

        tracker.navigate_to_parent();
        tracker.navigate_to_child(2);
        assert_eq!(tracker.xpath(), "/comment()[1]");

        tracker.navigate_to_parent();
        tracker.navigate_to_child(3);
        assert_eq!(tracker.xpath(), "/text()[3]");
    }

    #[test]
    fn nested_navigation_renders_full_path() {
        let root = [XmlNode::element("stuff")];
        let inner = [
            XmlNode::element("item"),
            XmlNode::element("item"),
            XmlNode::processing_instruction("sort", "order=asc"),
        ];
        let mut tracker = XpathTracker::new();
        tracker.set_children(root.iter());
        tracker.navigate_to_child(0);
        tracker.set_children(inner.iter());

        tracker.navigate_to_child(1);
        assert_eq!(tracker.xpath(), "/stuff[1]/item[2]");

        tracker.navigate_to_parent();
        tracker.navigate_to_child(2);
        assert_eq!(tracker.xpath(), "/stuff[1]/processing-instruction()[1]");
    }

    #[test]
    fn attributes_render_behind_their_element() {
        let root = [XmlNode::element("stuff")];
        let id = XmlNode::attribute("id", "1");
        let mut tracker = XpathTracker::new();
        tracker.set_children(root.iter());
        tracker.navigate_to_child(0);
        tracker.add_attributes([&id]);

        tracker.navigate_to_attribute(&id);
        assert_eq!(tracker.xpath(), "/stuff[1]/@id");

        tracker.navigate_to_parent();
        assert_eq!(tracker.xpath(), "/stuff[1]");
    }

    #[test]
    fn prefix_map_overrides_written_prefix() {
        let mut prefixes = HashMap::new();
        prefixes.insert("urn:example".to_string(), "ex".to_string());

        let written = [XmlNode::element("item").in_namespace(Some("old"), "urn:example")];
        let mut tracker = XpathTracker::with_prefix_map(prefixes);
        tracker.set_children(written.iter());
        tracker.navigate_to_child(0);
        assert_eq!(tracker.xpath(), "/ex:item[1]");

        let mut fallback = XpathTracker::new();
        fallback.set_children(written.iter());
        fallback.navigate_to_child(0);
        assert_eq!(fallback.xpath(), "/old:item[1]");
    }

    #[test]
    #[should_panic(expected = "never recorded")]
    fn navigating_to_unrecorded_child_panics() {
        let mut tracker = XpathTracker::new();
        tracker.navigate_to_child(0);
    }
}
