use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// The kind of an XML tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Element,
    Attribute,
    Text,
    Cdata,
    Comment,
    ProcessingInstruction,
    Document,
    DocumentType,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
            NodeKind::Text => "text",
            NodeKind::Cdata => "CDATA section",
            NodeKind::Comment => "comment",
            NodeKind::ProcessingInstruction => "processing instruction",
            NodeKind::Document => "document",
            NodeKind::DocumentType => "document type",
        };
        write!(f, "{label}")
    }
}

/// A generic XML tree node.
///
/// One type covers every node kind, DOM-style: attributes are nodes of kind
/// [`NodeKind::Attribute`] held in their owner's `attributes` list, and a
/// parsed file is rooted in a [`NodeKind::Document`] node. Fields that only
/// apply to some kinds (`specified`, `xml_version`, `public_id`, ...) keep
/// their default on every other kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XmlNode {
    /// Node kind.
    pub kind: NodeKind,
    /// Local name: element/attribute name, processing-instruction target,
    /// document-type name. Empty for kinds without a name.
    pub name: String,
    /// Namespace prefix, if the name was written qualified.
    pub prefix: Option<String>,
    /// Namespace URI the node is bound to.
    pub namespace_uri: Option<String>,
    /// Character payload: text/CDATA/comment content, attribute value,
    /// processing-instruction data.
    pub value: Option<String>,
    /// Attribute nodes in document order (elements only).
    pub attributes: Vec<XmlNode>,
    /// Child nodes in document order.
    pub children: Vec<XmlNode>,
    /// Whether an attribute value was explicitly written in the source.
    pub specified: bool,
    /// XML declaration version (documents; defaults to "1.0").
    pub xml_version: Option<String>,
    /// XML declaration standalone flag (documents).
    pub xml_standalone: bool,
    /// XML declaration encoding (documents).
    pub xml_encoding: Option<String>,
    /// Public identifier (document types).
    pub public_id: Option<String>,
    /// System identifier (document types).
    pub system_id: Option<String>,
}

impl XmlNode {
    fn blank(kind: NodeKind) -> Self {
        Self {
            kind,
            name: String::new(),
            prefix: None,
            namespace_uri: None,
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
            specified: true,
            xml_version: None,
            xml_standalone: false,
            xml_encoding: None,
            public_id: None,
            system_id: None,
        }
    }

    /// Create an element node.
    pub fn element(name: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::Element);
        node.name = name.into();
        node
    }

    /// Create an attribute node.
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::Attribute);
        node.name = name.into();
        node.value = Some(value.into());
        node
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::Text);
        node.value = Some(content.into());
        node
    }

    /// Create a CDATA section node.
    pub fn cdata(content: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::Cdata);
        node.value = Some(content.into());
        node
    }

    /// Create a comment node.
    pub fn comment(content: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::Comment);
        node.value = Some(content.into());
        node
    }

    /// Create a processing-instruction node.
    pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::ProcessingInstruction);
        node.name = target.into();
        node.value = Some(data.into());
        node
    }

    /// Create an empty document node with default declaration properties.
    pub fn document() -> Self {
        let mut node = Self::blank(NodeKind::Document);
        node.xml_version = Some("1.0".to_string());
        node
    }

    /// Create a document-type node.
    pub fn doctype(name: impl Into<String>) -> Self {
        let mut node = Self::blank(NodeKind::DocumentType);
        node.name = name.into();
        node
    }

    /// Bind the node to a namespace, with an optional prefix.
    pub fn in_namespace(mut self, prefix: Option<&str>, uri: impl Into<String>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self.namespace_uri = Some(uri.into());
        self
    }

    /// Append an attribute node (chainable, for building trees by hand).
    pub fn with_attribute(mut self, attribute: XmlNode) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Append a child node (chainable, for building trees by hand).
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this attribute node declares a namespace (`xmlns` or
    /// `xmlns:*`).
    pub fn is_namespace_declaration(&self) -> bool {
        self.kind == NodeKind::Attribute
            && ((self.name == "xmlns" && self.prefix.is_none())
                || self.prefix.as_deref() == Some("xmlns"))
    }

    /// Name with its prefix, as written in markup.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// DOM-style node name used when reporting a failed child lookup.
    pub fn lookup_name(&self) -> String {
        match self.kind {
            NodeKind::Element | NodeKind::Attribute => self.qualified_name(),
            NodeKind::Text => "#text".to_string(),
            NodeKind::Cdata => "#cdata-section".to_string(),
            NodeKind::Comment => "#comment".to_string(),
            NodeKind::ProcessingInstruction => self.name.clone(),
            NodeKind::Document => "#document".to_string(),
            NodeKind::DocumentType => self.name.clone(),
        }
    }

    /// Return the first child element with the provided name.
    pub fn get_child(&self, name: &str) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.kind == NodeKind::Element && child.name == name)
    }

    /// Return all child elements with the provided name.
    pub fn get_children(&self, name: &str) -> Vec<&XmlNode> {
        self.children
            .iter()
            .filter(|child| child.kind == NodeKind::Element && child.name == name)
            .collect()
    }

    /// The root element of a document node, if it has one.
    pub fn document_element(&self) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.kind == NodeKind::Element)
    }

    /// The document-type child of a document node, if declared.
    pub fn doctype_node(&self) -> Option<&XmlNode> {
        self.children
            .iter()
            .find(|child| child.kind == NodeKind::DocumentType)
    }

    /// Concatenated content of the direct text and CDATA children.
    pub fn merged_text(&self) -> String {
        let mut merged = String::new();
        for child in &self.children {
            if matches!(child.kind, NodeKind::Text | NodeKind::Cdata) {
                if let Some(value) = &child.value {
                    merged.push_str(value);
                }
            }
        }
        merged
    }
}

impl Display for XmlNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Element => {
                write!(f, "<{}", self.qualified_name())?;
                for attribute in &self.attributes {
                    write!(
                        f,
                        " {}=\"{}\"",
                        attribute.qualified_name(),
                        attribute.value.as_deref().unwrap_or_default()
                    )?;
                }
                if self.children.is_empty() {
                    return write!(f, "/>");
                }
                write!(f, ">")?;
                for child in &self.children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", self.qualified_name())
            }
            NodeKind::Attribute => write!(
                f,
                "{}=\"{}\"",
                self.qualified_name(),
                self.value.as_deref().unwrap_or_default()
            ),
            NodeKind::Text => write!(f, "{}", self.value.as_deref().unwrap_or_default()),
            NodeKind::Cdata => {
                write!(f, "<![CDATA[{}]]>", self.value.as_deref().unwrap_or_default())
            }
            NodeKind::Comment => write!(f, "<!--{}-->", self.value.as_deref().unwrap_or_default()),
            NodeKind::ProcessingInstruction => {
                let data = self.value.as_deref().unwrap_or_default();
                if data.is_empty() {
                    write!(f, "<?{}?>", self.name)
                } else {
                    write!(f, "<?{} {}?>", self.name, data)
                }
            }
            NodeKind::Document => {
                if let Some(version) = &self.xml_version {
                    write!(f, "<?xml version=\"{version}\"")?;
                    if let Some(encoding) = &self.xml_encoding {
                        write!(f, " encoding=\"{encoding}\"")?;
                    }
                    if self.xml_standalone {
                        write!(f, " standalone=\"yes\"")?;
                    }
                    write!(f, "?>")?;
                }
                for child in &self.children {
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            NodeKind::DocumentType => {
                write!(f, "<!DOCTYPE {}", self.name)?;
                match (&self.public_id, &self.system_id) {
                    (Some(public), Some(system)) => {
                        write!(f, " PUBLIC \"{public}\" \"{system}\"")?
                    }
                    (None, Some(system)) => write!(f, " SYSTEM \"{system}\"")?,
                    _ => {}
                }
                write!(f, ">")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeKind, XmlNode};

    #[test]
    fn qualified_name_includes_prefix() {
        let node = XmlNode::element("detail").in_namespace(Some("ns"), "urn:example");
        assert_eq!(node.qualified_name(), "ns:detail");
        assert_eq!(XmlNode::element("plain").qualified_name(), "plain");
    }

    #[test]
    fn lookup_names_follow_dom_conventions() {
        assert_eq!(XmlNode::text("hi").lookup_name(), "#text");
        assert_eq!(XmlNode::cdata("hi").lookup_name(), "#cdata-section");
        assert_eq!(XmlNode::comment("hi").lookup_name(), "#comment");
        assert_eq!(XmlNode::document().lookup_name(), "#document");
        assert_eq!(
            XmlNode::processing_instruction("xml-stylesheet", "href=\"a.xsl\"").lookup_name(),
            "xml-stylesheet"
        );
    }

    #[test]
    fn merged_text_joins_text_and_cdata_children() {
        let element = XmlNode::element("poem")
            .with_child(XmlNode::text("roses "))
            .with_child(XmlNode::cdata("are red"))
            .with_child(XmlNode::element("line"))
            .with_child(XmlNode::text("!"));
        assert_eq!(element.merged_text(), "roses are red!");
    }

    #[test]
    fn document_element_skips_other_children() {
        let document = XmlNode::document()
            .with_child(XmlNode::comment("header"))
            .with_child(XmlNode::doctype("root"))
            .with_child(XmlNode::element("root"));
        assert_eq!(document.document_element().map(|e| e.name.as_str()), Some("root"));
        assert_eq!(document.doctype_node().map(|d| d.kind), Some(NodeKind::DocumentType));
    }

    #[test]
    fn display_renders_markup() {
        let element = XmlNode::element("item")
            .with_attribute(XmlNode::attribute("id", "7"))
            .with_child(XmlNode::text("x"));
        assert_eq!(element.to_string(), "<item id=\"7\">x</item>");
        assert_eq!(XmlNode::element("empty").to_string(), "<empty/>");
    }
}
