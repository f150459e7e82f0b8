use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::{NodeKind, XmlNode};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into a document-rooted [`XmlNode`] tree.
///
/// Text is kept verbatim, including whitespace-only nodes; prefixed names
/// are resolved against the in-scope `xmlns` declarations.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut document = XmlNode::document();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut scopes: Vec<HashMap<String, String>> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Decl(e) => apply_declaration(&e, &mut document)?,
            Event::DocType(e) => {
                let doctype = parse_doctype(std::str::from_utf8(&e)?)?;
                attach(&mut document, &mut stack, doctype)?;
            }
            Event::Start(e) => {
                let node = open_element(&e, &reader, &mut scopes)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = open_element(&e, &reader, &mut scopes)?;
                scopes.pop();
                attach(&mut document, &mut stack, node)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                scopes.pop();
                attach(&mut document, &mut stack, node)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?.into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::text(text));
                } else if !text.trim().is_empty() {
                    return Err(ParseError::Malformed(
                        "text content outside the document element".to_string(),
                    ));
                }
            }
            Event::CData(e) => {
                let text = std::str::from_utf8(e.as_ref())?.to_string();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(XmlNode::cdata(text)),
                    None => {
                        return Err(ParseError::Malformed(
                            "CDATA section outside the document element".to_string(),
                        ))
                    }
                }
            }
            Event::Comment(e) => {
                // Entity references are not recognized inside comments, so
                // the raw bytes are taken as-is.
                let text = std::str::from_utf8(&e)?.to_string();
                attach(&mut document, &mut stack, XmlNode::comment(text))?;
            }
            Event::PI(e) => {
                let raw = std::str::from_utf8(&e)?;
                let (target, data) = match raw.split_once(char::is_whitespace) {
                    Some((target, data)) => (target, data.trim_start()),
                    None => (raw, ""),
                };
                let node = XmlNode::processing_instruction(target, data);
                attach(&mut document, &mut stack, node)?;
            }
            Event::Eof => break,
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }
    if document.document_element().is_none() {
        return Err(ParseError::Malformed("no root element found".to_string()));
    }
    Ok(document)
}

/// Parse an XML file into a document-rooted [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(document: &mut XmlNode, stack: &mut [XmlNode], node: XmlNode) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else {
        if node.kind == NodeKind::Element && document.document_element().is_some() {
            return Err(ParseError::Malformed(
                "multiple top-level elements found".to_string(),
            ));
        }
        document.children.push(node);
    }
    Ok(())
}

fn apply_declaration(e: &BytesDecl<'_>, document: &mut XmlNode) -> Result<(), ParseError> {
    document.xml_version = Some(std::str::from_utf8(&e.version()?)?.to_string());
    if let Some(encoding) = e.encoding() {
        let encoding = encoding.map_err(quick_xml::Error::from)?;
        document.xml_encoding = Some(std::str::from_utf8(&encoding)?.to_string());
    }
    if let Some(standalone) = e.standalone() {
        let standalone = standalone.map_err(quick_xml::Error::from)?;
        document.xml_standalone = standalone.as_ref() == b"yes";
    }
    Ok(())
}

/// Build an element node, pushing the namespace scope its `xmlns`
/// attributes declare. The caller pops the scope when the element closes.
fn open_element(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    scopes: &mut Vec<HashMap<String, String>>,
) -> Result<XmlNode, ParseError> {
    let mut raw_attributes: Vec<(String, String)> = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = qname_to_string(attr.key)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        raw_attributes.push((key, value));
    }

    let mut scope = HashMap::new();
    for (key, value) in &raw_attributes {
        if key == "xmlns" {
            scope.insert(String::new(), value.clone());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            scope.insert(prefix.to_string(), value.clone());
        }
    }
    scopes.push(scope);

    let tag = qname_to_string(e.name())?;
    let (prefix, local) = split_name(&tag);
    let mut node = XmlNode::element(local);
    if let Some(prefix) = prefix {
        let uri = resolve(scopes, prefix)
            .ok_or_else(|| ParseError::Malformed(format!("unbound namespace prefix `{prefix}`")))?
            .to_string();
        node = node.in_namespace(Some(prefix), uri);
    } else if let Some(uri) = resolve(scopes, "") {
        let uri = uri.to_string();
        node = node.in_namespace(None, uri);
    }

    for (key, value) in raw_attributes {
        let attribute = build_attribute(&key, value, scopes)?;
        node.attributes.push(attribute);
    }
    Ok(node)
}

fn build_attribute(
    key: &str,
    value: String,
    scopes: &[HashMap<String, String>],
) -> Result<XmlNode, ParseError> {
    let (prefix, local) = split_name(key);
    let attribute = XmlNode::attribute(local, value);
    if key == "xmlns" {
        Ok(attribute.in_namespace(None, XMLNS_NAMESPACE))
    } else if prefix == Some("xmlns") {
        Ok(attribute.in_namespace(Some("xmlns"), XMLNS_NAMESPACE))
    } else if let Some(prefix) = prefix {
        let uri = resolve(scopes, prefix)
            .ok_or_else(|| ParseError::Malformed(format!("unbound namespace prefix `{prefix}`")))?
            .to_string();
        Ok(attribute.in_namespace(Some(prefix), uri))
    } else {
        // Unprefixed attributes never pick up the default namespace.
        Ok(attribute)
    }
}

fn resolve<'a>(scopes: &'a [HashMap<String, String>], prefix: &str) -> Option<&'a str> {
    for scope in scopes.iter().rev() {
        if let Some(uri) = scope.get(prefix) {
            // An empty URI un-declares the binding.
            return if uri.is_empty() { None } else { Some(uri) };
        }
    }
    match prefix {
        "xml" => Some(XML_NAMESPACE),
        "xmlns" => Some(XMLNS_NAMESPACE),
        _ => None,
    }
}

fn split_name(raw: &str) -> (Option<&str>, &str) {
    match raw.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() => (Some(prefix), local),
        _ => (None, raw),
    }
}

fn parse_doctype(raw: &str) -> Result<XmlNode, ParseError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(ParseError::Malformed(
            "empty doctype declaration".to_string(),
        ));
    }
    let (name, rest) = match content.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (content, ""),
    };
    let mut doctype = XmlNode::doctype(name);
    if let Some(rest) = rest.strip_prefix("PUBLIC") {
        let (public_id, rest) = read_quoted(rest.trim_start())?;
        let (system_id, _) = read_quoted(rest.trim_start())?;
        doctype.public_id = Some(public_id);
        doctype.system_id = Some(system_id);
    } else if let Some(rest) = rest.strip_prefix("SYSTEM") {
        let (system_id, _) = read_quoted(rest.trim_start())?;
        doctype.system_id = Some(system_id);
    }
    Ok(doctype)
}

fn read_quoted(input: &str) -> Result<(String, &str), ParseError> {
    let quote = input
        .chars()
        .next()
        .filter(|c| *c == '"' || *c == '\'')
        .ok_or_else(|| {
            ParseError::Malformed("expected quoted identifier in doctype declaration".to_string())
        })?;
    let rest = &input[1..];
    let end = rest.find(quote).ok_or_else(|| {
        ParseError::Malformed("unterminated identifier in doctype declaration".to_string())
    })?;
    Ok((rest[..end].to_string(), &rest[end + 1..]))
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}
