use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::tree::XmlNode;

/// Everything a single atomic check can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    /// XML declaration version.
    XmlVersion,
    /// XML declaration standalone flag.
    XmlStandalone,
    /// XML declaration encoding.
    XmlEncoding,
    /// Whether a doctype is declared at all.
    HasDoctypeDeclaration,
    /// Doctype root element name.
    DoctypeName,
    /// Doctype public identifier.
    DoctypePublicId,
    /// Doctype system identifier.
    DoctypeSystemId,
    /// `xsi:schemaLocation` attribute value.
    SchemaLocation,
    /// `xsi:noNamespaceSchemaLocation` attribute value.
    NoNamespaceSchemaLocation,
    /// Node kind of the visited pair.
    NodeType,
    /// Namespace prefix as written.
    NamespacePrefix,
    /// Namespace URI the node is bound to.
    NamespaceUri,
    /// Text node content.
    TextValue,
    /// Comment node content.
    CommentValue,
    /// CDATA section content.
    CdataValue,
    /// Processing-instruction target.
    ProcessingInstructionTarget,
    /// Processing-instruction data.
    ProcessingInstructionData,
    /// Element tag name.
    ElementTagName,
    /// Number of regular attributes on an element.
    ElementNumAttributes,
    /// Attribute value.
    AttrValue,
    /// Whether an attribute value was explicitly written.
    AttrValueExplicitlySpecified,
    /// Position of an attribute among its element's regular attributes.
    AttrSequence,
    /// Attribute present on one side only.
    AttrNameLookup,
    /// Whether a node has any (filtered) children.
    HasChildNodes,
    /// Filtered child-list length.
    ChildNodelistLength,
    /// Position of a matched child within the filtered child list.
    ChildNodelistSequence,
    /// Child present on one side only.
    ChildLookup,
}

impl ComparisonKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComparisonKind; 27] = [
        ComparisonKind::XmlVersion,
        ComparisonKind::XmlStandalone,
        ComparisonKind::XmlEncoding,
        ComparisonKind::HasDoctypeDeclaration,
        ComparisonKind::DoctypeName,
        ComparisonKind::DoctypePublicId,
        ComparisonKind::DoctypeSystemId,
        ComparisonKind::SchemaLocation,
        ComparisonKind::NoNamespaceSchemaLocation,
        ComparisonKind::NodeType,
        ComparisonKind::NamespacePrefix,
        ComparisonKind::NamespaceUri,
        ComparisonKind::TextValue,
        ComparisonKind::CommentValue,
        ComparisonKind::CdataValue,
        ComparisonKind::ProcessingInstructionTarget,
        ComparisonKind::ProcessingInstructionData,
        ComparisonKind::ElementTagName,
        ComparisonKind::ElementNumAttributes,
        ComparisonKind::AttrValue,
        ComparisonKind::AttrValueExplicitlySpecified,
        ComparisonKind::AttrSequence,
        ComparisonKind::AttrNameLookup,
        ComparisonKind::HasChildNodes,
        ComparisonKind::ChildNodelistLength,
        ComparisonKind::ChildNodelistSequence,
        ComparisonKind::ChildLookup,
    ];

    /// Stable snake_case name, also used in JSON output and profiles.
    pub fn name(self) -> &'static str {
        match self {
            ComparisonKind::XmlVersion => "xml_version",
            ComparisonKind::XmlStandalone => "xml_standalone",
            ComparisonKind::XmlEncoding => "xml_encoding",
            ComparisonKind::HasDoctypeDeclaration => "has_doctype_declaration",
            ComparisonKind::DoctypeName => "doctype_name",
            ComparisonKind::DoctypePublicId => "doctype_public_id",
            ComparisonKind::DoctypeSystemId => "doctype_system_id",
            ComparisonKind::SchemaLocation => "schema_location",
            ComparisonKind::NoNamespaceSchemaLocation => "no_namespace_schema_location",
            ComparisonKind::NodeType => "node_type",
            ComparisonKind::NamespacePrefix => "namespace_prefix",
            ComparisonKind::NamespaceUri => "namespace_uri",
            ComparisonKind::TextValue => "text_value",
            ComparisonKind::CommentValue => "comment_value",
            ComparisonKind::CdataValue => "cdata_value",
            ComparisonKind::ProcessingInstructionTarget => "processing_instruction_target",
            ComparisonKind::ProcessingInstructionData => "processing_instruction_data",
            ComparisonKind::ElementTagName => "element_tag_name",
            ComparisonKind::ElementNumAttributes => "element_num_attributes",
            ComparisonKind::AttrValue => "attr_value",
            ComparisonKind::AttrValueExplicitlySpecified => "attr_value_explicitly_specified",
            ComparisonKind::AttrSequence => "attr_sequence",
            ComparisonKind::AttrNameLookup => "attr_name_lookup",
            ComparisonKind::HasChildNodes => "has_child_nodes",
            ComparisonKind::ChildNodelistLength => "child_nodelist_length",
            ComparisonKind::ChildNodelistSequence => "child_nodelist_sequence",
            ComparisonKind::ChildLookup => "child_lookup",
        }
    }

    /// Whether a DIFFERENT outcome on this kind still leaves the documents
    /// similar. The default evaluator downgrades these to SIMILAR.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ComparisonKind::XmlVersion
                | ComparisonKind::XmlStandalone
                | ComparisonKind::XmlEncoding
                | ComparisonKind::HasDoctypeDeclaration
                | ComparisonKind::DoctypeSystemId
                | ComparisonKind::SchemaLocation
                | ComparisonKind::NoNamespaceSchemaLocation
                | ComparisonKind::NamespacePrefix
                | ComparisonKind::AttrValueExplicitlySpecified
                | ComparisonKind::AttrSequence
                | ComparisonKind::ChildNodelistSequence
        )
    }
}

impl Display for ComparisonKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raised when a profile or CLI flag names a comparison kind that does not
/// exist.
#[derive(Debug, Error, PartialEq)]
#[error("unknown comparison kind `{0}`")]
pub struct UnknownComparisonKind(pub String);

impl FromStr for ComparisonKind {
    type Err = UnknownComparisonKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownComparisonKind(s.to_string()))
    }
}

/// How one comparison (or a whole run) came out. Ordered from best to
/// worst; CRITICAL additionally halts the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Equal,
    Similar,
    Different,
    Critical,
}

impl Display for ComparisonOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComparisonOutcome::Equal => "equal",
            ComparisonOutcome::Similar => "similar",
            ComparisonOutcome::Different => "different",
            ComparisonOutcome::Critical => "critical",
        };
        write!(f, "{label}")
    }
}

/// One side of a comparison. An all-`None` detail means this side has no
/// such node, which is distinct from a present node with an empty value.
#[derive(Debug, Clone)]
pub struct Detail<'a> {
    /// The node the check was about, when one exists on this side.
    pub target: Option<&'a XmlNode>,
    /// Tracked XPath of the target.
    pub xpath: Option<String>,
    /// The compared value.
    pub value: Option<String>,
}

impl<'a> Detail<'a> {
    pub fn new(target: Option<&'a XmlNode>, xpath: Option<String>, value: Option<String>) -> Self {
        Self {
            target,
            xpath,
            value,
        }
    }

    /// Detail for a side that has no corresponding node.
    pub fn absent() -> Self {
        Self {
            target: None,
            xpath: None,
            value: None,
        }
    }
}

/// A single atomic check: what was compared and what was found on each
/// side.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    pub kind: ComparisonKind,
    pub control: Detail<'a>,
    pub test: Detail<'a>,
}

impl<'a> Comparison<'a> {
    pub fn new(kind: ComparisonKind, control: Detail<'a>, test: Detail<'a>) -> Self {
        Self {
            kind,
            control,
            test,
        }
    }

    /// Outcome before any evaluator runs: EQUAL exactly when both values
    /// agree, with two absent values counting as agreement.
    pub fn initial_outcome(&self) -> ComparisonOutcome {
        if self.control.value == self.test.value {
            ComparisonOutcome::Equal
        } else {
            ComparisonOutcome::Different
        }
    }
}

/// Owned snapshot of a non-equal comparison, ready for collection and
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub kind: ComparisonKind,
    pub outcome: ComparisonOutcome,
    pub control_path: Option<String>,
    pub control_value: Option<String>,
    pub test_path: Option<String>,
    pub test_value: Option<String>,
}

impl Difference {
    pub fn from_comparison(comparison: &Comparison<'_>, outcome: ComparisonOutcome) -> Self {
        Self {
            kind: comparison.kind,
            outcome,
            control_path: comparison.control.xpath.clone(),
            control_value: comparison.control.value.clone(),
            test_path: comparison.test.xpath.clone(),
            test_value: comparison.test.value.clone(),
        }
    }
}

impl Display for Difference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): control '{}' at {}, test '{}' at {}",
            self.kind,
            self.outcome,
            self.control_value.as_deref().unwrap_or("<absent>"),
            self.control_path.as_deref().unwrap_or("<no path>"),
            self.test_value.as_deref().unwrap_or("<absent>"),
            self.test_path.as_deref().unwrap_or("<no path>"),
        )
    }
}
