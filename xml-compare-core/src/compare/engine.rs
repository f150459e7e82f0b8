//! The tree walker: runs node-basics checks and per-kind comparators over
//! a control/test pair, drives child reconciliation, and funnels every
//! comparison through the evaluator and the listener groups.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use super::comparison::{Comparison, ComparisonKind, ComparisonOutcome, Detail};
use super::evaluate::{default_evaluator, DifferenceEvaluator};
use super::reconcile::{filtered_children, reconcile_children, text_cdata_pair, ChildStep};
use super::select::{by_name, ElementSelector};
use super::xpath::XpathTracker;
use crate::tree::{NodeKind, XmlNode};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const ATTRIBUTE_ABSENT: &str = "[attribute absent]";

/// Comparison behavior switches, all defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonOptions {
    /// Drop whitespace-only text nodes and trim the rest before comparing.
    pub ignore_whitespace: bool,
    /// Collapse internal whitespace runs and trim text before comparing.
    pub normalize_whitespace: bool,
    /// Leave comment nodes out of the comparison entirely.
    pub ignore_comments: bool,
    /// Do not report attribute order, only presence and values.
    pub ignore_attribute_order: bool,
    /// Let text nodes match CDATA sections.
    pub ignore_text_cdata: bool,
    /// Pair leftover unmatched children with each other instead of
    /// reporting two lookup failures.
    pub compare_unmatched: bool,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            normalize_whitespace: false,
            ignore_comments: false,
            ignore_attribute_order: true,
            ignore_text_cdata: false,
            compare_unmatched: true,
        }
    }
}

/// Observer invoked with each comparison and its final outcome.
pub type ComparisonListener = Box<dyn FnMut(&Comparison<'_>, ComparisonOutcome)>;

/// Cooperative cancellation handle. Cloning shares the flag, so a listener
/// can keep a handle and stop the walk from inside a callback; the engine
/// honors it at the next comparison boundary.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Rc<Cell<bool>>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the walk to stop.
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }

    fn reset(&self) {
        self.0.set(false);
    }
}

/// Whether the walk goes on after a comparison was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// Recursive comparison engine.
///
/// One `compare` call is one walk: trackers are rebuilt and the stop flag
/// cleared on entry, so an engine can be reused, but a single walk must
/// finish (or halt) before the next one starts.
pub struct ComparisonEngine {
    options: ComparisonOptions,
    selector: ElementSelector,
    evaluator: Box<dyn DifferenceEvaluator>,
    comparison_listeners: Vec<ComparisonListener>,
    match_listeners: Vec<ComparisonListener>,
    difference_listeners: Vec<ComparisonListener>,
    namespace_context: HashMap<String, String>,
    stop: StopSignal,
    control_tracker: XpathTracker,
    test_tracker: XpathTracker,
}

impl ComparisonEngine {
    pub fn new() -> Self {
        Self::with_options(ComparisonOptions::default())
    }

    pub fn with_options(options: ComparisonOptions) -> Self {
        Self {
            options,
            selector: by_name(),
            evaluator: Box::new(default_evaluator),
            comparison_listeners: Vec::new(),
            match_listeners: Vec::new(),
            difference_listeners: Vec::new(),
            namespace_context: HashMap::new(),
            stop: StopSignal::new(),
            control_tracker: XpathTracker::new(),
            test_tracker: XpathTracker::new(),
        }
    }

    /// Replace the element selector consulted during child reconciliation.
    pub fn set_element_selector(&mut self, selector: ElementSelector) {
        self.selector = selector;
    }

    /// Replace the outcome evaluator.
    pub fn set_evaluator(&mut self, evaluator: Box<dyn DifferenceEvaluator>) {
        self.evaluator = evaluator;
    }

    /// Namespace-URI to prefix mapping used when rendering XPaths.
    pub fn set_namespace_context(&mut self, uri_to_prefix: HashMap<String, String>) {
        self.namespace_context = uri_to_prefix;
    }

    /// Listener invoked for every comparison, whatever its outcome.
    pub fn add_comparison_listener(&mut self, listener: ComparisonListener) {
        self.comparison_listeners.push(listener);
    }

    /// Listener invoked for EQUAL outcomes only.
    pub fn add_match_listener(&mut self, listener: ComparisonListener) {
        self.match_listeners.push(listener);
    }

    /// Listener invoked for SIMILAR, DIFFERENT and CRITICAL outcomes.
    pub fn add_difference_listener(&mut self, listener: ComparisonListener) {
        self.difference_listeners.push(listener);
    }

    /// Handle for cooperative cancellation of the current walk.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Walk both trees, delivering every comparison to the evaluator and
    /// the listeners.
    pub fn compare(&mut self, control: &XmlNode, test: &XmlNode) {
        self.compare_optional(Some(control), Some(test));
    }

    /// Like [`compare`](Self::compare), with either side allowed to be
    /// absent. Presence itself is the first comparison of the walk.
    pub fn compare_optional(&mut self, control: Option<&XmlNode>, test: Option<&XmlNode>) {
        self.stop.reset();
        self.control_tracker = XpathTracker::with_prefix_map(self.namespace_context.clone());
        self.test_tracker = XpathTracker::with_prefix_map(self.namespace_context.clone());

        let comparison = Comparison::new(
            ComparisonKind::NodeType,
            Detail::new(control, Some(self.control_tracker.xpath()), Some(presence(control))),
            Detail::new(test, Some(self.test_tracker.xpath()), Some(presence(test))),
        );
        if self.check(comparison) == Flow::Halt {
            return;
        }
        if let (Some(control), Some(test)) = (control, test) {
            let _ = self.compare_node_pair(control, test);
        }
    }

    /// Deliver one comparison: evaluate, notify, honor halting.
    fn perform(&mut self, comparison: Comparison<'_>, initial: ComparisonOutcome) -> Flow {
        let outcome = self.evaluator.evaluate(&comparison, initial);
        for listener in &mut self.comparison_listeners {
            listener(&comparison, outcome);
        }
        if outcome == ComparisonOutcome::Equal {
            for listener in &mut self.match_listeners {
                listener(&comparison, outcome);
            }
        } else {
            for listener in &mut self.difference_listeners {
                listener(&comparison, outcome);
            }
        }
        if outcome == ComparisonOutcome::Critical || self.stop.is_stopped() {
            return Flow::Halt;
        }
        Flow::Continue
    }

    fn check(&mut self, comparison: Comparison<'_>) -> Flow {
        let initial = comparison.initial_outcome();
        self.perform(comparison, initial)
    }

    /// Compare one node pair the trackers are currently positioned at.
    fn compare_node_pair(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let relaxed = self.options.ignore_text_cdata && text_cdata_pair(control.kind, test.kind);

        if !relaxed {
            let comparison = Comparison::new(
                ComparisonKind::NodeType,
                self.control_detail(control, Some(control.kind.to_string())),
                self.test_detail(test, Some(test.kind.to_string())),
            );
            if self.check(comparison) == Flow::Halt {
                return Flow::Halt;
            }
        }
        let comparison = Comparison::new(
            ComparisonKind::NamespaceUri,
            self.control_detail(control, control.namespace_uri.clone()),
            self.test_detail(test, test.namespace_uri.clone()),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::NamespacePrefix,
            self.control_detail(control, control.prefix.clone()),
            self.test_detail(test, test.prefix.clone()),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }

        let comparable = control.kind == test.kind || relaxed;
        if comparable {
            let flow = match control.kind {
                NodeKind::Element => self.compare_elements(control, test),
                NodeKind::Attribute => self.compare_attribute_pair(control, test),
                NodeKind::Text | NodeKind::Cdata | NodeKind::Comment => {
                    self.compare_character_data(control, test)
                }
                NodeKind::ProcessingInstruction => {
                    self.compare_processing_instructions(control, test)
                }
                NodeKind::Document => self.compare_documents(control, test),
                NodeKind::DocumentType => self.compare_doctypes(control, test),
            };
            if flow == Flow::Halt {
                return Flow::Halt;
            }
        }

        if control.kind == NodeKind::Document && test.kind == NodeKind::Document {
            self.recurse_into_document_elements(control, test)
        } else if control.kind != NodeKind::Attribute && test.kind != NodeKind::Attribute {
            self.compare_children(control, test)
        } else {
            Flow::Continue
        }
    }

    fn compare_elements(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let comparison = Comparison::new(
            ComparisonKind::ElementTagName,
            self.control_detail(control, Some(unqualified_name(control))),
            self.test_detail(test, Some(unqualified_name(test))),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        self.compare_attribute_sets(control, test)
    }

    /// Attribute pair compared directly as walk roots.
    fn compare_attribute_pair(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let comparison = Comparison::new(
            ComparisonKind::AttrValueExplicitlySpecified,
            self.control_detail(control, Some(control.specified.to_string())),
            self.test_detail(test, Some(test.specified.to_string())),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::AttrValue,
            self.control_detail(control, control.value.clone()),
            self.test_detail(test, test.value.clone()),
        );
        self.check(comparison)
    }

    fn compare_character_data(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let kind = if control.kind != test.kind {
            ComparisonKind::TextValue
        } else {
            match control.kind {
                NodeKind::Cdata => ComparisonKind::CdataValue,
                NodeKind::Comment => {
                    if self.options.ignore_comments {
                        return Flow::Continue;
                    }
                    ComparisonKind::CommentValue
                }
                _ => ComparisonKind::TextValue,
            }
        };
        let comparison = Comparison::new(
            kind,
            self.control_detail(control, control.value.clone()),
            self.test_detail(test, test.value.clone()),
        );
        self.check(comparison)
    }

    fn compare_processing_instructions(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let comparison = Comparison::new(
            ComparisonKind::ProcessingInstructionTarget,
            self.control_detail(control, Some(control.name.clone())),
            self.test_detail(test, Some(test.name.clone())),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::ProcessingInstructionData,
            self.control_detail(control, control.value.clone()),
            self.test_detail(test, test.value.clone()),
        );
        self.check(comparison)
    }

    fn compare_documents(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let control_doctype = control.doctype_node();
        let test_doctype = test.doctype_node();

        let comparison = Comparison::new(
            ComparisonKind::HasDoctypeDeclaration,
            self.control_detail(control, Some(control_doctype.is_some().to_string())),
            self.test_detail(test, Some(test_doctype.is_some().to_string())),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        if let (Some(control_doctype), Some(test_doctype)) = (control_doctype, test_doctype) {
            // Doctypes are filtered out of child lists; their pair is
            // compared here, at the document's own path.
            if self.compare_node_pair(control_doctype, test_doctype) == Flow::Halt {
                return Flow::Halt;
            }
        }

        let comparison = Comparison::new(
            ComparisonKind::XmlVersion,
            self.control_detail(control, control.xml_version.clone()),
            self.test_detail(test, test.xml_version.clone()),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::XmlStandalone,
            self.control_detail(control, Some(control.xml_standalone.to_string())),
            self.test_detail(test, Some(test.xml_standalone.to_string())),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::XmlEncoding,
            self.control_detail(control, control.xml_encoding.clone()),
            self.test_detail(test, test.xml_encoding.clone()),
        );
        self.check(comparison)
    }

    fn compare_doctypes(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        // All three checks are reported even when the first already
        // differs.
        let comparison = Comparison::new(
            ComparisonKind::DoctypeName,
            self.control_detail(control, Some(control.name.clone())),
            self.test_detail(test, Some(test.name.clone())),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::DoctypePublicId,
            self.control_detail(control, control.public_id.clone()),
            self.test_detail(test, test.public_id.clone()),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        let comparison = Comparison::new(
            ComparisonKind::DoctypeSystemId,
            self.control_detail(control, control.system_id.clone()),
            self.test_detail(test, test.system_id.clone()),
        );
        self.check(comparison)
    }

    fn compare_attribute_sets(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let control_visible: Vec<&XmlNode> = visible_attributes(control);
        let test_visible: Vec<&XmlNode> = visible_attributes(test);
        let control_regular: Vec<&XmlNode> = control_visible
            .iter()
            .copied()
            .filter(|attribute| !is_schema_instance(attribute))
            .collect();
        let test_regular: Vec<&XmlNode> = test_visible
            .iter()
            .copied()
            .filter(|attribute| !is_schema_instance(attribute))
            .collect();

        let comparison = Comparison::new(
            ComparisonKind::ElementNumAttributes,
            self.control_detail(control, Some(control_regular.len().to_string())),
            self.test_detail(test, Some(test_regular.len().to_string())),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }

        self.control_tracker.add_attributes(control_visible.iter().copied());
        self.test_tracker.add_attributes(test_visible.iter().copied());

        let mut consumed = vec![false; test_visible.len()];
        let mut control_regular_position = 0usize;

        for control_attr in control_visible.iter().copied() {
            if is_schema_instance(control_attr) {
                let matched = test_visible.iter().position(|candidate| {
                    candidate.namespace_uri == control_attr.namespace_uri
                        && candidate.name == control_attr.name
                });
                if let Some(j) = matched {
                    consumed[j] = true;
                }
                let flow = self.compare_schema_instance(
                    control,
                    test,
                    Some(control_attr),
                    matched.map(|j| test_visible[j]),
                    schema_instance_kind(control_attr),
                );
                if flow == Flow::Halt {
                    return Flow::Halt;
                }
                continue;
            }

            let position = control_regular_position;
            control_regular_position += 1;
            let matched = test_visible.iter().position(|candidate| {
                !is_schema_instance(candidate)
                    && candidate.namespace_uri == control_attr.namespace_uri
                    && candidate.name == control_attr.name
            });
            match matched {
                Some(j) => {
                    consumed[j] = true;
                    let test_attr = test_visible[j];
                    let flow =
                        self.compare_matched_attributes(control_attr, test_attr, position, &test_regular);
                    if flow == Flow::Halt {
                        return Flow::Halt;
                    }
                }
                None => {
                    let comparison = Comparison::new(
                        ComparisonKind::AttrNameLookup,
                        self.control_detail(control, Some(unqualified_name(control_attr))),
                        self.test_detail(test, None),
                    );
                    if self.check(comparison) == Flow::Halt {
                        return Flow::Halt;
                    }
                }
            }
        }

        for (j, test_attr) in test_visible.iter().copied().enumerate() {
            if consumed[j] {
                continue;
            }
            if is_schema_instance(test_attr) {
                let flow = self.compare_schema_instance(
                    control,
                    test,
                    None,
                    Some(test_attr),
                    schema_instance_kind(test_attr),
                );
                if flow == Flow::Halt {
                    return Flow::Halt;
                }
            } else {
                let comparison = Comparison::new(
                    ComparisonKind::AttrNameLookup,
                    self.control_detail(control, None),
                    self.test_detail(test, Some(unqualified_name(test_attr))),
                );
                if self.check(comparison) == Flow::Halt {
                    return Flow::Halt;
                }
            }
        }
        Flow::Continue
    }

    /// A matched regular attribute pair: sequence position, then prefix,
    /// then the specified flag and value.
    fn compare_matched_attributes(
        &mut self,
        control_attr: &XmlNode,
        test_attr: &XmlNode,
        control_position: usize,
        test_regular: &[&XmlNode],
    ) -> Flow {
        self.control_tracker.navigate_to_attribute(control_attr);
        self.test_tracker.navigate_to_attribute(test_attr);
        let flow = self.compare_matched_attributes_inner(
            control_attr,
            test_attr,
            control_position,
            test_regular,
        );
        self.control_tracker.navigate_to_parent();
        self.test_tracker.navigate_to_parent();
        flow
    }

    fn compare_matched_attributes_inner(
        &mut self,
        control_attr: &XmlNode,
        test_attr: &XmlNode,
        control_position: usize,
        test_regular: &[&XmlNode],
    ) -> Flow {
        if !self.options.ignore_attribute_order {
            let at_same_position = test_regular
                .get(control_position)
                .copied()
                .map(unqualified_name)
                .unwrap_or_else(|| ATTRIBUTE_ABSENT.to_string());
            let comparison = Comparison::new(
                ComparisonKind::AttrSequence,
                self.control_detail(control_attr, Some(unqualified_name(control_attr))),
                self.test_detail(test_attr, Some(at_same_position)),
            );
            if self.check(comparison) == Flow::Halt {
                return Flow::Halt;
            }
        }
        let comparison = Comparison::new(
            ComparisonKind::NamespacePrefix,
            self.control_detail(control_attr, control_attr.prefix.clone()),
            self.test_detail(test_attr, test_attr.prefix.clone()),
        );
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }
        self.compare_attribute_pair(control_attr, test_attr)
    }

    /// One of the two schema-instance location attributes, present on at
    /// least one side.
    fn compare_schema_instance(
        &mut self,
        control: &XmlNode,
        test: &XmlNode,
        control_attr: Option<&XmlNode>,
        test_attr: Option<&XmlNode>,
        kind: ComparisonKind,
    ) -> Flow {
        let control_detail = match control_attr {
            Some(attribute) => {
                self.control_tracker.navigate_to_attribute(attribute);
                let detail = self.control_detail(attribute, attribute.value.clone());
                self.control_tracker.navigate_to_parent();
                detail
            }
            None => self.control_detail(control, Some(ATTRIBUTE_ABSENT.to_string())),
        };
        let test_detail = match test_attr {
            Some(attribute) => {
                self.test_tracker.navigate_to_attribute(attribute);
                let detail = self.test_detail(attribute, attribute.value.clone());
                self.test_tracker.navigate_to_parent();
                detail
            }
            None => self.test_detail(test, Some(ATTRIBUTE_ABSENT.to_string())),
        };
        self.check(Comparison::new(kind, control_detail, test_detail))
    }

    fn recurse_into_document_elements(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let control_children = filtered_children(control, self.options.ignore_comments);
        let test_children = filtered_children(test, self.options.ignore_comments);
        self.control_tracker.set_children(control_children.iter().copied());
        self.test_tracker.set_children(test_children.iter().copied());

        let control_element = control_children
            .iter()
            .position(|child| child.kind == NodeKind::Element);
        let test_element = test_children
            .iter()
            .position(|child| child.kind == NodeKind::Element);
        if let (Some(control_index), Some(test_index)) = (control_element, test_element) {
            self.control_tracker.navigate_to_child(control_index);
            self.test_tracker.navigate_to_child(test_index);
            let flow =
                self.compare_node_pair(control_children[control_index], test_children[test_index]);
            self.control_tracker.navigate_to_parent();
            self.test_tracker.navigate_to_parent();
            return flow;
        }
        Flow::Continue
    }

    fn compare_children(&mut self, control: &XmlNode, test: &XmlNode) -> Flow {
        let control_children = filtered_children(control, self.options.ignore_comments);
        let test_children = filtered_children(test, self.options.ignore_comments);
        self.control_tracker.set_children(control_children.iter().copied());
        self.test_tracker.set_children(test_children.iter().copied());

        let comparison = if !control_children.is_empty() && !test_children.is_empty() {
            Comparison::new(
                ComparisonKind::ChildNodelistLength,
                self.control_detail(control, Some(control_children.len().to_string())),
                self.test_detail(test, Some(test_children.len().to_string())),
            )
        } else {
            Comparison::new(
                ComparisonKind::HasChildNodes,
                self.control_detail(control, Some((!control_children.is_empty()).to_string())),
                self.test_detail(test, Some((!test_children.is_empty()).to_string())),
            )
        };
        if self.check(comparison) == Flow::Halt {
            return Flow::Halt;
        }

        let script = reconcile_children(
            &control_children,
            &test_children,
            &self.selector,
            self.options.compare_unmatched,
            self.options.ignore_text_cdata,
        );

        for step in script.steps {
            match step {
                ChildStep::Matched {
                    control_index,
                    test_index,
                    sequence_equal,
                } => {
                    let control_child = control_children[control_index];
                    let test_child = test_children[test_index];
                    self.control_tracker.navigate_to_child(control_index);
                    self.test_tracker.navigate_to_child(test_index);

                    let mut flow = self.compare_node_pair(control_child, test_child);
                    if flow == Flow::Continue {
                        let comparison = Comparison::new(
                            ComparisonKind::ChildNodelistSequence,
                            self.control_detail(control_child, Some(control_index.to_string())),
                            self.test_detail(test_child, Some(test_index.to_string())),
                        );
                        let initial = if sequence_equal {
                            ComparisonOutcome::Equal
                        } else {
                            ComparisonOutcome::Different
                        };
                        flow = self.perform(comparison, initial);
                    }

                    self.control_tracker.navigate_to_parent();
                    self.test_tracker.navigate_to_parent();
                    if flow == Flow::Halt {
                        return Flow::Halt;
                    }
                }
                ChildStep::UnmatchedControl { control_index } => {
                    let control_child = control_children[control_index];
                    self.control_tracker.navigate_to_child(control_index);
                    let comparison = Comparison::new(
                        ComparisonKind::ChildLookup,
                        self.control_detail(control_child, Some(control_child.lookup_name())),
                        Detail::absent(),
                    );
                    let flow = self.check(comparison);
                    self.control_tracker.navigate_to_parent();
                    if flow == Flow::Halt {
                        return Flow::Halt;
                    }
                }
            }
        }

        for test_index in script.unmatched_test {
            let test_child = test_children[test_index];
            self.test_tracker.navigate_to_child(test_index);
            let comparison = Comparison::new(
                ComparisonKind::ChildLookup,
                Detail::absent(),
                self.test_detail(test_child, Some(test_child.lookup_name())),
            );
            let flow = self.check(comparison);
            self.test_tracker.navigate_to_parent();
            if flow == Flow::Halt {
                return Flow::Halt;
            }
        }
        Flow::Continue
    }

    fn control_detail<'a>(&self, target: &'a XmlNode, value: Option<String>) -> Detail<'a> {
        Detail::new(Some(target), Some(self.control_tracker.xpath()), value)
    }

    fn test_detail<'a>(&self, target: &'a XmlNode, value: Option<String>) -> Detail<'a> {
        Detail::new(Some(target), Some(self.test_tracker.xpath()), value)
    }
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn presence(node: Option<&XmlNode>) -> String {
    if node.is_some() { "present" } else { "absent" }.to_string()
}

/// Local name for namespaced nodes, the name as written otherwise.
fn unqualified_name(node: &XmlNode) -> String {
    if node.namespace_uri.is_some() {
        node.name.clone()
    } else {
        node.qualified_name()
    }
}

fn visible_attributes(element: &XmlNode) -> Vec<&XmlNode> {
    element
        .attributes
        .iter()
        .filter(|attribute| !attribute.is_namespace_declaration())
        .collect()
}

fn is_schema_instance(attribute: &XmlNode) -> bool {
    attribute.namespace_uri.as_deref() == Some(XSI_NAMESPACE)
        && (attribute.name == "schemaLocation" || attribute.name == "noNamespaceSchemaLocation")
}

fn schema_instance_kind(attribute: &XmlNode) -> ComparisonKind {
    if attribute.name == "schemaLocation" {
        ComparisonKind::SchemaLocation
    } else {
        ComparisonKind::NoNamespaceSchemaLocation
    }
}
