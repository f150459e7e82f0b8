//! Core XML tree comparison.

pub mod comparison;
pub mod engine;
pub mod evaluate;
mod reconcile;
pub mod select;
pub mod xpath;

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

pub use comparison::{
    Comparison, ComparisonKind, ComparisonOutcome, Detail, Difference, UnknownComparisonKind,
};
pub use engine::{ComparisonEngine, ComparisonListener, ComparisonOptions, StopSignal};
pub use evaluate::{
    accept_all, default_evaluator, downgrade_to_equal, downgrade_to_similar, first,
    halt_on_different, upgrade_to_different, DifferenceEvaluator,
};
pub use select::{
    by_name, by_name_and_all_attributes, by_name_and_attributes, by_name_and_text,
    by_name_and_text_recursive, ElementSelector,
};
pub use xpath::XpathTracker;

use crate::transform::{normalize_whitespace, strip_comments, strip_whitespace};
use crate::tree::XmlNode;

/// Everything one comparison run found, in walk order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub differences: Vec<Difference>,
}

impl ComparisonReport {
    /// No differences at all.
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty()
    }

    /// Nothing graded worse than SIMILAR.
    pub fn is_similar(&self) -> bool {
        self.differences
            .iter()
            .all(|difference| difference.outcome == ComparisonOutcome::Similar)
    }
}

/// Compare two trees with default options and collect every difference.
pub fn compare(control: &XmlNode, test: &XmlNode) -> ComparisonReport {
    compare_with_options(control, test, &ComparisonOptions::default())
}

/// Compare two trees and collect every difference.
///
/// Whitespace and comment options are applied as tree rewrites before the
/// walk starts; recoverable differences come back graded SIMILAR.
pub fn compare_with_options(
    control: &XmlNode,
    test: &XmlNode,
    options: &ComparisonOptions,
) -> ComparisonReport {
    compare_with(control, test, options, by_name(), Box::new(default_evaluator))
}

/// Compare two trees with an explicit element selector and difference
/// evaluator, collecting every difference the evaluator lets stand.
pub fn compare_with(
    control: &XmlNode,
    test: &XmlNode,
    options: &ComparisonOptions,
    selector: ElementSelector,
    evaluator: Box<dyn DifferenceEvaluator>,
) -> ComparisonReport {
    let control = prepare(control, options);
    let test = prepare(test, options);

    let collected: Rc<RefCell<Vec<Difference>>> = Rc::default();
    let sink = collected.clone();
    let mut engine = ComparisonEngine::with_options(options.clone());
    engine.set_element_selector(selector);
    engine.set_evaluator(evaluator);
    engine.add_difference_listener(Box::new(move |comparison, outcome| {
        sink.borrow_mut()
            .push(Difference::from_comparison(comparison, outcome));
    }));
    engine.compare(&control, &test);

    ComparisonReport {
        differences: collected.take(),
    }
}

/// Whether two trees are exactly alike. Stops at the first difference.
pub fn are_identical(control: &XmlNode, test: &XmlNode) -> bool {
    let mut engine = ComparisonEngine::new();
    engine.set_evaluator(Box::new(halt_on_different(accept_all)));
    run_halting(&mut engine, control, test)
}

/// Whether two trees differ in recoverable ways at worst. Stops at the
/// first hard difference.
pub fn are_similar(control: &XmlNode, test: &XmlNode) -> bool {
    let mut engine = ComparisonEngine::new();
    engine.set_evaluator(Box::new(halt_on_different(default_evaluator)));
    run_halting(&mut engine, control, test)
}

fn run_halting(engine: &mut ComparisonEngine, control: &XmlNode, test: &XmlNode) -> bool {
    let failed = Rc::new(Cell::new(false));
    let flag = failed.clone();
    engine.add_difference_listener(Box::new(move |_, outcome| {
        if outcome > ComparisonOutcome::Similar {
            flag.set(true);
        }
    }));
    engine.compare(control, test);
    !failed.get()
}

fn prepare<'a>(node: &'a XmlNode, options: &ComparisonOptions) -> Cow<'a, XmlNode> {
    let mut prepared = Cow::Borrowed(node);
    if options.ignore_whitespace {
        prepared = Cow::Owned(strip_whitespace(&prepared));
    }
    if options.ignore_comments {
        prepared = Cow::Owned(strip_comments(&prepared));
    }
    if options.normalize_whitespace {
        prepared = Cow::Owned(normalize_whitespace(&prepared));
    }
    prepared
}
