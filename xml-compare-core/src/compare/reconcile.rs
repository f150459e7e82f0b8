//! Child-list reconciliation: pairing the children of a control node with
//! the children of a test node so matched pairs can be compared
//! recursively even when children were reordered, inserted or removed.

use std::collections::VecDeque;

use super::select::ElementSelector;
use crate::tree::{NodeKind, XmlNode};

/// One entry of the reconciliation script, in reporting (control) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildStep {
    /// Compare this control/test pair recursively, then report their
    /// sequence positions. `sequence_equal` is the precomputed outcome of
    /// that check: the pair occupies the same rank among all reported
    /// pairs on both sides.
    Matched {
        control_index: usize,
        test_index: usize,
        sequence_equal: bool,
    },
    /// Control child with no counterpart on the test side.
    UnmatchedControl { control_index: usize },
}

/// Result of reconciling two filtered child lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildReconciliation {
    /// Steps to report, in control order.
    pub steps: Vec<ChildStep>,
    /// Test children never paired with any control child, in test order.
    pub unmatched_test: Vec<usize>,
}

/// Children as the reconciler and the path trackers see them: document
/// types never take part, comments only when they are not ignored.
pub fn filtered_children(node: &XmlNode, ignore_comments: bool) -> Vec<&XmlNode> {
    node.children
        .iter()
        .filter(|child| child.kind != NodeKind::DocumentType)
        .filter(|child| !(ignore_comments && child.kind == NodeKind::Comment))
        .collect()
}

/// Whether the two kinds form a text/CDATA pair covered by the
/// ignore-text-vs-cdata relaxation.
pub(crate) fn text_cdata_pair(control: NodeKind, test: NodeKind) -> bool {
    matches!(control, NodeKind::Text | NodeKind::Cdata)
        && matches!(test, NodeKind::Text | NodeKind::Cdata)
}

fn kinds_match(control: &XmlNode, test: &XmlNode, relax_text_cdata: bool) -> bool {
    control.kind == test.kind || (relax_text_cdata && text_cdata_pair(control.kind, test.kind))
}

/// Pair two filtered child lists.
///
/// Matching scans the test list from the control child's own position,
/// wrapping around once, and takes the first unconsumed child of a
/// matching kind (elements additionally have to satisfy the selector). A
/// matching but already consumed candidate is remembered; with
/// `compare_unmatched` enabled it is used as a last resort, so one test
/// child can end up paired with several control children. Control
/// children still unmatched afterwards are paired front-to-back with
/// never-matched test children when `compare_unmatched` is enabled.
pub fn reconcile_children(
    control: &[&XmlNode],
    test: &[&XmlNode],
    selector: &ElementSelector,
    compare_unmatched: bool,
    relax_text_cdata: bool,
) -> ChildReconciliation {
    let mut matches: Vec<Option<usize>> = vec![None; control.len()];
    let mut consumed = vec![false; test.len()];

    for (i, control_child) in control.iter().enumerate() {
        if test.is_empty() {
            break;
        }
        let start_at = i.min(test.len() - 1);
        let mut j = start_at;
        let mut fallback: Option<usize> = None;
        let mut matched: Option<usize> = None;
        loop {
            let candidate = test[j];
            if kinds_match(control_child, candidate, relax_text_cdata)
                && (control_child.kind != NodeKind::Element || selector(control_child, candidate))
            {
                if !consumed[j] {
                    matched = Some(j);
                    break;
                }
                if fallback.is_none() {
                    fallback = Some(j);
                }
            }
            j = (j + 1) % test.len();
            if j == start_at {
                if compare_unmatched {
                    matched = fallback;
                }
                break;
            }
        }
        if let Some(j) = matched {
            matches[i] = Some(j);
            consumed[j] = true;
        }
    }

    let mut pool: VecDeque<usize> = (0..test.len()).filter(|&j| !consumed[j]).collect();
    let mut resolved: Vec<Option<usize>> = Vec::with_capacity(matches.len());
    for matched in matches {
        match matched {
            Some(j) => resolved.push(Some(j)),
            None => {
                if compare_unmatched {
                    if let Some(j) = pool.pop_front() {
                        resolved.push(Some(j));
                        continue;
                    }
                }
                resolved.push(None);
            }
        }
    }
    let unmatched_test: Vec<usize> = pool.into_iter().collect();

    // Rank every reported pair on both sides: reporting order on the
    // control side, stable order by test index on the test side. A pair
    // holding the same rank on both sides is in sequence even when raw
    // indices were shifted by an insertion or removal.
    let pair_test_indices: Vec<usize> = resolved.iter().filter_map(|entry| *entry).collect();
    let mut by_test: Vec<usize> = (0..pair_test_indices.len()).collect();
    by_test.sort_by_key(|&position| pair_test_indices[position]);
    let mut test_rank = vec![0usize; pair_test_indices.len()];
    for (rank, &position) in by_test.iter().enumerate() {
        test_rank[position] = rank;
    }

    let mut steps = Vec::with_capacity(resolved.len());
    let mut pair_position = 0usize;
    for (control_index, entry) in resolved.into_iter().enumerate() {
        match entry {
            Some(test_index) => {
                steps.push(ChildStep::Matched {
                    control_index,
                    test_index,
                    sequence_equal: test_rank[pair_position] == pair_position,
                });
                pair_position += 1;
            }
            None => steps.push(ChildStep::UnmatchedControl { control_index }),
        }
    }

    ChildReconciliation {
        steps,
        unmatched_test,
    }
}
