//! Outcome policies: hooks that may re-grade a proposed comparison outcome
//! before it is recorded.

use super::comparison::{Comparison, ComparisonKind, ComparisonOutcome};

/// Decides the final outcome of a single comparison.
///
/// The engine consults the evaluator for every comparison, equal or not,
/// passing the outcome it would record on its own. Whatever the evaluator
/// returns is what listeners see; returning
/// [`Critical`](ComparisonOutcome::Critical) halts the walk.
pub trait DifferenceEvaluator {
    fn evaluate(
        &mut self,
        comparison: &Comparison<'_>,
        proposed: ComparisonOutcome,
    ) -> ComparisonOutcome;
}

impl<F> DifferenceEvaluator for F
where
    F: FnMut(&Comparison<'_>, ComparisonOutcome) -> ComparisonOutcome,
{
    fn evaluate(
        &mut self,
        comparison: &Comparison<'_>,
        proposed: ComparisonOutcome,
    ) -> ComparisonOutcome {
        self(comparison, proposed)
    }
}

/// Keeps every proposed outcome as-is.
pub fn accept_all(_comparison: &Comparison<'_>, proposed: ComparisonOutcome) -> ComparisonOutcome {
    proposed
}

/// The engine default: DIFFERENT outcomes on recoverable kinds become
/// SIMILAR, everything else stands.
pub fn default_evaluator(
    comparison: &Comparison<'_>,
    proposed: ComparisonOutcome,
) -> ComparisonOutcome {
    if proposed == ComparisonOutcome::Different && comparison.kind.is_recoverable() {
        ComparisonOutcome::Similar
    } else {
        proposed
    }
}

/// Chain of evaluators consulted in order.
///
/// Every member is offered the original proposed outcome; the first one to
/// answer with something different wins. If none dissents, the proposed
/// outcome stands.
pub struct First {
    evaluators: Vec<Box<dyn DifferenceEvaluator>>,
}

/// Build a [`First`] chain.
pub fn first(evaluators: Vec<Box<dyn DifferenceEvaluator>>) -> First {
    First { evaluators }
}

impl DifferenceEvaluator for First {
    fn evaluate(
        &mut self,
        comparison: &Comparison<'_>,
        proposed: ComparisonOutcome,
    ) -> ComparisonOutcome {
        for evaluator in &mut self.evaluators {
            let outcome = evaluator.evaluate(comparison, proposed);
            if outcome != proposed {
                return outcome;
            }
        }
        proposed
    }
}

/// Rewrites outcomes for a fixed list of comparison kinds; built through
/// [`downgrade_to_equal`], [`downgrade_to_similar`] or
/// [`upgrade_to_different`].
pub struct KindOutcomeRewrite {
    kinds: Vec<ComparisonKind>,
    target: ComparisonOutcome,
    upgrade: bool,
}

impl DifferenceEvaluator for KindOutcomeRewrite {
    fn evaluate(
        &mut self,
        comparison: &Comparison<'_>,
        proposed: ComparisonOutcome,
    ) -> ComparisonOutcome {
        if !self.kinds.contains(&comparison.kind) {
            return proposed;
        }
        let applies = if self.upgrade {
            proposed > ComparisonOutcome::Equal && proposed < self.target
        } else {
            proposed > self.target
        };
        if applies {
            self.target
        } else {
            proposed
        }
    }
}

/// Treat any outcome on the listed kinds as EQUAL.
pub fn downgrade_to_equal(kinds: Vec<ComparisonKind>) -> KindOutcomeRewrite {
    KindOutcomeRewrite {
        kinds,
        target: ComparisonOutcome::Equal,
        upgrade: false,
    }
}

/// Cap outcomes on the listed kinds at SIMILAR.
pub fn downgrade_to_similar(kinds: Vec<ComparisonKind>) -> KindOutcomeRewrite {
    KindOutcomeRewrite {
        kinds,
        target: ComparisonOutcome::Similar,
        upgrade: false,
    }
}

/// Raise SIMILAR outcomes on the listed kinds to DIFFERENT.
pub fn upgrade_to_different(kinds: Vec<ComparisonKind>) -> KindOutcomeRewrite {
    KindOutcomeRewrite {
        kinds,
        target: ComparisonOutcome::Different,
        upgrade: true,
    }
}

/// Wrapper that turns an inner DIFFERENT into CRITICAL, stopping the walk
/// at the first hard difference. Used by the yes/no convenience checks.
pub struct HaltOnDifferent<E> {
    inner: E,
}

pub fn halt_on_different<E: DifferenceEvaluator>(inner: E) -> HaltOnDifferent<E> {
    HaltOnDifferent { inner }
}

impl<E: DifferenceEvaluator> DifferenceEvaluator for HaltOnDifferent<E> {
    fn evaluate(
        &mut self,
        comparison: &Comparison<'_>,
        proposed: ComparisonOutcome,
    ) -> ComparisonOutcome {
        match self.inner.evaluate(comparison, proposed) {
            ComparisonOutcome::Different => ComparisonOutcome::Critical,
            outcome => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::comparison::Detail;

    fn text_comparison(control: &str, test: &str) -> (String, String) {
        (control.to_string(), test.to_string())
    }

    fn comparison_of<'a>(
        kind: ComparisonKind,
        values: &'a (String, String),
    ) -> Comparison<'a> {
        Comparison::new(
            kind,
            Detail::new(None, Some("/".to_string()), Some(values.0.clone())),
            Detail::new(None, Some("/".to_string()), Some(values.1.clone())),
        )
    }

    fn always_equal(_: &Comparison<'_>, _: ComparisonOutcome) -> ComparisonOutcome {
        ComparisonOutcome::Equal
    }

    fn always_similar(_: &Comparison<'_>, _: ComparisonOutcome) -> ComparisonOutcome {
        ComparisonOutcome::Similar
    }

    struct Recording {
        seen: std::rc::Rc<std::cell::RefCell<Vec<ComparisonOutcome>>>,
        answer: Option<ComparisonOutcome>,
    }

    impl DifferenceEvaluator for Recording {
        fn evaluate(
            &mut self,
            _comparison: &Comparison<'_>,
            proposed: ComparisonOutcome,
        ) -> ComparisonOutcome {
            self.seen.borrow_mut().push(proposed);
            self.answer.unwrap_or(proposed)
        }
    }

    #[test]
    fn default_evaluator_downgrades_recoverable_kinds_only() {
        let values = text_comparison("a", "b");
        let prefix = comparison_of(ComparisonKind::NamespacePrefix, &values);
        let text = comparison_of(ComparisonKind::TextValue, &values);

        assert_eq!(
            default_evaluator(&prefix, ComparisonOutcome::Different),
            ComparisonOutcome::Similar
        );
        assert_eq!(
            default_evaluator(&text, ComparisonOutcome::Different),
            ComparisonOutcome::Different
        );
        assert_eq!(
            default_evaluator(&prefix, ComparisonOutcome::Equal),
            ComparisonOutcome::Equal
        );
    }

    #[test]
    fn empty_first_chain_keeps_the_proposed_outcome() {
        let values = text_comparison("a", "b");
        let comparison = comparison_of(ComparisonKind::TextValue, &values);
        let mut chain = first(Vec::new());
        assert_eq!(
            chain.evaluate(&comparison, ComparisonOutcome::Different),
            ComparisonOutcome::Different
        );
    }

    #[test]
    fn first_returns_the_first_dissenting_answer() {
        let values = text_comparison("a", "b");
        let comparison = comparison_of(ComparisonKind::TextValue, &values);
        let mut chain = first(vec![
            Box::new(accept_all),
            Box::new(always_equal),
            Box::new(always_similar),
        ]);
        assert_eq!(
            chain.evaluate(&comparison, ComparisonOutcome::Different),
            ComparisonOutcome::Equal
        );
    }

    #[test]
    fn first_offers_every_member_the_original_outcome() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let values = text_comparison("a", "b");
        let comparison = comparison_of(ComparisonKind::TextValue, &values);

        let mut chain = first(vec![
            Box::new(Recording {
                seen: seen.clone(),
                answer: None,
            }),
            Box::new(Recording {
                seen: seen.clone(),
                answer: Some(ComparisonOutcome::Similar),
            }),
        ]);
        assert_eq!(
            chain.evaluate(&comparison, ComparisonOutcome::Different),
            ComparisonOutcome::Similar
        );
        assert_eq!(
            *seen.borrow(),
            vec![ComparisonOutcome::Different, ComparisonOutcome::Different]
        );
    }

    #[test]
    fn kind_list_rewrites_apply_to_their_kinds_only() {
        let values = text_comparison("a", "b");
        let text = comparison_of(ComparisonKind::TextValue, &values);
        let attr = comparison_of(ComparisonKind::AttrValue, &values);

        let mut down = downgrade_to_equal(vec![ComparisonKind::TextValue]);
        assert_eq!(
            down.evaluate(&text, ComparisonOutcome::Different),
            ComparisonOutcome::Equal
        );
        assert_eq!(
            down.evaluate(&attr, ComparisonOutcome::Different),
            ComparisonOutcome::Different
        );

        let mut cap = downgrade_to_similar(vec![ComparisonKind::TextValue]);
        assert_eq!(
            cap.evaluate(&text, ComparisonOutcome::Critical),
            ComparisonOutcome::Similar
        );
        assert_eq!(
            cap.evaluate(&text, ComparisonOutcome::Equal),
            ComparisonOutcome::Equal
        );

        let mut up = upgrade_to_different(vec![ComparisonKind::TextValue]);
        assert_eq!(
            up.evaluate(&text, ComparisonOutcome::Similar),
            ComparisonOutcome::Different
        );
        assert_eq!(
            up.evaluate(&text, ComparisonOutcome::Equal),
            ComparisonOutcome::Equal
        );
    }

    #[test]
    fn halt_on_different_escalates_hard_differences() {
        let values = text_comparison("a", "b");
        let prefix = comparison_of(ComparisonKind::NamespacePrefix, &values);
        let text = comparison_of(ComparisonKind::TextValue, &values);

        let mut halting = halt_on_different(default_evaluator);
        assert_eq!(
            halting.evaluate(&text, ComparisonOutcome::Different),
            ComparisonOutcome::Critical
        );
        assert_eq!(
            halting.evaluate(&prefix, ComparisonOutcome::Different),
            ComparisonOutcome::Similar
        );
        assert_eq!(
            halting.evaluate(&text, ComparisonOutcome::Equal),
            ComparisonOutcome::Equal
        );
    }
}
