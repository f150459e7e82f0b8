use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use xml_compare_core::compare::evaluate::{
    default_evaluator, downgrade_to_equal, downgrade_to_similar, first, upgrade_to_different,
    DifferenceEvaluator, First, KindOutcomeRewrite,
};
use xml_compare_core::compare::select::{
    by_name, by_name_and_all_attributes, by_name_and_text, by_name_and_text_recursive,
    ElementSelector,
};
use xml_compare_core::compare::{Comparison, UnknownComparisonKind};
use xml_compare_core::{ComparisonKind, ComparisonOptions, ComparisonOutcome};

/// Problems loading or interpreting a comparison profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse profile: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown element selector `{0}`")]
    UnknownSelector(String),
    #[error("{0}")]
    Kind(#[from] UnknownComparisonKind),
}

/// A comparison profile: engine options plus the matching and grading
/// policies, loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComparisonProfile {
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub options: ProfileOptions,
    #[serde(default)]
    pub evaluator: EvaluatorRules,
}

/// Engine switches as they appear in a profile's `[options]` table. Every
/// field defaults to the engine default, so partial profiles work.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    pub ignore_whitespace: bool,
    pub normalize_whitespace: bool,
    pub ignore_comments: bool,
    pub ignore_attribute_order: bool,
    pub ignore_text_cdata: bool,
    pub compare_unmatched: bool,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        let defaults = ComparisonOptions::default();
        Self {
            ignore_whitespace: defaults.ignore_whitespace,
            normalize_whitespace: defaults.normalize_whitespace,
            ignore_comments: defaults.ignore_comments,
            ignore_attribute_order: defaults.ignore_attribute_order,
            ignore_text_cdata: defaults.ignore_text_cdata,
            compare_unmatched: defaults.compare_unmatched,
        }
    }
}

/// Outcome rewrites from a profile's `[evaluator]` table, as comparison
/// kind names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvaluatorRules {
    pub downgrade_to_equal: Vec<String>,
    pub downgrade_to_similar: Vec<String>,
    pub upgrade_to_different: Vec<String>,
}

impl ComparisonProfile {
    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// The profile shipped inside the binary. Mirrors the engine defaults;
    /// a test keeps it parseable.
    pub fn embedded_default() -> Self {
        toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/profiles/default.toml"
        )))
        .unwrap_or_default()
    }

    /// Engine options as configured.
    pub fn comparison_options(&self) -> ComparisonOptions {
        ComparisonOptions {
            ignore_whitespace: self.options.ignore_whitespace,
            normalize_whitespace: self.options.normalize_whitespace,
            ignore_comments: self.options.ignore_comments,
            ignore_attribute_order: self.options.ignore_attribute_order,
            ignore_text_cdata: self.options.ignore_text_cdata,
            compare_unmatched: self.options.compare_unmatched,
        }
    }

    /// Element selector named by the profile; `by_name` when unset.
    pub fn element_selector(&self) -> Result<ElementSelector, ProfileError> {
        match self.selector.as_deref() {
            None | Some("by_name") => Ok(by_name()),
            Some("by_name_and_text") => Ok(by_name_and_text()),
            Some("by_name_and_text_recursive") => Ok(by_name_and_text_recursive()),
            Some("by_name_and_all_attributes") => Ok(by_name_and_all_attributes()),
            Some(other) => Err(ProfileError::UnknownSelector(other.to_string())),
        }
    }

    /// Difference evaluator with the profile rewrites layered over the
    /// default grading.
    pub fn difference_evaluator(&self) -> Result<Box<dyn DifferenceEvaluator>, ProfileError> {
        let equal = parse_kinds(&self.evaluator.downgrade_to_equal)?;
        let similar = parse_kinds(&self.evaluator.downgrade_to_similar)?;
        let different = parse_kinds(&self.evaluator.upgrade_to_different)?;

        Ok(Box::new(ProfileEvaluator {
            rewrites: first(vec![
                Box::new(downgrade_to_equal(equal)),
                Box::new(downgrade_to_similar(similar)),
                Box::new(default_evaluator),
            ]),
            raise: upgrade_to_different(different),
        }))
    }
}

fn parse_kinds(names: &[String]) -> Result<Vec<ComparisonKind>, ProfileError> {
    names
        .iter()
        .map(|name| name.parse::<ComparisonKind>().map_err(ProfileError::from))
        .collect()
}

/// Downgrades are consulted before the default grading; upgrades apply to
/// whatever that chain settles on, so a kind the default grading marks
/// SIMILAR can still be raised back to DIFFERENT.
struct ProfileEvaluator {
    rewrites: First,
    raise: KindOutcomeRewrite,
}

impl DifferenceEvaluator for ProfileEvaluator {
    fn evaluate(
        &mut self,
        comparison: &Comparison<'_>,
        proposed: ComparisonOutcome,
    ) -> ComparisonOutcome {
        let outcome = self.rewrites.evaluate(comparison, proposed);
        self.raise.evaluate(comparison, outcome)
    }
}
