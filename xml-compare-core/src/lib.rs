//! XML tree comparison primitives used by higher-level tools.

pub mod compare;
pub mod format;
pub mod parser;
pub mod transform;
pub mod tree;

pub use compare::{
    are_identical, are_similar, compare, compare_with, compare_with_options, ComparisonEngine,
    ComparisonKind, ComparisonOptions, ComparisonOutcome, ComparisonReport, Difference,
};
pub use format::{format_json, format_summary, format_text};
pub use parser::{parse, parse_file, ParseError};
pub use tree::{NodeKind, XmlNode};
