use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xmlcmp")]
#[command(about = "Compare XML documents and report every difference with its XPath")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare two XML files and list their differences.
    Compare(CompareArgs),
    /// Show the parsed structure of a single XML file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    pub file1: PathBuf,
    pub file2: PathBuf,
    /// Drop whitespace-only text nodes and trim the rest before comparing.
    #[arg(long)]
    pub ignore_whitespace: bool,
    /// Collapse whitespace runs inside text to single spaces before comparing.
    #[arg(long)]
    pub normalize_whitespace: bool,
    /// Leave comment nodes out of the comparison.
    #[arg(long)]
    pub ignore_comments: bool,
    /// Report attribute order differences instead of ignoring them.
    #[arg(long)]
    pub check_attribute_order: bool,
    /// Let text nodes match CDATA sections.
    #[arg(long)]
    pub ignore_text_cdata: bool,
    /// Report leftover children as lookup failures instead of pairing them.
    #[arg(long)]
    pub no_compare_unmatched: bool,
    /// How child elements are paired between the two documents.
    #[arg(long, value_enum)]
    pub selector: Option<SelectorKind>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print only the summary counts.
    #[arg(long)]
    pub summary: bool,
    #[arg(short, long)]
    pub quiet: bool,
    /// Exit nonzero unless the documents reach the given verdict.
    #[arg(long = "assert", value_enum)]
    pub assert_level: Option<AssertLevel>,
    /// Comparison profile TOML file.
    #[arg(long)]
    pub profile: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
    /// Print node counts before the tree.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AssertLevel {
    Identical,
    Similar,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SelectorKind {
    ByName,
    ByNameAndText,
    ByNameAndTextRecursive,
    ByNameAndAllAttributes,
}
