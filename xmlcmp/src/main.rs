use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use xml_compare_core::compare::{
    by_name, by_name_and_all_attributes, by_name_and_text, by_name_and_text_recursive,
    ElementSelector,
};
use xml_compare_core::{compare_with, parse_file, ComparisonOptions, ComparisonReport, Difference};
use xmlcmp::inspect::{render_tree, tree_stats};
use xmlcmp::profile::ComparisonProfile;
use xmlcmp::report::{render_summary, render_text};

mod cli;

use cli::{AssertLevel, Cli, Command, CompareArgs, InspectArgs, OutputFormat, SelectorKind};

#[derive(Serialize)]
struct JsonReport<'a> {
    identical: bool,
    similar: bool,
    differences: &'a [Difference],
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let control = parse_file(&args.file1)
        .with_context(|| format!("failed to parse {}", args.file1.display()))?;
    let test = parse_file(&args.file2)
        .with_context(|| format!("failed to parse {}", args.file2.display()))?;

    let profile = match &args.profile {
        Some(path) => ComparisonProfile::load(path)
            .with_context(|| format!("failed to load profile {}", path.display()))?,
        None => ComparisonProfile::embedded_default(),
    };

    let options = effective_options(&profile, &args);
    let selector = match args.selector {
        Some(kind) => selector_for(kind),
        None => profile.element_selector()?,
    };
    let evaluator = profile.difference_evaluator()?;

    let report = compare_with(&control, &test, &options, selector, evaluator);
    render(&args, &report)?;

    if let Some(level) = args.assert_level {
        match level {
            AssertLevel::Identical if !report.is_identical() => bail!(
                "documents are not identical ({} differences)",
                report.differences.len()
            ),
            AssertLevel::Similar if !report.is_similar() => bail!("documents are not similar"),
            _ => {}
        }
    }

    Ok(())
}

/// Profile values first, command-line flags on top.
fn effective_options(profile: &ComparisonProfile, args: &CompareArgs) -> ComparisonOptions {
    let mut options = profile.comparison_options();
    if args.ignore_whitespace {
        options.ignore_whitespace = true;
    }
    if args.normalize_whitespace {
        options.normalize_whitespace = true;
    }
    if args.ignore_comments {
        options.ignore_comments = true;
    }
    if args.check_attribute_order {
        options.ignore_attribute_order = false;
    }
    if args.ignore_text_cdata {
        options.ignore_text_cdata = true;
    }
    if args.no_compare_unmatched {
        options.compare_unmatched = false;
    }
    options
}

fn selector_for(kind: SelectorKind) -> ElementSelector {
    match kind {
        SelectorKind::ByName => by_name(),
        SelectorKind::ByNameAndText => by_name_and_text(),
        SelectorKind::ByNameAndTextRecursive => by_name_and_text_recursive(),
        SelectorKind::ByNameAndAllAttributes => by_name_and_all_attributes(),
    }
}

fn render(args: &CompareArgs, report: &ComparisonReport) -> Result<()> {
    if args.quiet {
        return Ok(());
    }
    if args.summary {
        println!("{}", render_summary(&report.differences));
        return Ok(());
    }
    match args.format {
        OutputFormat::Text => {
            if report.is_identical() {
                println!("documents are identical");
            } else {
                println!("{}", render_text(&report.differences));
                println!();
                println!("{}", render_summary(&report.differences));
            }
        }
        OutputFormat::Json => {
            let payload = JsonReport {
                identical: report.is_identical(),
                similar: report.is_similar(),
                differences: &report.differences,
            };
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let document = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    if args.stats {
        let stats = tree_stats(&document);
        println!(
            "elements={} attributes={} text={} cdata={} comments={} processing_instructions={}",
            stats.elements,
            stats.attributes,
            stats.text,
            stats.cdata,
            stats.comments,
            stats.processing_instructions
        );
    }

    print!("{}", render_tree(&document, args.depth));
    Ok(())
}
