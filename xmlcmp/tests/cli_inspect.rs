use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_prints_the_tree_with_attributes() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xmlcmp"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/book-control.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("#document"))
        .stdout(predicate::str::contains("library (urn:example:library)"))
        .stdout(predicate::str::contains("book (urn:example:library)"))
        .stdout(predicate::str::contains("@lang=\"en\""))
        .stdout(predicate::str::contains("title"))
        .stdout(predicate::str::contains("Daffodil").not());
}

#[test]
fn inspect_depth_limits_the_output() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xmlcmp"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/book-control.xml"))
        .arg("--depth")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("library"))
        .stdout(predicate::str::contains("book").not());
}

#[test]
fn inspect_shows_doctype_and_text_nodes() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xmlcmp"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/doc-control.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("!doctype greeting"))
        .stdout(predicate::str::contains("greeting"))
        .stdout(predicate::str::contains("#text \"hi\""));
}

#[test]
fn inspect_stats_counts_nodes() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xmlcmp"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/catalog-control.xml"))
        .arg("--stats")
        .arg("--depth")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "elements=4 attributes=2 text=0 cdata=0 comments=0 processing_instructions=0",
        ))
        .stdout(predicate::str::contains("#document"))
        .stdout(predicate::str::contains("catalog").not());
}

#[test]
fn inspect_rejects_unparseable_input() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xmlcmp"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/invalid.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
