//! Integration tests for report rendering

use program_finder::core::report::{
    reporter_for, HtmlReporter, MarkdownReporter, ReportContext, ReportFormat, ReportGenerator,
};
use program_finder::{Catalog, SubjectLedger};
use std::fs;
use tempfile::TempDir;

fn sample_ledger() -> SubjectLedger {
    let mut ledger = SubjectLedger::new();
    ledger.add_subject("math", "Mathematics", "65").unwrap();
    ledger
        .add_subject("english", "English Home Language", "55")
        .unwrap();
    ledger.add_subject("accounting", "Accounting", "70").unwrap();
    ledger
}

#[test]
fn markdown_lists_subjects_and_ranked_programs() {
    let catalog = Catalog::builtin();
    let ledger = sample_ledger();
    let results = catalog.rank(&ledger);
    let ctx = ReportContext::new(&ledger, &results);

    let markdown = MarkdownReporter::new().render(&ctx).expect("render markdown");

    assert!(markdown.starts_with("# Program Matches"));
    assert!(markdown.contains("| Mathematics | 65% | medium |"));
    assert!(markdown.contains("### 1. 💼 BCom Accounting (BCOM-ACC)"));
    assert!(markdown.contains("You qualify! Match: 85%"));
    assert!(markdown.contains("Missing required subject: physical-science"));
}

#[test]
fn qualifying_only_hides_blocked_programs() {
    let catalog = Catalog::builtin();
    let ledger = sample_ledger();
    let results = catalog.rank(&ledger);
    let ctx = ReportContext {
        qualifying_only: true,
        ..ReportContext::new(&ledger, &results)
    };

    let markdown = MarkdownReporter::new().render(&ctx).expect("render markdown");
    assert!(markdown.contains("BCom Accounting"));
    assert!(!markdown.contains("BSc Chemistry"));
    assert!(!markdown.contains("Missing requirements"));
}

#[test]
fn html_escapes_catalog_text() {
    let mut catalog_toml = String::from(
        "[[program]]\nid = \"ba-arts\"\ntitle = \"BA <Fine> Arts & Design\"\ncode = \"BA-FA\"\n",
    );
    catalog_toml.push_str("careers = [\"Curator\"]\n");
    let catalog = Catalog::from_toml(&catalog_toml).expect("catalog parses");
    let ledger = sample_ledger();
    let results = catalog.rank(&ledger);
    let ctx = ReportContext::new(&ledger, &results);

    let html = HtmlReporter::new().render(&ctx).expect("render html");

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("BA &lt;Fine&gt; Arts &amp; Design"));
    assert!(!html.contains("<Fine>"));
    assert!(html.contains("Curator"));
}

#[test]
fn generate_writes_file_and_creates_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog = Catalog::builtin();
    let ledger = sample_ledger();
    let results = catalog.rank(&ledger);
    let ctx = ReportContext::new(&ledger, &results);

    for format in [ReportFormat::Markdown, ReportFormat::Html] {
        let path = temp_dir
            .path()
            .join("nested")
            .join(format!("matches.{}", format.extension()));
        reporter_for(format)
            .generate(&ctx, &path)
            .expect("report should be written");

        let content = fs::read_to_string(&path).expect("report exists");
        assert!(content.contains("BCom Accounting"));
    }
}
