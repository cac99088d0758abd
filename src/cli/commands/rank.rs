//! `rank` and `match` command handlers

use super::{ledger_or_exit, load_catalog, load_registry};
use program_finder::config::Config;
use program_finder::core::matching::{calculate_match, MatchResult};
use program_finder::core::models::SubjectLedger;
use program_finder::core::ranking::RankedProgram;
use program_finder::core::report::{reporter_for, ReportContext, ReportFormat};
use program_finder::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Default report file name, without extension
const REPORT_STEM: &str = "program-matches";

/// Options for `rank`
#[derive(Debug)]
pub struct RankOptions<'a> {
    /// `id=pct` arguments
    pub subjects: &'a [String],
    /// Optional TOML ledger file
    pub ledger: Option<&'a Path>,
    /// Hide programs the learner does not qualify for
    pub qualifying_only: bool,
    /// Also write a report in this format
    pub report: Option<ReportFormat>,
    /// Report path override
    pub output: Option<&'a Path>,
}

/// Rank the catalog against the learner's subjects and print a table
pub fn run(options: &RankOptions, config: &Config) {
    let registry = load_registry(config);
    let catalog = load_catalog(config, &registry);
    let ledger = ledger_or_exit(options.subjects, options.ledger, &registry);

    print_ledger(&ledger);

    let results = match config.ranking_policy().rank(catalog.programs(), &ledger) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };
    info!("Ranked {} programs for {} subjects", results.len(), ledger.count());

    print_table(&results, options.qualifying_only);

    if let Some(format) = options.report {
        let path = options
            .output
            .map_or_else(|| default_report_path(config, format), Path::to_path_buf);
        let ctx = ReportContext {
            career_preview: config.finder.career_preview,
            qualifying_only: options.qualifying_only,
            ..ReportContext::new(&ledger, &results)
        };
        match reporter_for(format).generate(&ctx, &path) {
            Ok(()) => println!("✓ Report generated: {}", path.display()),
            Err(e) => {
                error!("Report generation failed: {e}");
                eprintln!("✗ Failed to write report to {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }
}

/// Show the full match for one program
pub fn run_match(program_id: &str, subjects: &[String], ledger_file: Option<&Path>, config: &Config) {
    let registry = load_registry(config);
    let catalog = load_catalog(config, &registry);

    let Some(program) = catalog.find(program_id) else {
        eprintln!("✗ Unknown program: '{program_id}'");
        let ids: Vec<&str> = catalog.programs().iter().map(|p| p.id.as_str()).collect();
        eprintln!("  Available: {}", ids.join(", "));
        std::process::exit(1);
    };

    let ledger = ledger_or_exit(subjects, ledger_file, &registry);
    print_ledger(&ledger);

    let result = calculate_match(program, &ledger);
    println!(
        "\n{} {} ({})\n{}",
        program.icon, program.title, program.code, program.description
    );
    println!("\n{}", status_line(&result));
    print_breakdown(&result);

    if !result.reasons.is_empty() {
        println!("\nMissing requirements:");
        for reason in &result.reasons {
            println!("  ✗ {reason}");
        }
    }

    let careers = program.career_preview(config.finder.career_preview);
    if !careers.is_empty() {
        println!("\nCareers: {}", careers.join(", "));
    }
    if !program.salary_range.is_empty() {
        println!("Salary range: {}", program.salary_range);
    }
}

fn default_report_path(config: &Config, format: ReportFormat) -> PathBuf {
    PathBuf::from(&config.paths.reports_dir).join(format!("{REPORT_STEM}.{}", format.extension()))
}

fn status_line(result: &MatchResult) -> String {
    if result.qualifies {
        format!("✓ You qualify! Match: {}% ({})", result.score, result.level)
    } else {
        format!("✗ Requirements not met. Match: {}% ({})", result.score, result.level)
    }
}

fn print_ledger(ledger: &SubjectLedger) {
    println!("\n=== Your Subjects ({}) ===\n", ledger.count());
    for entry in ledger {
        println!("  {:<28} {:>4}", entry.display_name, entry.percentage.to_string());
    }
    if let Some(avg) = ledger.average() {
        println!("  {:<28} {:>5.1}%", "Average", avg);
    }
}

fn print_breakdown(result: &MatchResult) {
    let b = &result.breakdown;
    println!("  Mathematics        +{}", b.math);
    println!("  English            +{}", b.english);
    println!("  Required subjects  +{}", b.required);
    println!("  Recommended        +{}", b.recommended);
    println!("  Average bonus      +{}", b.average);
    if b.raw_total() > u32::from(result.score) {
        println!("  (capped at {})", result.score);
    }
}

fn print_table(results: &[RankedProgram<'_>], qualifying_only: bool) {
    let qualifying = results.iter().filter(|r| r.result.qualifies).count();
    println!("\n=== Recommended Programs ===\n");
    println!("  {:>4}  {:>5}  {:<9}  {:<3}  Program", "Rank", "Score", "Level", "");

    let shown = results
        .iter()
        .filter(|r| !qualifying_only || r.result.qualifies);
    for (idx, ranked) in shown.enumerate() {
        let mark = if ranked.result.qualifies { "✓" } else { "✗" };
        println!(
            "  {:>4}  {:>4}%  {:<9}  {:<3}  {} {} ({})",
            idx + 1,
            ranked.result.score,
            ranked.result.level.label(),
            mark,
            ranked.program.icon,
            ranked.program.title,
            ranked.program.code,
        );
        for reason in &ranked.result.reasons {
            verbose!("                            - {reason}");
        }
    }

    if qualifying == 0 {
        println!("\n✗ You don't qualify for any program yet. Run with -v to see what's missing.");
    } else {
        println!("\n✓ You qualify for {qualifying} of {} programs", results.len());
    }
}
