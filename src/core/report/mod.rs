//! Report generation for ranked program matches
//!
//! Renders a ledger and its ranked results as Markdown or HTML. Templates live
//! in `templates/` and are compiled in by askama.

pub mod formats;

use crate::core::models::SubjectLedger;
use crate::core::ranking::RankedProgram;
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

pub use formats::ReportFormat;

/// Careers listed per program unless configured otherwise
pub const DEFAULT_CAREER_PREVIEW: usize = 4;

/// One ledger line as shown in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRow {
    /// Subject display name
    pub name: String,
    /// Mark
    pub percentage: u8,
    /// `high`, `medium` or `low`
    pub band: &'static str,
}

/// One ranked program as shown in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramRow {
    /// 1-based position
    pub rank: usize,
    /// Display icon
    pub icon: String,
    /// Program title
    pub title: String,
    /// Program code
    pub code: String,
    /// Program length
    pub duration: String,
    /// Owning faculty
    pub faculty: String,
    /// One-line description
    pub description: String,
    /// Modules covered
    pub what_youll_study: String,
    /// Leading careers, comma separated
    pub careers: String,
    /// Salary range
    pub salary_range: String,
    /// Postgraduate options
    pub further_study: String,
    /// Match score
    pub score: u8,
    /// Match level label
    pub level: &'static str,
    /// Whether every gate passed
    pub qualifies: bool,
    /// Shortfall messages
    pub reasons: Vec<String>,
}

impl ProgramRow {
    /// Status line shown under the program title
    #[must_use]
    pub fn status(&self) -> String {
        if self.qualifies {
            format!("You qualify! Match: {}%", self.score)
        } else {
            "Requirements not met".to_string()
        }
    }
}

/// Everything a report template needs
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Learner's subjects
    pub ledger: &'a SubjectLedger,
    /// Ranked results, best first
    pub results: &'a [RankedProgram<'a>],
    /// Careers shown per program
    pub career_preview: usize,
    /// Leave non-qualifying programs out of the listing
    pub qualifying_only: bool,
}

impl<'a> ReportContext<'a> {
    /// Create a report context with the default career preview
    #[must_use]
    pub const fn new(ledger: &'a SubjectLedger, results: &'a [RankedProgram<'a>]) -> Self {
        Self {
            ledger,
            results,
            career_preview: DEFAULT_CAREER_PREVIEW,
            qualifying_only: false,
        }
    }

    /// Number of qualifying programs
    #[must_use]
    pub fn qualifying_count(&self) -> usize {
        self.results.iter().filter(|r| r.result.qualifies).count()
    }

    /// Average mark formatted to one decimal, or `n/a` for an empty ledger
    #[must_use]
    pub fn average_label(&self) -> String {
        self.ledger
            .average()
            .map_or_else(|| "n/a".to_string(), |avg| format!("{avg:.1}%"))
    }

    /// Ledger rows in entry order
    #[must_use]
    pub fn subject_rows(&self) -> Vec<SubjectRow> {
        self.ledger
            .iter()
            .map(|entry| SubjectRow {
                name: entry.display_name.clone(),
                percentage: entry.percentage.value(),
                band: entry.percentage.band().label(),
            })
            .collect()
    }

    /// Program rows in ranked order, honouring `qualifying_only`
    #[must_use]
    pub fn program_rows(&self) -> Vec<ProgramRow> {
        self.results
            .iter()
            .filter(|r| !self.qualifying_only || r.result.qualifies)
            .enumerate()
            .map(|(idx, ranked)| {
                let program = ranked.program;
                ProgramRow {
                    rank: idx + 1,
                    icon: program.icon.clone(),
                    title: program.title.clone(),
                    code: program.code.clone(),
                    duration: program.duration.clone(),
                    faculty: program.faculty.clone(),
                    description: program.description.clone(),
                    what_youll_study: program.what_youll_study.clone(),
                    careers: program.career_preview(self.career_preview).join(", "),
                    salary_range: program.salary_range.clone(),
                    further_study: program.further_study.clone(),
                    score: ranked.result.score,
                    level: ranked.result.level.label(),
                    qualifies: ranked.result.qualifies,
                    reasons: ranked.result.reason_messages(),
                }
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "report.md", escape = "none")]
struct MarkdownTemplate<'a> {
    subjects: &'a [SubjectRow],
    programs: &'a [ProgramRow],
    qualifying: usize,
    total: usize,
    average: &'a str,
}

#[derive(Template)]
#[template(path = "report.html")]
struct HtmlTemplate<'a> {
    subjects: &'a [SubjectRow],
    programs: &'a [ProgramRow],
    qualifying: usize,
    total: usize,
    average: &'a str,
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Markdown report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let subjects = ctx.subject_rows();
        let programs = ctx.program_rows();
        let average = ctx.average_label();
        let template = MarkdownTemplate {
            subjects: &subjects,
            programs: &programs,
            qualifying: ctx.qualifying_count(),
            total: ctx.results.len(),
            average: &average,
        };
        Ok(template.render()?)
    }
}

/// HTML report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let subjects = ctx.subject_rows();
        let programs = ctx.program_rows();
        let average = ctx.average_label();
        let template = HtmlTemplate {
            subjects: &subjects,
            programs: &programs,
            qualifying: ctx.qualifying_count(),
            total: ctx.results.len(),
            average: &average,
        };
        Ok(template.render()?)
    }
}

/// Generator for `format`
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

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
    fn test_program_rows_rank_and_filter() {
        let catalog = Catalog::builtin();
        let ledger = sample_ledger();
        let results = catalog.rank(&ledger);

        let mut ctx = ReportContext::new(&ledger, &results);
        let all = ctx.program_rows();
        assert_eq!(all.len(), catalog.len());
        assert_eq!(all[0].rank, 1);

        ctx.qualifying_only = true;
        let qualifying = ctx.program_rows();
        assert_eq!(qualifying.len(), ctx.qualifying_count());
        assert!(qualifying.iter().all(|row| row.qualifies));
        assert!(qualifying.iter().enumerate().all(|(i, row)| row.rank == i + 1));
    }

    #[test]
    fn test_career_preview_limits_careers() {
        let catalog = Catalog::builtin();
        let ledger = sample_ledger();
        let results = catalog.rank(&ledger);
        let mut ctx = ReportContext::new(&ledger, &results);
        ctx.career_preview = 1;

        for row in ctx.program_rows() {
            assert!(!row.careers.contains(", "), "{} has >1 career", row.title);
        }
    }

    #[test]
    fn test_subject_rows_and_average() {
        let ledger = sample_ledger();
        let ctx = ReportContext::new(&ledger, &[]);

        let rows = ctx.subject_rows();
        assert_eq!(rows[0].name, "Mathematics");
        assert_eq!(rows[0].band, "medium");
        assert_eq!(rows[2].band, "high");
        assert_eq!(ctx.average_label(), "63.3%");

        let empty = SubjectLedger::new();
        assert_eq!(ReportContext::new(&empty, &[]).average_label(), "n/a");
    }

    #[test]
    fn test_status_line() {
        let ledger = sample_ledger();
        let catalog = Catalog::builtin();
        let results = catalog.rank(&ledger);
        let rows = ReportContext::new(&ledger, &results).program_rows();

        let accounting = rows.iter().find(|r| r.code == "BCOM-ACC").unwrap();
        assert_eq!(accounting.status(), "You qualify! Match: 85%");
        let chemistry = rows.iter().find(|r| r.code == "BSC-CHEM").unwrap();
        assert_eq!(chemistry.status(), "Requirements not met");
    }
}
