//! CLI argument definitions for `ProgramFinder`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use program_finder::config::ConfigOverrides;
use program_finder::core::report::ReportFormat;
use program_finder::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `catalog`, `min_subjects`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List the subjects that can be entered.
    Subjects,
    /// List the programs in the catalog.
    Programs {
        /// Only show programs from this faculty
        #[arg(long, value_name = "NAME")]
        faculty: Option<String>,
    },
    /// Rank every program against your subjects.
    ///
    /// Subjects come from --subject arguments, a ledger file, or both.
    Rank {
        /// Subject mark as ID=PERCENTAGE (repeatable), e.g. math=65
        #[arg(short, long = "subject", value_name = "ID=PCT")]
        subjects: Vec<String>,

        /// TOML ledger file with [[subjects]] entries
        #[arg(long, value_name = "FILE")]
        ledger: Option<PathBuf>,

        /// Only list programs you qualify for
        #[arg(long)]
        qualifying_only: bool,

        /// Also write a report in this format (markdown, html)
        #[arg(long, value_name = "FORMAT")]
        report: Option<ReportFormat>,

        /// Report output path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show how your subjects match a single program.
    Match {
        /// Program id, e.g. bcom-accounting
        #[arg(value_name = "PROGRAM")]
        program: String,

        /// Subject mark as ID=PERCENTAGE (repeatable)
        #[arg(short, long = "subject", value_name = "ID=PCT")]
        subjects: Vec<String>,

        /// TOML ledger file with [[subjects]] entries
        #[arg(long, value_name = "FILE")]
        ledger: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "programfinder",
    about = "Match your school subjects to university programs",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use this program catalog instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Use this subject list instead of the configured one
    #[arg(long = "subjects-file", value_name = "FILE")]
    pub subjects_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override the number of subjects needed before ranking
    #[arg(long = "min-subjects", value_name = "N")]
    pub min_subjects: Option<usize>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    ///
    /// # Examples
    /// ```ignore
    /// let args = Cli::parse();
    /// let overrides = args.to_config_overrides();
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            catalog: path_string(self.catalog.as_ref()),
            subjects: path_string(self.subjects_file.as_ref()),
            reports_dir: path_string(self.reports_dir.as_ref()),
            min_subjects: self.min_subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            catalog: None,
            subjects_file: None,
            reports_dir: None,
            min_subjects: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.catalog.is_none());
        assert!(overrides.subjects.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.min_subjects.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            catalog: Some(PathBuf::from("/data/programs.toml")),
            subjects_file: Some(PathBuf::from("/data/subjects.toml")),
            reports_dir: Some(PathBuf::from("/reports")),
            min_subjects: Some(5),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog, Some("/data/programs.toml".to_string()));
        assert_eq!(overrides.subjects, Some("/data/subjects.toml".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
        assert_eq!(overrides.min_subjects, Some(5));
    }

    #[test]
    fn test_parse_rank_command() {
        let cli = Cli::try_parse_from([
            "programfinder",
            "--min-subjects",
            "2",
            "rank",
            "-s",
            "math=65",
            "--subject",
            "english=55",
            "--report",
            "md",
        ])
        .unwrap();

        assert_eq!(cli.min_subjects, Some(2));
        match cli.command {
            Command::Rank {
                subjects, report, ..
            } => {
                assert_eq!(subjects, vec!["math=65", "english=55"]);
                assert_eq!(report, Some(ReportFormat::Markdown));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_report_format_rejected() {
        let result = Cli::try_parse_from(["programfinder", "rank", "--report", "pdf"]);
        assert!(result.is_err());
    }
}
