//! Command-line interface entry point for `ProgramFinder`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use program_finder::config::Config;
use program_finder::info;
use program_finder::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Subjects => commands::catalog::list_subjects(&config),
        Command::Programs { faculty } => {
            commands::catalog::list_programs(&config, faculty.as_deref());
        }
        Command::Rank {
            subjects,
            ledger,
            qualifying_only,
            report,
            output,
        } => {
            commands::rank::run(
                &commands::rank::RankOptions {
                    subjects: &subjects,
                    ledger: ledger.as_deref(),
                    qualifying_only,
                    report,
                    output: output.as_deref(),
                },
                &config,
            );
        }
        Command::Match {
            program,
            subjects,
            ledger,
        } => {
            commands::rank::run_match(&program, &subjects, ledger.as_deref(), &config);
        }
    }
}
