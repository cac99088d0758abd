//! `config` command handler

use crate::args::ConfigSubcommand;
use program_finder::config::Config;
use program_finder::{error, info};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => {
            update(config, &key, |c| c.set(&key, &value), &format!("Set {key} = {value}"));
        }
        Some(ConfigSubcommand::Unset { key }) => {
            update(
                config,
                &key,
                |c| c.unset(&key, defaults),
                &format!("Reset {key} to default"),
            );
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

/// Print one value, or the whole config with its file location
fn show(config: &Config, key: Option<&str>) {
    if let Some(key) = key {
        match config.get(key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("✗ Unknown config key: '{key}'");
                std::process::exit(1);
            }
        }
    } else {
        println!("\n=== Configuration ===");
        println!("({})\n", Config::get_config_file_path().display());
        print!("{config}");
    }
}

/// Apply `change`, save, and report `done` on success
fn update<F>(config: &mut Config, key: &str, change: F, done: &str)
where
    F: FnOnce(&mut Config) -> Result<(), String>,
{
    if let Err(e) = change(config) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    if let Err(e) = config.save() {
        error!("Failed to save config after changing '{key}': {e}");
        eprintln!("✗ Failed to save config: {e}");
        std::process::exit(1);
    }

    info!("Config updated: {key}");
    println!("✓ {done}");
}

/// Delete the config file after confirmation
fn reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();

    if response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            eprintln!("✗ Failed to remove config file: {e}");
            std::process::exit(1);
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
